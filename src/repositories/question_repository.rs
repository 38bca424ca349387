use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{NewQuestion, Question, QuestionType},
};

/// The question store the assessment core depends on. Implemented over
/// MongoDB in production; tests supply in-memory fakes or mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn list_questions(&self, module_id: &str) -> AppResult<Vec<Question>>;
    async fn create_question(&self, module_id: &str, question: NewQuestion)
        -> AppResult<Question>;
    async fn delete_question(&self, module_id: &str, id: &str) -> AppResult<()>;
}

/// Stored shape: the question body plus the module it belongs to.
#[derive(Clone, Debug, Deserialize, Serialize)]
struct QuestionDocument {
    id: String,
    module_id: String,
    text: String,
    #[serde(rename = "type")]
    question_type: QuestionType,
    options: Vec<String>,
    correct_answers: Vec<String>,
}

impl From<QuestionDocument> for Question {
    fn from(document: QuestionDocument) -> Self {
        Question {
            id: document.id,
            text: document.text,
            question_type: document.question_type,
            options: document.options,
            correct_answers: document.correct_answers,
        }
    }
}

pub struct MongoQuestionRepository {
    collection: Collection<QuestionDocument>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(id_index).await?;

        let module_index = IndexModel::builder()
            .keys(doc! { "module_id": 1 })
            .options(IndexOptions::builder().name("module_id".to_string()).build())
            .build();
        self.collection.create_index(module_index).await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn list_questions(&self, module_id: &str) -> AppResult<Vec<Question>> {
        let cursor = self
            .collection
            .find(doc! { "module_id": module_id })
            .await?;
        let documents: Vec<QuestionDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Question::from).collect())
    }

    async fn create_question(
        &self,
        module_id: &str,
        question: NewQuestion,
    ) -> AppResult<Question> {
        let document = QuestionDocument {
            id: Uuid::new_v4().to_string(),
            module_id: module_id.to_string(),
            text: question.text,
            question_type: question.question_type,
            options: question.options,
            correct_answers: question.correct_answers,
        };

        self.collection.insert_one(&document).await?;
        Ok(document.into())
    }

    async fn delete_question(&self, module_id: &str, id: &str) -> AppResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "id": id, "module_id": module_id })
            .await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
        }
        Ok(())
    }
}
