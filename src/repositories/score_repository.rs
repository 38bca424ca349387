use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::{IndexOptions, UpdateOptions},
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::LearnerScores};

/// The score record store: one percentage per (learner, module),
/// overwritten on every submit and retake-reset.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    async fn get_score(&self, learner_id: &str, module_id: &str) -> AppResult<Option<f64>>;
    async fn set_score(&self, learner_id: &str, module_id: &str, score: f64) -> AppResult<()>;
}

pub struct MongoScoreRepository {
    collection: Collection<LearnerScores>,
}

impl MongoScoreRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for learners collection");

        let learner_index = IndexModel::builder()
            .keys(doc! { "learner_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("learner_id_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(learner_index).await?;

        log::info!("Successfully created indexes for learners collection");
        Ok(())
    }
}

#[async_trait]
impl ScoreRepository for MongoScoreRepository {
    async fn get_score(&self, learner_id: &str, module_id: &str) -> AppResult<Option<f64>> {
        let record = self
            .collection
            .find_one(doc! { "learner_id": learner_id })
            .await?;

        Ok(record.and_then(|learner| learner.score_for(module_id)))
    }

    async fn set_score(&self, learner_id: &str, module_id: &str, score: f64) -> AppResult<()> {
        let field = format!("scores.{}", module_id);
        self.collection
            .update_one(
                doc! { "learner_id": learner_id },
                doc! { "$set": { &field: score } },
            )
            .with_options(UpdateOptions::builder().upsert(true).build())
            .await?;

        log::debug!(
            "Persisted score {} for learner '{}' on module '{}'",
            score,
            learner_id,
            module_id
        );
        Ok(())
    }
}
