use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoQuestionRepository, MongoScoreRepository, QuestionRepository, ScoreRepository,
    },
    services::{authoring::AuthoringService, session::QuizSession, session::Role},
};

#[derive(Clone)]
pub struct AppState {
    pub authoring_service: Arc<AuthoringService>,
    pub question_repository: Arc<dyn QuestionRepository>,
    pub score_repository: Arc<dyn ScoreRepository>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(
            &db,
            &config.questions_collection,
        ));
        question_repository.ensure_indexes().await?;

        let score_repository =
            Arc::new(MongoScoreRepository::new(&db, &config.learners_collection));
        score_repository.ensure_indexes().await?;

        let authoring_service = Arc::new(AuthoringService::new(question_repository.clone()));

        Ok(Self {
            authoring_service,
            question_repository,
            score_repository,
            config: Arc::new(config),
        })
    }

    /// Opens a quiz session for the caller; the role picks the variant.
    pub async fn open_quiz_session(
        &self,
        role: Role,
        learner_id: &str,
        module_id: &str,
    ) -> AppResult<QuizSession> {
        QuizSession::open(
            role,
            learner_id,
            module_id,
            self.question_repository.clone(),
            self.score_repository.clone(),
        )
        .await
    }
}
