pub mod question_repository;
pub mod score_repository;

pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use score_repository::{MongoScoreRepository, ScoreRepository};

#[cfg(test)]
pub use question_repository::MockQuestionRepository;
#[cfg(test)]
pub use score_repository::MockScoreRepository;
