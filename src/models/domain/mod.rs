pub mod answer;
pub mod learner_scores;
pub mod question;
pub mod question_draft;

pub use answer::AnswerSelection;
pub use learner_scores::LearnerScores;
pub use question::{NewQuestion, Question, QuestionType};
pub use question_draft::QuestionDraft;
