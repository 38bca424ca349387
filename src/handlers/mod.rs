pub mod question_handler;
pub mod score_handler;
