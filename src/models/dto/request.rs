use serde::Deserialize;
use validator::Validate;

use crate::models::domain::question::QuestionType;
use crate::models::domain::QuestionDraft;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(max = 500))]
    pub text: String,

    #[serde(rename = "type")]
    pub question_type: Option<QuestionType>,

    #[validate(length(max = 20))]
    pub options: Vec<String>,

    pub correct_answers: Vec<String>,
}

impl From<CreateQuestionRequest> for QuestionDraft {
    fn from(request: CreateQuestionRequest) -> Self {
        QuestionDraft {
            text: request.text,
            question_type: request.question_type,
            options: request.options,
            correct_answers: request.correct_answers,
        }
    }
}
