use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String, // assigned by the store on creation
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub correct_answers: Vec<String>,
}

/// A validated, cleaned question body ready to be persisted.
/// Produced by the authoring service; the store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewQuestion {
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub correct_answers: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    SingleChoice, // exactly one correct answer
    MultiSelect,  // one or more correct answers
}

impl Question {
    /// The single correct answer of a SingleChoice question.
    pub fn single_correct_answer(&self) -> Option<&str> {
        match self.question_type {
            QuestionType::SingleChoice => self.correct_answers.first().map(String::as_str),
            QuestionType::MultiSelect => None,
        }
    }

    pub fn correct_answer_set(&self) -> HashSet<&str> {
        self.correct_answers.iter().map(String::as_str).collect()
    }
}
