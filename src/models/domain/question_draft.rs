use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::QuestionType;

pub const MIN_OPTIONS_MESSAGE: &str = "You must have a minimum of 2 options";

/// An in-memory question under construction. Nothing here is persisted
/// until the draft passes validation and is handed to the question store.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionDraft {
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: Option<QuestionType>,
    pub options: Vec<String>,
    pub correct_answers: Vec<String>,
}

impl QuestionDraft {
    /// A fresh draft starts with two empty option slots.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            question_type: None,
            options: vec![String::new(), String::new()],
            correct_answers: Vec::new(),
        }
    }

    /// Restores the draft to its initial state, e.g. when the authoring
    /// dialog is closed without saving.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Appends an empty option slot. Never removes existing slots.
    pub fn add_option(&mut self) {
        self.options.push(String::new());
    }

    /// Replaces the option text at `index`.
    pub fn edit_option(&mut self, index: usize, text: &str) -> AppResult<()> {
        let slot = self.options.get_mut(index).ok_or_else(|| {
            AppError::BadRequest(format!("No option at position {}", index))
        })?;
        *slot = text.to_string();
        Ok(())
    }

    /// Removes the option at `index`, but only while more than two options
    /// remain. Any correct answer equal to the removed option's text is
    /// removed with it.
    pub fn delete_option(&mut self, index: usize) -> AppResult<()> {
        if self.options.len() < 3 {
            return Err(AppError::ValidationError(MIN_OPTIONS_MESSAGE.to_string()));
        }
        if index >= self.options.len() {
            return Err(AppError::BadRequest(format!(
                "No option at position {}",
                index
            )));
        }

        let removed = self.options.remove(index);
        self.correct_answers.retain(|answer| *answer != removed);
        Ok(())
    }

    /// Marks or unmarks the option at `index` as a correct answer.
    /// Blank options can never be marked correct.
    pub fn set_correct(&mut self, index: usize, checked: bool) -> AppResult<()> {
        let option = self.options.get(index).cloned().ok_or_else(|| {
            AppError::BadRequest(format!("No option at position {}", index))
        })?;

        if checked {
            if !option.trim().is_empty() && !self.correct_answers.contains(&option) {
                self.correct_answers.push(option);
            }
        } else {
            self.correct_answers.retain(|answer| *answer != option);
        }
        Ok(())
    }

    /// Options with surrounding whitespace trimmed and blank entries dropped.
    pub fn cleaned_options(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|opt| opt.trim().to_string())
            .filter(|opt| !opt.is_empty())
            .collect()
    }

    /// Correct answers trimmed, with blanks dropped and entries that no
    /// longer match a surviving option excluded.
    pub fn cleaned_correct_answers(&self) -> Vec<String> {
        let options = self.cleaned_options();
        self.correct_answers
            .iter()
            .map(|answer| answer.trim().to_string())
            .filter(|answer| !answer.is_empty() && options.contains(answer))
            .collect()
    }
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self::new()
    }
}
