use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        question_draft::MIN_OPTIONS_MESSAGE, NewQuestion, Question, QuestionDraft, QuestionType,
    },
    repositories::QuestionRepository,
    services::notice::NoticeBoard,
};

pub const MSG_NO_TEXT: &str = "Must add a question";
pub const MSG_NO_TYPE: &str = "Must select a question type";
pub const MSG_SINGLE_CHOICE_ANSWERS: &str = "Multiple choice questions must have one answer";
pub const MSG_MULTI_SELECT_ANSWERS: &str = "Multiple select question must have at least one answer";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftValidation {
    Valid,
    Invalid(&'static str),
}

impl DraftValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, DraftValidation::Valid)
    }
}

pub struct AuthoringValidator;

impl AuthoringValidator {
    /// Validates a draft against the authoring rules, in priority order:
    /// question text, question type, then the type's correct-answer count.
    /// The first failing rule determines the surfaced message. Pure and
    /// deterministic; cleaning (trim, drop blanks) is applied to a copy.
    pub fn validate(draft: &QuestionDraft) -> DraftValidation {
        if draft.text.is_empty() {
            return DraftValidation::Invalid(MSG_NO_TEXT);
        }

        let Some(question_type) = draft.question_type else {
            return DraftValidation::Invalid(MSG_NO_TYPE);
        };

        let correct_count = draft.cleaned_correct_answers().len();
        match question_type {
            QuestionType::SingleChoice if correct_count != 1 => {
                DraftValidation::Invalid(MSG_SINGLE_CHOICE_ANSWERS)
            }
            QuestionType::MultiSelect if correct_count == 0 => {
                DraftValidation::Invalid(MSG_MULTI_SELECT_ANSWERS)
            }
            _ => DraftValidation::Valid,
        }
    }
}

/// One authoring dialog's worth of state: the draft under construction and
/// the transient message shown when an edit or save is rejected.
pub struct AuthoringForm {
    pub draft: QuestionDraft,
    pub notices: NoticeBoard,
}

impl AuthoringForm {
    pub fn new(notice_ttl_seconds: i64) -> Self {
        Self {
            draft: QuestionDraft::new(),
            notices: NoticeBoard::new(notice_ttl_seconds),
        }
    }

    pub fn add_option(&mut self) {
        self.draft.add_option();
    }

    pub fn edit_option(&mut self, index: usize, text: &str) -> AppResult<()> {
        self.draft.edit_option(index, text)
    }

    /// Deletes an option; a rejected deletion (fewer than three options)
    /// raises the minimum-options notice, a successful one clears any
    /// pending notice.
    pub fn delete_option(&mut self, index: usize) {
        match self.draft.delete_option(index) {
            Ok(()) => self.notices.clear(),
            Err(_) => self.notices.raise(MIN_OPTIONS_MESSAGE),
        }
    }

    pub fn set_correct(&mut self, index: usize, checked: bool) -> AppResult<()> {
        self.draft.set_correct(index, checked)
    }

    /// Re-validates the draft, raising the failure message as a notice.
    pub fn check(&mut self) -> DraftValidation {
        let validation = AuthoringValidator::validate(&self.draft);
        if let DraftValidation::Invalid(message) = validation {
            self.notices.raise(message);
        }
        validation
    }

    pub fn current_notice(&self) -> Option<&str> {
        self.notices.current(Utc::now())
    }

    /// Discards the draft, e.g. when the dialog closes without saving.
    pub fn close(&mut self) {
        self.draft.reset();
        self.notices.clear();
    }
}

/// Persistence orchestration for question authoring: validate, clean, then
/// hand the question body to the store.
pub struct AuthoringService {
    repository: Arc<dyn QuestionRepository>,
}

impl AuthoringService {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_questions(&self, module_id: &str) -> AppResult<Vec<Question>> {
        self.repository.list_questions(module_id).await
    }

    pub async fn save_question(
        &self,
        module_id: &str,
        draft: &QuestionDraft,
    ) -> AppResult<Question> {
        if let DraftValidation::Invalid(message) = AuthoringValidator::validate(draft) {
            return Err(AppError::ValidationError(message.to_string()));
        }

        let question_type = draft
            .question_type
            .ok_or_else(|| AppError::InternalError("validated draft lost its type".to_string()))?;

        let question = NewQuestion {
            text: draft.text.trim().to_string(),
            question_type,
            options: draft.cleaned_options(),
            correct_answers: draft.cleaned_correct_answers(),
        };

        let saved = self.repository.create_question(module_id, question).await?;
        log::info!(
            "Saved question '{}' for module '{}'",
            saved.id,
            module_id
        );
        Ok(saved)
    }

    pub async fn delete_question(&self, module_id: &str, id: &str) -> AppResult<()> {
        self.repository.delete_question(module_id, id).await?;
        log::info!("Deleted question '{}' from module '{}'", id, module_id);
        Ok(())
    }
}
