use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{AnswerSelection, Question, QuestionType},
    repositories::{QuestionRepository, ScoreRepository},
    services::scoring::{ScoreSummary, ScoringEngine},
};

/// Who is opening the quiz. Selected once, at session creation; the two
/// roles get disjoint session variants rather than branching inside one
/// flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Learner,
    Administrator,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress,
    ConfirmingSubmission,
    Submitted,
}

/// How a submission request was raised: the explicit submit action, or an
/// interaction outside the active quiz surface (attempted navigation away).
/// Both converge on the same confirmation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionTrigger {
    SubmitAction,
    OutsideInteraction,
}

/// One learner's pass through a module's quiz.
///
/// Transitions take `&mut self`, so no two transitions for the same session
/// can be in flight at once. Dropping the session discards all answers and
/// performs no further writes; in-progress work is never saved.
pub struct LearnerSession {
    learner_id: String,
    module_id: String,
    questions: Vec<Question>,
    answers: HashMap<String, AnswerSelection>,
    state: SessionState,
    outcome: Option<ScoreSummary>,
    question_repository: Arc<dyn QuestionRepository>,
    score_repository: Arc<dyn ScoreRepository>,
}

impl LearnerSession {
    pub fn new(
        learner_id: &str,
        module_id: &str,
        question_repository: Arc<dyn QuestionRepository>,
        score_repository: Arc<dyn ScoreRepository>,
    ) -> Self {
        Self {
            learner_id: learner_id.to_string(),
            module_id: module_id.to_string(),
            questions: Vec::new(),
            answers: HashMap::new(),
            state: SessionState::NotStarted,
            outcome: None,
            question_repository,
            score_repository,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &HashMap<String, AnswerSelection> {
        &self.answers
    }

    /// The scored outcome, present only once Submitted.
    pub fn outcome(&self) -> Option<&ScoreSummary> {
        self.outcome.as_ref()
    }

    /// Loads the module's question set and begins answering. A failed load
    /// leaves the session NotStarted and retryable.
    pub async fn start(&mut self) -> AppResult<()> {
        self.expect_state(SessionState::NotStarted, "start")?;

        let questions = match self.question_repository.list_questions(&self.module_id).await {
            Ok(questions) => questions,
            Err(err) => {
                log::error!(
                    "Failed to load questions for module '{}': {}",
                    self.module_id,
                    err
                );
                return Err(err);
            }
        };

        self.questions = questions;
        self.answers.clear();
        self.state = SessionState::InProgress;
        log::info!(
            "Learner '{}' started quiz for module '{}' ({} questions)",
            self.learner_id,
            self.module_id,
            self.questions.len()
        );
        Ok(())
    }

    /// Records the learner's current selection for a question. The
    /// selection kind must match the question's type.
    pub fn record_answer(
        &mut self,
        question_id: &str,
        selection: AnswerSelection,
    ) -> AppResult<()> {
        self.expect_state(SessionState::InProgress, "answer")?;

        let question = self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Question with id '{}' not found", question_id))
            })?;

        let matches_type = matches!(
            (question.question_type, &selection),
            (QuestionType::SingleChoice, AnswerSelection::Single(_))
                | (QuestionType::MultiSelect, AnswerSelection::Multi(_))
        );
        if !matches_type {
            return Err(AppError::ValidationError(format!(
                "Selection does not match the type of question '{}'",
                question_id
            )));
        }

        self.answers.insert(question_id.to_string(), selection);
        Ok(())
    }

    /// Raises the submission confirmation, whether from the explicit
    /// submit action or from an interaction outside the quiz surface.
    pub fn request_submission(&mut self, trigger: SubmissionTrigger) -> AppResult<()> {
        self.expect_state(SessionState::InProgress, "request submission")?;

        log::debug!(
            "Submission requested for module '{}' via {:?}",
            self.module_id,
            trigger
        );
        self.state = SessionState::ConfirmingSubmission;
        Ok(())
    }

    /// Backs out of the confirmation; answers already entered are kept.
    pub fn cancel_submission(&mut self) -> AppResult<()> {
        self.expect_state(SessionState::ConfirmingSubmission, "cancel submission")?;

        self.state = SessionState::InProgress;
        Ok(())
    }

    /// Scores the attempt and persists the percentage. The session settles
    /// Submitted only after the score write succeeds; a failed write leaves
    /// it ConfirmingSubmission with answers intact, ready for a retry.
    pub async fn confirm_submission(&mut self) -> AppResult<&ScoreSummary> {
        self.expect_state(SessionState::ConfirmingSubmission, "confirm submission")?;

        let summary = ScoringEngine::compute(&self.questions, &self.answers);
        if let Err(err) = self
            .score_repository
            .set_score(&self.learner_id, &self.module_id, summary.percentage)
            .await
        {
            log::error!(
                "Failed to persist score for module '{}': {}",
                self.module_id,
                err
            );
            return Err(err);
        }

        if summary.completes_module() {
            log::info!(
                "Learner '{}' completed module '{}'",
                self.learner_id,
                self.module_id
            );
        } else {
            log::info!(
                "Learner '{}' scored {}% on module '{}'",
                self.learner_id,
                summary.percentage,
                self.module_id
            );
        }

        self.state = SessionState::Submitted;
        Ok(self.outcome.insert(summary))
    }

    /// Invalidates the recorded score with an immediate 0 write, clears the
    /// answers, and returns to InProgress against the same question set.
    /// A failed reset write leaves the session Submitted.
    pub async fn retake(&mut self) -> AppResult<()> {
        self.expect_state(SessionState::Submitted, "retake")?;

        // Prior credit is revoked before the learner re-answers; abandoning
        // the retake leaves the recorded score at 0.
        if let Err(err) = self
            .score_repository
            .set_score(&self.learner_id, &self.module_id, 0.0)
            .await
        {
            log::error!(
                "Failed to reset score for module '{}': {}",
                self.module_id,
                err
            );
            return Err(err);
        }

        self.outcome = None;
        self.answers.clear();
        self.state = SessionState::InProgress;
        log::info!(
            "Learner '{}' is retaking module '{}'",
            self.learner_id,
            self.module_id
        );
        Ok(())
    }

    fn expect_state(&self, expected: SessionState, action: &str) -> AppResult<()> {
        if self.state != expected {
            return Err(AppError::BadRequest(format!(
                "Cannot {} from {:?}",
                action, self.state
            )));
        }
        Ok(())
    }
}

/// Administrator view of a module's quiz: all questions, no answer
/// collection, no scoring, no transitions. Editing goes through the
/// authoring service instead.
pub struct ReviewSession {
    module_id: String,
    questions: Vec<Question>,
}

impl ReviewSession {
    pub async fn open(
        module_id: &str,
        question_repository: Arc<dyn QuestionRepository>,
    ) -> AppResult<Self> {
        let questions = question_repository.list_questions(module_id).await?;
        Ok(Self {
            module_id: module_id.to_string(),
            questions,
        })
    }

    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

/// Entry point: the caller's role picks the session variant once.
pub enum QuizSession {
    Learner(LearnerSession),
    Review(ReviewSession),
}

impl QuizSession {
    pub async fn open(
        role: Role,
        learner_id: &str,
        module_id: &str,
        question_repository: Arc<dyn QuestionRepository>,
        score_repository: Arc<dyn ScoreRepository>,
    ) -> AppResult<Self> {
        match role {
            Role::Learner => Ok(QuizSession::Learner(LearnerSession::new(
                learner_id,
                module_id,
                question_repository,
                score_repository,
            ))),
            Role::Administrator => {
                let review = ReviewSession::open(module_id, question_repository).await?;
                Ok(QuizSession::Review(review))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockQuestionRepository, MockScoreRepository};

    fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {}", id),
            question_type: QuestionType::SingleChoice,
            options: vec!["A".to_string(), "B".to_string()],
            correct_answers: vec!["A".to_string()],
        }
    }

    fn question_repo_with(questions: Vec<Question>) -> Arc<dyn QuestionRepository> {
        let mut repository = MockQuestionRepository::new();
        repository
            .expect_list_questions()
            .returning(move |_| Ok(questions.clone()));
        Arc::new(repository)
    }

    fn score_repo_expecting(scores: Vec<f64>) -> Arc<dyn ScoreRepository> {
        let mut repository = MockScoreRepository::new();
        let mut remaining = scores;
        remaining.reverse();
        repository
            .expect_set_score()
            .returning(move |_, _, score| {
                let expected = remaining.pop().expect("unexpected score write");
                assert_eq!(score, expected);
                Ok(())
            });
        Arc::new(repository)
    }

    fn failing_score_repo() -> Arc<dyn ScoreRepository> {
        let mut repository = MockScoreRepository::new();
        repository
            .expect_set_score()
            .returning(|_, _, _| Err(AppError::DatabaseError("write failed".to_string())));
        Arc::new(repository)
    }

    async fn started_session(score_repository: Arc<dyn ScoreRepository>) -> LearnerSession {
        let questions = vec![question("q1"), question("q2")];
        let mut session = LearnerSession::new(
            "learner-1",
            "sdg11t1",
            question_repo_with(questions),
            score_repository,
        );
        session.start().await.unwrap();
        session
    }

    #[tokio::test]
    async fn start_loads_questions_and_enters_in_progress() {
        let session = started_session(score_repo_expecting(vec![])).await;

        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.questions().len(), 2);
        assert!(session.answers().is_empty());
        assert!(session.outcome().is_none());
    }

    #[tokio::test]
    async fn start_failure_leaves_session_not_started() {
        let mut repository = MockQuestionRepository::new();
        repository
            .expect_list_questions()
            .returning(|_| Err(AppError::DatabaseError("read failed".to_string())));

        let mut session = LearnerSession::new(
            "learner-1",
            "sdg11t1",
            Arc::new(repository),
            score_repo_expecting(vec![]),
        );

        assert!(session.start().await.is_err());
        assert_eq!(session.state(), SessionState::NotStarted);
    }

    #[tokio::test]
    async fn submit_and_confirm_persists_percentage() {
        let mut session = started_session(score_repo_expecting(vec![50.0])).await;
        session
            .record_answer("q1", AnswerSelection::single("A"))
            .unwrap();
        session
            .record_answer("q2", AnswerSelection::single("B"))
            .unwrap();

        session
            .request_submission(SubmissionTrigger::SubmitAction)
            .unwrap();
        assert_eq!(session.state(), SessionState::ConfirmingSubmission);

        let summary = session.confirm_submission().await.unwrap();
        assert_eq!(summary.result, 1);
        assert_eq!(summary.percentage, 50.0);
        assert_eq!(session.state(), SessionState::Submitted);
    }

    #[tokio::test]
    async fn outside_interaction_raises_the_same_confirmation() {
        let mut session = started_session(score_repo_expecting(vec![])).await;

        session
            .request_submission(SubmissionTrigger::OutsideInteraction)
            .unwrap();

        assert_eq!(session.state(), SessionState::ConfirmingSubmission);
    }

    #[tokio::test]
    async fn cancel_returns_to_in_progress_with_answers_kept() {
        let mut session = started_session(score_repo_expecting(vec![])).await;
        session
            .record_answer("q1", AnswerSelection::single("A"))
            .unwrap();
        session
            .request_submission(SubmissionTrigger::SubmitAction)
            .unwrap();

        session.cancel_submission().unwrap();

        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.answers().len(), 1);
    }

    #[tokio::test]
    async fn failed_score_write_keeps_confirming_state() {
        let mut session = started_session(failing_score_repo()).await;
        session
            .record_answer("q1", AnswerSelection::single("A"))
            .unwrap();
        session
            .request_submission(SubmissionTrigger::SubmitAction)
            .unwrap();

        assert!(session.confirm_submission().await.is_err());

        assert_eq!(session.state(), SessionState::ConfirmingSubmission);
        assert_eq!(session.answers().len(), 1);
        assert!(session.outcome().is_none());
    }

    #[tokio::test]
    async fn retake_zeroes_score_and_clears_answers() {
        let mut session = started_session(score_repo_expecting(vec![100.0, 0.0])).await;
        session
            .record_answer("q1", AnswerSelection::single("A"))
            .unwrap();
        session
            .record_answer("q2", AnswerSelection::single("A"))
            .unwrap();
        session
            .request_submission(SubmissionTrigger::SubmitAction)
            .unwrap();
        session.confirm_submission().await.unwrap();

        session.retake().await.unwrap();

        assert_eq!(session.state(), SessionState::InProgress);
        assert!(session.answers().is_empty());
        assert!(session.outcome().is_none());
        assert_eq!(session.questions().len(), 2);
    }

    #[tokio::test]
    async fn failed_retake_reset_stays_submitted() {
        let mut repository = MockScoreRepository::new();
        let mut writes = 0;
        repository.expect_set_score().returning(move |_, _, _| {
            writes += 1;
            if writes == 1 {
                Ok(())
            } else {
                Err(AppError::DatabaseError("write failed".to_string()))
            }
        });

        let mut session = started_session(Arc::new(repository)).await;
        session
            .request_submission(SubmissionTrigger::SubmitAction)
            .unwrap();
        session.confirm_submission().await.unwrap();

        assert!(session.retake().await.is_err());
        assert_eq!(session.state(), SessionState::Submitted);
        assert!(session.outcome().is_some());
    }

    #[tokio::test]
    async fn record_answer_rejects_mismatched_selection() {
        let mut session = started_session(score_repo_expecting(vec![])).await;

        let err = session
            .record_answer("q1", AnswerSelection::multi(["A"]))
            .unwrap_err();

        assert!(err.to_string().contains("does not match"));
    }

    #[tokio::test]
    async fn transitions_reject_wrong_states() {
        let mut session = started_session(score_repo_expecting(vec![])).await;

        // already started
        assert!(session.start().await.is_err());
        // nothing to cancel or confirm yet
        assert!(session.cancel_submission().is_err());
        assert!(session.confirm_submission().await.is_err());
        // not submitted yet
        assert!(session.retake().await.is_err());
        assert_eq!(session.state(), SessionState::InProgress);
    }

    #[tokio::test]
    async fn administrator_gets_a_review_session() {
        let questions = vec![question("q1")];
        let session = QuizSession::open(
            Role::Administrator,
            "admin-1",
            "sdg11t1",
            question_repo_with(questions),
            score_repo_expecting(vec![]),
        )
        .await
        .unwrap();

        match session {
            QuizSession::Review(review) => {
                assert_eq!(review.module_id(), "sdg11t1");
                assert_eq!(review.questions().len(), 1);
            }
            QuizSession::Learner(_) => panic!("expected a review session"),
        }
    }

    #[tokio::test]
    async fn learner_gets_the_state_machine() {
        let session = QuizSession::open(
            Role::Learner,
            "learner-1",
            "sdg11t1",
            question_repo_with(vec![]),
            score_repo_expecting(vec![]),
        )
        .await
        .unwrap();

        match session {
            QuizSession::Learner(learner) => {
                assert_eq!(learner.state(), SessionState::NotStarted);
            }
            QuizSession::Review(_) => panic!("expected a learner session"),
        }
    }
}
