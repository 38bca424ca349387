pub mod authoring;
pub mod notice;
pub mod scoring;
pub mod session;

pub use authoring::{AuthoringForm, AuthoringService, AuthoringValidator, DraftValidation};
pub use notice::{NoticeBoard, TransientNotice};
pub use scoring::{ScoreSummary, ScoringEngine};
pub use session::{LearnerSession, QuizSession, ReviewSession, Role, SessionState, SubmissionTrigger};
