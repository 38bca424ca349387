use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-learner score record: one percentage per module, overwritten on
/// every submit and retake-reset. No attempt history is kept.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LearnerScores {
    pub learner_id: String,
    #[serde(default)]
    pub scores: HashMap<String, f64>,
}

impl LearnerScores {
    pub fn new(learner_id: &str) -> Self {
        Self {
            learner_id: learner_id.to_string(),
            scores: HashMap::new(),
        }
    }

    pub fn score_for(&self, module_id: &str) -> Option<f64> {
        self.scores.get(module_id).copied()
    }
}
