use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A learner's current selection for one question. The variant must match
/// the question's type; the session rejects mismatched selections.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AnswerSelection {
    Single(String),
    Multi(HashSet<String>),
}

impl AnswerSelection {
    pub fn single(option: &str) -> Self {
        AnswerSelection::Single(option.to_string())
    }

    pub fn multi<'a, I>(options: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        AnswerSelection::Multi(options.into_iter().map(str::to_string).collect())
    }
}
