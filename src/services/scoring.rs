use std::collections::HashMap;

use crate::models::domain::{AnswerSelection, Question, QuestionType};

/// Outcome of scoring a completed attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreSummary {
    /// Count of correctly answered questions.
    pub result: usize,
    /// `result / |questions| * 100`, rounded to one decimal place.
    pub percentage: f64,
}

impl ScoreSummary {
    /// The module-completion signal fires only on an exact 100.0.
    pub fn completes_module(&self) -> bool {
        self.percentage == 100.0
    }
}

pub struct ScoringEngine;

impl ScoringEngine {
    /// Scores an attempt. Credit is binary per question; a question with no
    /// recorded answer earns nothing. An empty question set scores 0.0.
    pub fn compute(
        questions: &[Question],
        answers: &HashMap<String, AnswerSelection>,
    ) -> ScoreSummary {
        let result: usize = questions
            .iter()
            .map(|question| Self::evaluate(question, answers.get(&question.id)))
            .sum();

        let percentage = if questions.is_empty() {
            0.0
        } else {
            round_one_decimal(result as f64 / questions.len() as f64 * 100.0)
        };

        ScoreSummary { result, percentage }
    }

    /// Binary credit for one question. SingleChoice: the selected option
    /// must equal the single correct answer. MultiSelect: the selected set
    /// must equal the correct-answer set exactly; subsets and supersets
    /// earn nothing.
    pub fn evaluate(question: &Question, answer: Option<&AnswerSelection>) -> usize {
        let correct = match (question.question_type, answer) {
            (QuestionType::SingleChoice, Some(AnswerSelection::Single(selected))) => {
                question.single_correct_answer() == Some(selected.as_str())
            }
            (QuestionType::MultiSelect, Some(AnswerSelection::Multi(selected))) => {
                let correct_set = question.correct_answer_set();
                selected.len() == correct_set.len()
                    && selected.iter().all(|option| correct_set.contains(option.as_str()))
            }
            _ => false,
        };

        if correct {
            1
        } else {
            0
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
