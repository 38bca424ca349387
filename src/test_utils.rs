use crate::models::domain::{Question, QuestionDraft, QuestionType};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A single-choice question with one correct answer.
    pub fn single_choice_question(id: &str, correct: &str, other: &str) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {}", id),
            question_type: QuestionType::SingleChoice,
            options: vec![correct.to_string(), other.to_string()],
            correct_answers: vec![correct.to_string()],
        }
    }

    /// A multi-select question whose correct set is `correct`.
    pub fn multi_select_question(id: &str, correct: &[&str], other: &str) -> Question {
        let mut options: Vec<String> = correct.iter().map(|s| s.to_string()).collect();
        options.push(other.to_string());
        Question {
            id: id.to_string(),
            text: format!("Question {}", id),
            question_type: QuestionType::MultiSelect,
            options,
            correct_answers: correct.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// A draft that passes validation as-is.
    pub fn valid_single_choice_draft() -> QuestionDraft {
        QuestionDraft {
            text: "Capital of France?".to_string(),
            question_type: Some(QuestionType::SingleChoice),
            options: vec!["Paris".to_string(), "Lyon".to_string()],
            correct_answers: vec!["Paris".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::QuestionType;

    #[test]
    fn test_fixtures_single_choice_question() {
        let question = single_choice_question("q1", "A", "B");
        assert_eq!(question.question_type, QuestionType::SingleChoice);
        assert_eq!(question.correct_answers, vec!["A"]);
    }

    #[test]
    fn test_fixtures_multi_select_question() {
        let question = multi_select_question("q1", &["A", "B"], "C");
        assert_eq!(question.options.len(), 3);
        assert_eq!(question.correct_answers.len(), 2);
    }

    #[test]
    fn test_fixtures_valid_draft() {
        let draft = valid_single_choice_draft();
        assert_eq!(draft.cleaned_options(), vec!["Paris", "Lyon"]);
    }
}
