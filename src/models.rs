use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const POINTS_PER_QUESTION: usize = 10;

/// One question record as stored in a bank file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawQuestion {
    pub question: String,
    pub choices: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(rename = "questionType", default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
}

/// One entry of `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankEntry {
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub test_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuestionType {
    Single,
    Multiple,
    TrueFalse,
}

impl QuestionType {
    /// Missing and unknown tags are treated as single choice.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("multiple") => QuestionType::Multiple,
            Some("true_false") => QuestionType::TrueFalse,
            _ => QuestionType::Single,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuestionType::Single => "Single Choice",
            QuestionType::Multiple => "Multiple Choice",
            QuestionType::TrueFalse => "True / False",
        }
    }
}

/// A choice after the identity has been extracted from its raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub raw: String,
    pub letter: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: usize,
    pub prompt: String,
    pub question_type: QuestionType,
    pub choice_set: Vec<String>,
    pub presentation: Vec<Choice>,
    pub answer: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Single(String),
    Multiple(BTreeSet<String>),
}

impl Answer {
    pub fn contains(&self, letter: &str) -> bool {
        match self {
            Answer::Single(selected) => selected == letter,
            Answer::Multiple(selected) => selected.contains(letter),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    Unanswered,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Correct => "Correct!",
            Verdict::Incorrect => "Incorrect",
            Verdict::Unanswered => "Unanswered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub earned: usize,
    pub possible: usize,
}

impl Score {
    pub fn from_counts(correct: usize, total: usize) -> Self {
        Self {
            earned: correct * POINTS_PER_QUESTION,
            possible: total * POINTS_PER_QUESTION,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.earned, self.possible)
    }
}

/// Grading details shown once the test is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub verdict: Verdict,
    pub selected: String,
    pub correct: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceMark {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView<'a> {
    pub letter: &'a str,
    pub text: &'a str,
    pub selected: bool,
    pub mark: Option<ChoiceMark>,
}

/// Read-only render data for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView<'a> {
    pub index: usize,
    pub total: usize,
    pub prompt: &'a str,
    pub question_type: QuestionType,
    pub choices: Vec<ChoiceView<'a>>,
    pub response: Option<&'a Answer>,
    pub graded: bool,
    pub feedback: Option<Feedback>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_question_defaults() {
        let json = r#"{"question": "Q?", "choices": ["A. x"], "answer": "A"}"#;
        let raw: RawQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(raw.explanation, "");
        assert!(raw.question_type.is_none());
    }

    #[test]
    fn test_raw_question_type_field_name() {
        let json = r#"{"question": "Q?", "choices": [], "answer": "AC",
            "explanation": "because", "questionType": "multiple"}"#;
        let raw: RawQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(raw.question_type.as_deref(), Some("multiple"));
        assert_eq!(raw.explanation, "because");
    }

    #[test]
    fn test_raw_question_missing_answer_is_rejected() {
        let json = r#"{"question": "Q?", "choices": []}"#;
        assert!(serde_json::from_str::<RawQuestion>(json).is_err());
    }

    #[test]
    fn test_bank_entry_field_names() {
        let json = r#"[{"fileName": "bank_1.json", "test_name": "Bank 1"}]"#;
        let entries: Vec<BankEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].file_name, "bank_1.json");
        assert_eq!(entries[0].test_name, "Bank 1");
    }

    #[test]
    fn test_question_type_from_tag() {
        assert_eq!(QuestionType::from_tag(None), QuestionType::Single);
        assert_eq!(QuestionType::from_tag(Some("single")), QuestionType::Single);
        assert_eq!(QuestionType::from_tag(Some("multiple")), QuestionType::Multiple);
        assert_eq!(QuestionType::from_tag(Some("true_false")), QuestionType::TrueFalse);
        assert_eq!(QuestionType::from_tag(Some("essay")), QuestionType::Single);
    }

    #[test]
    fn test_score_display() {
        let score = Score::from_counts(1, 2);
        assert_eq!(score.earned, 10);
        assert_eq!(score.possible, 20);
        assert_eq!(score.to_string(), "10 / 20");
    }
}
