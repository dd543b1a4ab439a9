//! Pure correctness computation. Nothing here is stored: the session calls
//! back into these functions whenever a verdict is needed, so results can
//! never drift from the recorded responses.

use crate::models::{Answer, Feedback, Question, QuestionType, Verdict};
use std::collections::BTreeSet;

const NONE_SELECTED: &str = "None";
const NO_EXPLANATION: &str = "No explanation provided.";

fn answer_letters(answer: &str) -> BTreeSet<char> {
    answer.trim().chars().filter(|c| !c.is_whitespace()).collect()
}

fn response_letters(response: &Answer) -> BTreeSet<char> {
    match response {
        Answer::Single(letter) => letter.chars().collect(),
        Answer::Multiple(letters) => letters.iter().flat_map(|l| l.chars()).collect(),
    }
}

pub fn check_answer(question: &Question, response: Option<&Answer>) -> Verdict {
    let response = match response {
        None => return Verdict::Unanswered,
        Some(Answer::Multiple(letters)) if letters.is_empty() => return Verdict::Unanswered,
        Some(response) => response,
    };

    let correct = match question.question_type {
        QuestionType::Multiple => response_letters(response) == answer_letters(&question.answer),
        QuestionType::Single | QuestionType::TrueFalse => match response {
            Answer::Single(letter) => letter == question.answer.trim(),
            Answer::Multiple(_) => false,
        },
    };

    if correct {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

/// Whether `letter` is one of the question's correct choices.
pub fn is_correct_choice(question: &Question, letter: &str) -> bool {
    match question.question_type {
        QuestionType::Multiple => {
            let mut chars = letter.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => answer_letters(&question.answer).contains(&c),
                _ => false,
            }
        }
        QuestionType::Single | QuestionType::TrueFalse => letter == question.answer.trim(),
    }
}

fn join_letters<I: IntoIterator<Item = String>>(letters: I) -> String {
    let joined = letters.into_iter().collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        NONE_SELECTED.to_string()
    } else {
        joined
    }
}

pub fn selected_string(response: Option<&Answer>) -> String {
    match response {
        None => NONE_SELECTED.to_string(),
        Some(Answer::Single(letter)) => letter.clone(),
        // BTreeSet iteration is already sorted
        Some(Answer::Multiple(letters)) => join_letters(letters.iter().cloned()),
    }
}

pub fn correct_string(question: &Question) -> String {
    match question.question_type {
        QuestionType::Multiple => {
            join_letters(answer_letters(&question.answer).into_iter().map(String::from))
        }
        QuestionType::Single | QuestionType::TrueFalse => question.answer.trim().to_string(),
    }
}

pub fn feedback(question: &Question, response: Option<&Answer>) -> Feedback {
    let explanation = if question.explanation.trim().is_empty() {
        NO_EXPLANATION.to_string()
    } else {
        question.explanation.clone()
    };

    Feedback {
        verdict: check_answer(question, response),
        selected: selected_string(response),
        correct: correct_string(question),
        explanation,
    }
}
