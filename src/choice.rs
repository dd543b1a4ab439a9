use crate::models::Choice;
use regex::Regex;

lazy_static::lazy_static! {
    // "A. Paris", "A Paris"; the text may span several lines
    static ref LETTERED_CHOICE: Regex = Regex::new(r"(?s)^([A-Z])\.?\s(.*)$").unwrap();
}

/// Extracts the identity and display text of a raw choice string.
///
/// `position` is the 0-based position the synthetic `Choice N` identity is
/// derived from when the string has neither a leading letter nor a
/// true/false value.
pub fn parse_choice(raw: &str, position: usize) -> Choice {
    if let Some(caps) = LETTERED_CHOICE.captures(raw) {
        return Choice {
            raw: raw.to_string(),
            letter: caps[1].to_string(),
            text: caps[2].to_string(),
        };
    }

    if raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("false") {
        return Choice {
            raw: raw.to_string(),
            letter: raw.to_string(),
            text: raw.to_string(),
        };
    }

    Choice {
        raw: raw.to_string(),
        letter: format!("Choice {}", position + 1),
        text: raw.to_string(),
    }
}

pub fn parse_choices(raw: &[String]) -> Vec<Choice> {
    raw.iter()
        .enumerate()
        .map(|(i, choice)| parse_choice(choice, i))
        .collect()
}
