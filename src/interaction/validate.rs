use super::{FormInput, MAX_LEVEL, MAX_QUESTIONS, MIN_LEVEL, MIN_QUESTIONS};
use crate::error::ValidationError;

pub struct ValidSubmission<'a> {
    pub name: &'a str,
    pub topic: &'a str,
    pub level: u8,
    pub n_questions: u8,
}

/// Name, topic and level are required. Surrounding whitespace is dropped, so a
/// blank field counts as missing. Level and question count must sit in 1..=10.
pub fn validate(input: &FormInput) -> Result<ValidSubmission<'_>, ValidationError> {
    let name = input.name.trim();
    let topic = input.topic.trim();

    let mut missing = Vec::new();
    let mut out_of_range = Vec::new();
    if name.is_empty() {
        missing.push("name");
    }
    if topic.is_empty() {
        missing.push("topic");
    }
    match input.level {
        None => missing.push("level"),
        Some(level) if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) => out_of_range.push("level"),
        Some(_) => {}
    }
    if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&input.n_questions) {
        out_of_range.push("questions");
    }

    let Some(level) = input.level else {
        return Err(ValidationError {
            missing,
            out_of_range,
        });
    };
    if !missing.is_empty() || !out_of_range.is_empty() {
        return Err(ValidationError {
            missing,
            out_of_range,
        });
    }

    Ok(ValidSubmission {
        name,
        topic,
        level,
        n_questions: input.n_questions,
    })
}
