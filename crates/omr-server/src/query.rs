//! Query-string parsing for `GET /generate-omr`
//!
//! Every field arrives as text so that a bad value becomes a field-level
//! validation error instead of a generic extractor rejection.

use omr_sheet::{FieldError, MIN_OPTIONS, MIN_QUESTIONS, SheetRequest, ValidationErrors};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct GenerateOmrQuery {
    pub institute_name: Option<String>,
    pub total_questions: Option<String>,
    pub options_per_question: Option<String>,
    pub use_bangla: Option<String>,
}

impl GenerateOmrQuery {
    /// Parse and range-check every field, reporting all problems at once
    pub fn into_request(self) -> Result<SheetRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let institute_name = match self.institute_name {
            Some(name) => Some(name),
            None => {
                errors.push(FieldError::missing("institute_name"));
                None
            }
        };
        let total_questions = parse_count("total_questions", self.total_questions, &mut errors);
        let options_per_question =
            parse_count("options_per_question", self.options_per_question, &mut errors);
        let use_bangla = match self.use_bangla {
            Some(raw) => parse_flag("use_bangla", &raw, &mut errors),
            None => false,
        };

        // Unparsed fields borrow in-range placeholders so only real values
        // are range-checked.
        let request = SheetRequest::new(
            institute_name.unwrap_or_default(),
            total_questions.unwrap_or(MIN_QUESTIONS),
            options_per_question.unwrap_or(MIN_OPTIONS),
            use_bangla,
        );
        for violation in request.violations().0 {
            errors.push(violation);
        }

        if errors.is_empty() {
            Ok(request)
        } else {
            Err(errors)
        }
    }
}

/// Integers parse as i64 first; anything below zero clamps to zero so the
/// range check reports it.
fn parse_count(
    field: &'static str,
    raw: Option<String>,
    errors: &mut ValidationErrors,
) -> Option<usize> {
    let Some(raw) = raw else {
        errors.push(FieldError::missing(field));
        return None;
    };

    match raw.trim().parse::<i64>() {
        Ok(value) => Some(usize::try_from(value).unwrap_or(0)),
        Err(_) => {
            errors.push(FieldError::parse(
                field,
                "Input should be a valid integer",
            ));
            None
        }
    }
}

fn parse_flag(field: &'static str, raw: &str, errors: &mut ValidationErrors) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "y" | "t" => true,
        "false" | "0" | "no" | "off" | "n" | "f" => false,
        _ => {
            errors.push(FieldError::parse(
                field,
                "Input should be a valid boolean",
            ));
            false
        }
    }
}
