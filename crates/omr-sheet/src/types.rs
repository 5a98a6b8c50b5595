use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Invalid request: {0}")]
    Validation(ValidationErrors),
    #[error("Invalid layout: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, SheetError>;

/// Fewest questions a sheet may carry; long sheets paginate instead of capping
pub const MIN_QUESTIONS: usize = 1;

/// Bounds on bubbles per question (the alphabets have six letters)
pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 6;

/// A problem with one request field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Missing,
    Parse,
    Range,
}

impl FieldErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            FieldErrorKind::Missing => "missing",
            FieldErrorKind::Parse => "parse_error",
            FieldErrorKind::Range => "out_of_range",
        }
    }
}

impl FieldError {
    pub fn missing(field: &'static str) -> Self {
        Self {
            field,
            kind: FieldErrorKind::Missing,
            message: "Field required".to_string(),
        }
    }

    pub fn parse(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            kind: FieldErrorKind::Parse,
            message: message.into(),
        }
    }

    pub fn range(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            kind: FieldErrorKind::Range,
            message: message.into(),
        }
    }
}

/// Every field problem found in one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|e| e.field)
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(SheetError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// What a caller asks to be printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRequest {
    pub institute_name: String,
    pub total_questions: usize,
    pub options_per_question: usize,
    pub use_bangla: bool,
}

impl SheetRequest {
    pub fn new(
        institute_name: impl Into<String>,
        total_questions: usize,
        options_per_question: usize,
        use_bangla: bool,
    ) -> Self {
        Self {
            institute_name: institute_name.into(),
            total_questions,
            options_per_question,
            use_bangla,
        }
    }

    /// Collect range violations without failing fast
    pub fn violations(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        if self.total_questions < MIN_QUESTIONS {
            errors.push(FieldError::range(
                "total_questions",
                format!("Input should be greater than or equal to {}", MIN_QUESTIONS),
            ));
        }

        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&self.options_per_question) {
            errors.push(FieldError::range(
                "options_per_question",
                format!(
                    "Input should be between {} and {}",
                    MIN_OPTIONS, MAX_OPTIONS
                ),
            ));
        }

        errors
    }

    pub fn validate(&self) -> Result<()> {
        self.violations().into_result()
    }
}
