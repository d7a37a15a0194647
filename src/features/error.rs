use thiserror::Error;

/// Input rejected by a feature before anything is persisted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("Please enter {0}")]
    EmptyField(&'static str),
    #[error("No {kind} matches '{key}'")]
    NotFound { kind: &'static str, key: String },
    #[error("Amount must be a non-negative number, got {0}")]
    InvalidAmount(f64),
    #[error("Daily goal must be at least 1")]
    InvalidGoal,
    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid weekday '{0}'")]
    InvalidWeekday(String),
    #[error("Unexpected '{0}' in expression")]
    InvalidExpression(String),
}

impl FeatureError {
    pub fn not_found(kind: &'static str, key: &str) -> Self {
        FeatureError::NotFound {
            kind,
            key: key.to_string(),
        }
    }
}

/// Trim user input, rejecting it when nothing is left.
pub fn required(value: &str, what: &'static str) -> Result<String, FeatureError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FeatureError::EmptyField(what))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Trim optional user input; blank becomes `None`.
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
