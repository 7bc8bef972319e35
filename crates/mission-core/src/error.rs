//! Error types for the core library.
//!
//! Parsing, classification and rendering never fail. Errors only come from
//! loading settings and from the plan store.

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by settings loading and the plan store
#[derive(Error, Debug)]
pub enum CoreError {
    /// No plan with this id exists
    #[error("Lesson plan not found: {id}")]
    PlanNotFound { id: String },

    /// A plan record could not be decoded
    #[error("Invalid plan record: {reason}")]
    InvalidRecord { reason: String },

    /// Wizard input failed validation
    #[error("Invalid lesson plan request: {0}")]
    InvalidRequest(#[from] mission_ast::InvalidRequest),

    /// Direction string is not one of the four known values
    #[error(transparent)]
    UnknownDirection(#[from] mission_ast::UnknownDirection),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CoreError {
    /// Create a plan not found error
    pub fn plan_not_found(id: impl Into<String>) -> Self {
        Self::PlanNotFound { id: id.into() }
    }

    /// Create an invalid record error
    pub fn invalid_record(reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            reason: reason.into(),
        }
    }

    /// Check whether this error reports a missing plan
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PlanNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::plan_not_found("k57abc");
        assert!(err.to_string().contains("k57abc"));
        assert!(err.is_not_found());

        let err = CoreError::invalid_record("missing title");
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("missing title"));
    }

    #[test]
    fn test_invalid_request_converts() {
        let err: CoreError = mission_ast::NewLessonPlan::default()
            .validate()
            .unwrap_err()
            .into();
        assert!(matches!(err, CoreError::InvalidRequest(_)));
        assert!(err.to_string().contains("'title'"));
    }

    #[test]
    fn test_unknown_direction_converts() {
        let err: CoreError = "sideways"
            .parse::<mission_ast::Direction>()
            .unwrap_err()
            .into();
        assert!(err.to_string().contains("sideways"));
    }
}
