//! Structured error types for coursegrid.
//!
//! The layout engine itself never fails; these errors surface only at the
//! input boundary (time-code validation, JSON decoding, config files).

/// All errors that can occur while decoding inputs for a timetable render.
#[derive(Debug, thiserror::Error)]
pub enum CourseGridError {
    /// Input of the wrong shape, e.g. a time-slot field that is not a string.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// JSON decoding or encoding error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (CLI and config loading only).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CourseGridError>;

impl From<String> for CourseGridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for CourseGridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<CourseGridError> for wasm_bindgen::JsValue {
    fn from(e: CourseGridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CourseGridError::Validation("time slot must be a string".into());
        assert_eq!(
            err.to_string(),
            "Validation failed: time slot must be a string"
        );

        let err: CourseGridError = "boom".into();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_json_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CourseGridError = parse_err.into();
        assert!(matches!(err, CourseGridError::Json(_)));
        assert!(err.to_string().starts_with("JSON: "));
    }
}
