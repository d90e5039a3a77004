//! Common result and error types for satnet.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates a broken store invariant (a bug in satnet or in a caller
/// that bypassed validation), not a user-facing problem. User problems are
/// reported through the diagnostic sink.
pub type SatnetResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug, not a netlist problem.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("wire 7 has no width");
        assert_eq!(format!("{err}"), "internal error: wire 7 has no width");
    }

    #[test]
    fn err_path() {
        let r: SatnetResult<i32> = Err(InternalError::new("test error"));
        assert_eq!(r.unwrap_err().message, "test error");
    }

    #[test]
    fn from_string() {
        let err: InternalError = "from string".to_string().into();
        assert_eq!(err.message, "from string");
    }
}
