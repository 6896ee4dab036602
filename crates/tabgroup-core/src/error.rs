//! Error types for tabgroup operations.
//!
//! Validation failures are surfaced to the caller. Failures of optional
//! collaborators are modeled separately as [`CapabilityError`] and are
//! absorbed at the call site.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors raised by similarity and clustering routines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Input that can never be processed, such as zero-length vectors.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Two vectors that must share a dimension do not.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A clustering parameter is outside its valid range.
    #[error("Invalid parameter {name}: {message}")]
    InvalidParameter {
        name: &'static str,
        message: &'static str,
    },
}

impl CoreError {
    /// Whether this error was caused by caller-supplied input.
    ///
    /// Every core error is a validation error, so this is always true. It
    /// exists so wrapping error types can answer the same question.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidInput(_)
                | CoreError::DimensionMismatch { .. }
                | CoreError::InvalidParameter { .. }
        )
    }
}

/// Failure of an optional external capability (text analysis, theme naming).
///
/// Never propagated out of `generate` or `group`; callers log it and fall
/// back to deterministic behavior.
#[derive(Debug, Clone, Error)]
pub enum CapabilityError {
    #[error("Capability unavailable: {0}")]
    Unavailable(String),

    #[error("Capability timed out after {0} ms")]
    Timeout(u64),

    #[error("Capability returned an unusable response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CoreError::DimensionMismatch {
            expected: 384,
            found: 3,
        };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 384, found 3");

        let err = CoreError::InvalidParameter {
            name: "epsilon",
            message: "must be positive",
        };
        assert!(err.to_string().contains("epsilon"));
    }

    #[test]
    fn test_all_core_errors_are_input_errors() {
        assert!(CoreError::InvalidInput("x".into()).is_invalid_input());
        assert!(CoreError::DimensionMismatch { expected: 1, found: 2 }.is_invalid_input());
    }
}
