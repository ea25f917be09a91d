//! Error types for Adquirir operations.
//!
//! Configuration errors are fatal and surface from constructors; per-round
//! anomalies (unknown clustering modes, backend failures) are absorbed with a
//! policy fallback so a long-running acquisition campaign never crashes
//! mid-round.

use std::fmt;

/// Main error type for Adquirir operations.
///
/// # Examples
///
/// ```
/// use adquirir::error::AdquirirError;
///
/// let err = AdquirirError::InvalidHyperparameter {
///     param: "epsilon".to_string(),
///     value: "1.5".to_string(),
///     constraint: "in [0, 1]".to_string(),
/// };
/// assert!(err.to_string().contains("epsilon"));
/// ```
#[derive(Debug)]
pub enum AdquirirError {
    /// Invalid hyperparameter value provided at configuration time.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Parallel inputs disagree in length or dimensionality.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// An input that must be non-empty was empty.
    EmptyInput {
        /// Which input was empty
        context: String,
    },

    /// The clustering backend reported a failure.
    Backend {
        /// Backend error description
        message: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for AdquirirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdquirirError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            AdquirirError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            AdquirirError::EmptyInput { context } => {
                write!(f, "Empty input: {context}")
            }
            AdquirirError::Backend { message } => {
                write!(f, "Clustering backend error: {message}")
            }
            AdquirirError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AdquirirError {}

impl From<&str> for AdquirirError {
    fn from(msg: &str) -> Self {
        AdquirirError::Other(msg.to_string())
    }
}

impl From<String> for AdquirirError {
    fn from(msg: String) -> Self {
        AdquirirError::Other(msg)
    }
}

impl AdquirirError {
    /// Create an invalid-hyperparameter error from displayable parts.
    #[must_use]
    pub fn invalid_hyperparameter(
        param: &str,
        value: impl fmt::Display,
        constraint: &str,
    ) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create a dimension mismatch error with descriptive context.
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, AdquirirError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_hyperparameter_display() {
        let err = AdquirirError::invalid_hyperparameter("epsilon", 1.5, "in [0, 1]");
        let msg = err.to_string();
        assert!(msg.contains("epsilon"));
        assert!(msg.contains("1.5"));
        assert!(msg.contains("[0, 1]"));
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = AdquirirError::dimension_mismatch("means", 100, 50);
        let msg = err.to_string();
        assert!(msg.contains("means=100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn test_empty_input_display() {
        let err = AdquirirError::EmptyInput {
            context: "batch_sizes".to_string(),
        };
        assert!(err.to_string().contains("batch_sizes"));
    }

    #[test]
    fn test_backend_display() {
        let err = AdquirirError::Backend {
            message: "kmeans diverged".to_string(),
        };
        assert!(err.to_string().contains("kmeans diverged"));
    }

    #[test]
    fn test_from_str() {
        let err: AdquirirError = "boom".into();
        assert!(matches!(err, AdquirirError::Other(_)));
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_from_string() {
        let err: AdquirirError = "boom".to_string().into();
        assert!(matches!(err, AdquirirError::Other(_)));
    }
}
