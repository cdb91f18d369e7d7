//! Error types for manifold operations.
//!
//! Every fallible operation in the workspace returns [`ManifoldError`]. Two
//! variants carry the contract of the capability interface:
//!
//! - [`ManifoldError::Domain`] is raised when a value fails a structural or
//!   geometric validity check (wrong length, not orthogonal, ...).
//! - [`ManifoldError::NotImplemented`] is raised when no layer of a decorator
//!   chain implements an operation. It is a configuration error and is
//!   propagated unchanged.

use std::fmt::Display;
use thiserror::Error;

/// Errors that can occur during manifold operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifoldError {
    /// A value failed a structural or geometric validity check.
    #[error("Domain error in {context}: {reason}")]
    Domain {
        /// Where the check failed (operation, component, ...)
        context: String,
        /// Description of why the value is invalid
        reason: String,
    },

    /// No layer of the manifold implements the operation.
    #[error("Operation `{operation}` is not implemented for {manifold}")]
    NotImplemented {
        /// Name of the missing operation
        operation: String,
        /// Name of the manifold that was reached last
        manifold: String,
    },

    /// Dimension mismatch between values.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// Numerical instability detected.
    ///
    /// This error occurs when numerical operations become unstable,
    /// such as a singular system or a non-unique logarithm.
    #[error("Numerical instability detected: {reason}")]
    NumericalError {
        /// Description of the numerical issue
        reason: String,
    },
}

impl ManifoldError {
    /// Create a Domain error.
    pub fn domain<C: Display, R: Display>(context: C, reason: R) -> Self {
        Self::Domain {
            context: context.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a Domain error for an invalid point.
    pub fn invalid_point<S: Into<String>>(reason: S) -> Self {
        Self::Domain {
            context: "point".to_string(),
            reason: reason.into(),
        }
    }

    /// Create a Domain error for an invalid tangent vector.
    pub fn invalid_tangent<S: Into<String>>(reason: S) -> Self {
        Self::Domain {
            context: "tangent vector".to_string(),
            reason: reason.into(),
        }
    }

    /// Create a NotImplemented error for an operation on a manifold.
    pub fn not_implemented<O: Display, M: Display>(operation: O, manifold: M) -> Self {
        Self::NotImplemented {
            operation: operation.to_string(),
            manifold: manifold.to_string(),
        }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: Display,
        S2: Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a NumericalError with a custom reason.
    pub fn numerical_error<S: Into<String>>(reason: S) -> Self {
        Self::NumericalError {
            reason: reason.into(),
        }
    }

    /// Returns true for validity failures.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }

    /// Returns true when an operation had no implementation.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented { .. })
    }

    /// Prefixes the context of a Domain error.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn in_context<C: Display>(self, outer: C) -> Self {
        match self {
            Self::Domain { context, reason } => Self::Domain {
                context: format!("{outer}: {context}"),
                reason,
            },
            other => other,
        }
    }
}

/// Result type alias for manifold operations.
pub type Result<T> = std::result::Result<T, ManifoldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ManifoldError::invalid_point("determinant is negative");
        assert!(err.is_domain_error());
        assert_eq!(
            err.to_string(),
            "Domain error in point: determinant is negative"
        );

        let err = ManifoldError::dimension_mismatch("(3, 3)", "(4, 4)");
        assert!(matches!(err, ManifoldError::DimensionMismatch { .. }));
        assert_eq!(
            err.to_string(),
            "Dimension mismatch: expected (3, 3), got (4, 4)"
        );
    }

    #[test]
    fn test_not_implemented_display() {
        let err = ManifoldError::not_implemented("exp", "Rotations");
        assert!(err.is_not_implemented());
        assert!(!err.is_domain_error());
        assert_eq!(
            err.to_string(),
            "Operation `exp` is not implemented for Rotations"
        );
    }

    #[test]
    fn test_in_context() {
        let err = ManifoldError::invalid_tangent("not orthogonal to point").in_context("component 2");
        assert_eq!(
            err,
            ManifoldError::domain("component 2: tangent vector", "not orthogonal to point")
        );

        let untouched = ManifoldError::numerical_error("singular").in_context("component 0");
        assert_eq!(untouched, ManifoldError::numerical_error("singular"));
    }

    #[test]
    fn test_error_display() {
        let errors = vec![
            ManifoldError::invalid_point("not unit norm"),
            ManifoldError::invalid_tangent("not orthogonal to point"),
            ManifoldError::dimension_mismatch("square matrix", "rectangular matrix"),
            ManifoldError::numerical_error("eigenvalue computation failed"),
            ManifoldError::not_implemented("parallel transport", "Sphere"),
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}
