//! Runtime configuration for validation and approximate comparisons.
//!
//! A process-wide default configuration is created lazily on first access.
//! Decorators that need different settings hold their own instance built with
//! [`ValidationConfigBuilder`].

use crate::types::Scalar;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Settings consulted by the validation decorator and the group algebra.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationConfig {
    /// Whether arguments are checked before an operation runs.
    pub check_inputs: bool,
    /// Whether results are checked after an operation runs.
    pub check_outputs: bool,
    /// Tolerance for approximate comparisons.
    ///
    /// `None` selects the scalar type's `DEFAULT_TOLERANCE`.
    pub approx_tolerance: Option<f64>,
}

impl ValidationConfig {
    /// Returns the tolerance for approximate comparisons in scalar type `T`.
    pub fn approx_tolerance<T: Scalar>(&self) -> T {
        self.approx_tolerance
            .and_then(T::try_from_f64)
            .unwrap_or(T::DEFAULT_TOLERANCE)
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_inputs: true,
            check_outputs: true,
            approx_tolerance: None,
        }
    }
}

/// Global validation configuration.
pub static VALIDATION_CONFIG: Lazy<Arc<ValidationConfig>> =
    Lazy::new(|| Arc::new(ValidationConfig::default()));

/// Get the global validation configuration.
pub fn validation_config() -> &'static ValidationConfig {
    &VALIDATION_CONFIG
}

/// Builder for creating a custom validation configuration.
pub struct ValidationConfigBuilder {
    config: ValidationConfig,
}

impl ValidationConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ValidationConfig::default(),
        }
    }

    /// Enable or disable input checks.
    pub fn check_inputs(mut self, enabled: bool) -> Self {
        self.config.check_inputs = enabled;
        self
    }

    /// Enable or disable output checks.
    pub fn check_outputs(mut self, enabled: bool) -> Self {
        self.config.check_outputs = enabled;
        self
    }

    /// Set the tolerance for approximate comparisons.
    pub fn approx_tolerance(mut self, tolerance: f64) -> Self {
        self.config.approx_tolerance = Some(tolerance);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ValidationConfig {
        self.config
    }
}

impl Default for ValidationConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
