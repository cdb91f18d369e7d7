//! Core traits and types for composable Riemannian manifolds.
//!
//! This crate provides the capability interface shared by every manifold and
//! the decorator engine used to add structure to an existing manifold without
//! reimplementing it.
//!
//! # Key Concepts
//!
//! - **Manifolds**: spaces with exponential/logarithmic maps, retractions,
//!   inner products and vector transport
//! - **Decorators**: wrappers that override, conditionally replace or
//!   transparently forward each operation of the manifold they wrap
//! - **Representations**: the linear structure of the arrays holding points
//!   and tangent vectors
//!
//! # Modules
//!
//! - [`config`]: Global validation configuration
//! - [`decorator`]: Decorator composition engine
//! - [`decorators`]: Validation and metric decorators
//! - [`error`]: Error types for manifold operations
//! - [`manifold`]: Core manifold trait and associated types
//! - [`representation`]: Linear structure of value types
//! - [`types`]: Scalar trait, type aliases and numerical constants

pub mod config;
pub mod decorator;
pub mod decorators;
pub mod error;
pub mod manifold;
pub mod representation;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_manifolds;

// Re-export commonly used items at the crate root
pub use decorator::{Decorator, DecoratorManifold, Operation, Resolution, Route};
pub use error::{ManifoldError, Result};
pub use manifold::{Manifold, RetractionMethod, VectorTransportMethod};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use riemannkit_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{validation_config, ValidationConfig, ValidationConfigBuilder};
    pub use crate::decorator::{
        BasePoint, BaseTangent, Decorator, DecoratorManifold, Operation, Resolution, Route,
    };
    pub use crate::decorators::{
        EuclideanMetric, Metric, MetricDecorator, MetricManifold, ScaledMetric,
        ValidationDecorator, ValidationManifold,
    };
    pub use crate::error::{ManifoldError, Result};
    pub use crate::manifold::{Manifold, RetractionMethod, VectorTransportMethod};
    pub use crate::representation::LinearRepresentation;
    pub use crate::types::{constants, DMatrix, DVector, Scalar};
}
