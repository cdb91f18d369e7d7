//! # RiemannKit
//!
//! Composable Riemannian manifolds for Rust.
//!
//! A manifold exposes a capability interface ([`Manifold`]): exponential and
//! logarithmic maps, retractions, inner products, vector transport. New
//! manifolds are obtained by decorating existing ones instead of
//! reimplementing their geometry:
//!
//! - [`ValidationManifold`] checks inputs and outputs of every operation
//! - [`MetricManifold`] swaps the Riemannian metric
//! - [`GroupManifold`] adds a Lie group operation
//! - [`GraphManifold`] indexes a power manifold by a graph
//!
//! Decorators stack: each layer handles the operations it overrides and
//! hands the rest to the layer below.
//!
//! ## Crates
//!
//! - `riemannkit-core`: capability interface, decorator engine, errors, configuration
//! - `riemannkit-manifolds`: Euclidean space, spheres, rotation groups
//! - `riemannkit-groups`: group operations, identity element, Lie group algebra
//! - `riemannkit-graphs`: power manifolds, graphs, neighbor aggregation
//!
//! ## Example
//!
//! ```rust
//! use riemannkit::prelude::*;
//!
//! let so3 = special_orthogonal::<f64>(3)?;
//! let x = so3.random_point()?;
//! let inv = so3.inverse(&GroupElement::Point(x.clone()))?;
//! let product = so3.compose(&GroupElement::Point(x), &inv)?;
//! assert!(so3.is_identity(&product)?);
//! # Ok::<(), riemannkit::ManifoldError>(())
//! ```

pub use nalgebra;
pub use riemannkit_graphs as graphs;
pub use riemannkit_groups as groups;
pub use riemannkit_manifolds as manifolds;

pub use riemannkit_core::decorators::{MetricManifold, ValidationManifold};
pub use riemannkit_core::{DecoratorManifold, Manifold, ManifoldError, Result};
pub use riemannkit_graphs::{GraphManifold, PowerManifold};
pub use riemannkit_groups::{GroupManifold, LieGroup};

/// Prelude module for convenient imports
pub mod prelude {
    pub use riemannkit_core::prelude::*;
    pub use riemannkit_graphs::prelude::*;
    pub use riemannkit_groups::prelude::*;
    pub use riemannkit_manifolds::{Euclidean, Rotations, Sphere};
}
