//! RiemannKit Graphs - Power manifolds indexed by graphs.
//!
//! This crate provides:
//! - [`PowerManifold`]: the componentwise product `M^n` of a base manifold
//! - [`GraphStructure`] with the [`SimpleGraph`] implementation (and
//!   `petgraph::Graph` with the `petgraph` feature)
//! - [`GraphManifold`]: one component per vertex or edge of a graph, with
//!   [`NeighborAggregation`] of logarithms along the edges
//!
//! # Example
//!
//! ```rust,ignore
//! use riemannkit_graphs::prelude::*;
//! use riemannkit_manifolds::Sphere;
//!
//! let graph = SimpleGraph::path(3, false);
//! let signals = graph_manifold(Sphere::<f64>::new(3)?, graph, GraphManifoldType::Vertex);
//!
//! let x = signals.random_point()?;
//! let pull = signals.incident_log(&x)?;
//! ```

pub mod graph;
pub mod graph_manifold;
pub mod power;

pub use graph::{GraphStructure, SimpleGraph, WeightedEdge};
#[cfg(feature = "petgraph")]
pub use graph::EdgeWeight;
pub use graph_manifold::{
    graph_manifold, GraphDecorator, GraphLayer, GraphManifold, GraphManifoldType,
    NeighborAggregation,
};
pub use power::PowerManifold;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::graph::{GraphStructure, SimpleGraph, WeightedEdge};
    pub use crate::graph_manifold::{
        graph_manifold, GraphDecorator, GraphLayer, GraphManifold, GraphManifoldType,
        NeighborAggregation,
    };
    pub use crate::power::PowerManifold;
}
