//! Graph interface for indexed manifolds.
//!
//! The graph manifold only needs the number of vertices and edges and the
//! edge list. [`GraphStructure`] captures that; [`SimpleGraph`] is a small
//! validated adjacency list, and with the `petgraph` feature any
//! `petgraph::Graph` can be used directly.

use riemannkit_core::error::{ManifoldError, Result};
use std::fmt::Debug;

/// An edge with its weight. Unweighted graphs report weight 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge {
    /// Source vertex
    pub source: usize,
    /// Target vertex
    pub target: usize,
    /// Edge weight
    pub weight: f64,
}

/// Read-only view of a graph.
pub trait GraphStructure: Debug + Send + Sync {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of edges.
    fn edge_count(&self) -> usize;

    /// Returns true for directed graphs.
    fn is_directed(&self) -> bool;

    /// Returns true if the edges carry weights.
    fn is_weighted(&self) -> bool;

    /// Edges in canonical order.
    ///
    /// The position of an edge in this list is its index in edge mode.
    fn edges(&self) -> Vec<WeightedEdge>;

    /// Weight of the first edge from `source` to `target`.
    ///
    /// For undirected graphs the edge may be stored in either orientation.
    fn edge_weight(&self, source: usize, target: usize) -> Option<f64> {
        let directed = self.is_directed();
        self.edges()
            .into_iter()
            .find(|e| {
                (e.source == source && e.target == target)
                    || (!directed && e.source == target && e.target == source)
            })
            .map(|e| e.weight)
    }
}

/// A validated edge-list graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleGraph {
    vertices: usize,
    edges: Vec<(usize, usize)>,
    weights: Option<Vec<f64>>,
    directed: bool,
}

impl SimpleGraph {
    /// Creates an undirected graph.
    ///
    /// # Errors
    /// Returns a Domain error if an edge references a missing vertex.
    pub fn undirected(vertices: usize, edges: Vec<(usize, usize)>) -> Result<Self> {
        Self::build(vertices, edges, false)
    }

    /// Creates a directed graph.
    ///
    /// # Errors
    /// Returns a Domain error if an edge references a missing vertex.
    pub fn directed(vertices: usize, edges: Vec<(usize, usize)>) -> Result<Self> {
        Self::build(vertices, edges, true)
    }

    /// The path 0 - 1 - ... - (n-1).
    pub fn path(vertices: usize, directed: bool) -> Self {
        let edges = (1..vertices).map(|i| (i - 1, i)).collect();
        Self {
            vertices,
            edges,
            weights: None,
            directed,
        }
    }

    fn build(vertices: usize, edges: Vec<(usize, usize)>, directed: bool) -> Result<Self> {
        if let Some(&(u, w)) = edges.iter().find(|&&(u, w)| u >= vertices || w >= vertices) {
            return Err(ManifoldError::domain(
                "graph",
                format!("edge ({u}, {w}) references a vertex outside 0..{vertices}"),
            ));
        }
        Ok(Self {
            vertices,
            edges,
            weights: None,
            directed,
        })
    }

    /// Attaches one weight per edge.
    ///
    /// # Errors
    /// Returns a DimensionMismatch if the counts differ, or a Domain error
    /// for a non-finite weight.
    pub fn with_weights(mut self, weights: Vec<f64>) -> Result<Self> {
        if weights.len() != self.edges.len() {
            return Err(ManifoldError::dimension_mismatch(
                format!("{} weights", self.edges.len()),
                format!("{} weights", weights.len()),
            ));
        }
        if let Some((i, w)) = weights.iter().enumerate().find(|(_, w)| !w.is_finite()) {
            return Err(ManifoldError::domain("graph", format!("weight of edge {i} is {w}")));
        }
        self.weights = Some(weights);
        Ok(self)
    }
}

impl GraphStructure for SimpleGraph {
    fn vertex_count(&self) -> usize {
        self.vertices
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    fn edges(&self) -> Vec<WeightedEdge> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, &(source, target))| WeightedEdge {
                source,
                target,
                weight: self.weights.as_ref().map_or(1.0, |w| w[i]),
            })
            .collect()
    }
}

#[cfg(feature = "petgraph")]
mod petgraph_support {
    use super::{GraphStructure, WeightedEdge};
    use petgraph::graph::{Graph, IndexType};
    use petgraph::visit::EdgeRef;
    use petgraph::EdgeType;
    use std::fmt::Debug;

    /// Edge payloads usable as weights.
    pub trait EdgeWeight {
        /// Whether the payload carries a weight.
        const WEIGHTED: bool;

        /// Numeric weight of the edge.
        fn weight(&self) -> f64;
    }

    impl EdgeWeight for () {
        const WEIGHTED: bool = false;

        fn weight(&self) -> f64 {
            1.0
        }
    }

    impl EdgeWeight for f64 {
        const WEIGHTED: bool = true;

        fn weight(&self) -> f64 {
            *self
        }
    }

    impl EdgeWeight for f32 {
        const WEIGHTED: bool = true;

        fn weight(&self) -> f64 {
            f64::from(*self)
        }
    }

    impl<N, E, Ty, Ix> GraphStructure for Graph<N, E, Ty, Ix>
    where
        N: Debug + Send + Sync,
        E: EdgeWeight + Debug + Send + Sync,
        Ty: EdgeType + Send + Sync,
        Ix: IndexType + Send + Sync,
    {
        fn vertex_count(&self) -> usize {
            self.node_count()
        }

        fn edge_count(&self) -> usize {
            Graph::edge_count(self)
        }

        fn is_directed(&self) -> bool {
            Graph::is_directed(self)
        }

        fn is_weighted(&self) -> bool {
            E::WEIGHTED
        }

        fn edges(&self) -> Vec<WeightedEdge> {
            self.edge_references()
                .map(|e| WeightedEdge {
                    source: e.source().index(),
                    target: e.target().index(),
                    weight: e.weight().weight(),
                })
                .collect()
        }
    }
}

#[cfg(feature = "petgraph")]
pub use petgraph_support::EdgeWeight;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_graph() {
        let g = SimpleGraph::path(3, false);
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert!(!g.is_weighted());
        assert_eq!(g.edge_weight(1, 0), Some(1.0));
        assert_eq!(g.edge_weight(0, 2), None);
    }

    #[test]
    fn test_directed_edge_weight_is_oriented() {
        let g = SimpleGraph::directed(3, vec![(0, 1), (1, 2)]).unwrap();
        assert_eq!(g.edge_weight(0, 1), Some(1.0));
        assert_eq!(g.edge_weight(1, 0), None);
    }

    #[test]
    fn test_validation() {
        assert!(SimpleGraph::undirected(2, vec![(0, 2)]).unwrap_err().is_domain_error());

        let g = SimpleGraph::path(3, false);
        assert!(matches!(
            g.clone().with_weights(vec![1.0]),
            Err(ManifoldError::DimensionMismatch { .. })
        ));
        assert!(g.clone().with_weights(vec![1.0, f64::NAN]).is_err());

        let weighted = g.with_weights(vec![1.5, 0.5]).unwrap();
        assert!(weighted.is_weighted());
        assert_eq!(weighted.edges()[1].weight, 0.5);
    }

    #[cfg(feature = "petgraph")]
    #[test]
    fn test_petgraph_adapter() {
        let mut g = petgraph::Graph::<(), f64>::new();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        g.add_edge(a, b, 2.0);
        g.add_edge(b, c, 3.0);

        assert_eq!(GraphStructure::vertex_count(&g), 3);
        assert_eq!(GraphStructure::edge_count(&g), 2);
        assert!(GraphStructure::is_directed(&g));
        assert!(GraphStructure::is_weighted(&g));
        assert_eq!(GraphStructure::edge_weight(&g, 1, 2), Some(3.0));

        let undirected = petgraph::Graph::<(), (), petgraph::Undirected>::from_edges([(0u32, 1u32)]);
        assert!(!GraphStructure::is_weighted(&undirected));
        assert_eq!(GraphStructure::edges(&undirected)[0].weight, 1.0);
    }
}
