//! Manifold-valued signals on graphs.
//!
//! A graph manifold assigns one point of a base manifold to every vertex
//! (or every edge) of a graph. Geometrically it is the power manifold
//! `M^|V|` (or `M^|E|`); the decorator adds the graph itself, checks the
//! number of components against it and provides neighbor aggregation.
//!
//! Aggregation resolves through [`GraphLayer`], so it stays available when
//! further decorators are stacked on the graph manifold.

use crate::graph::GraphStructure;
use crate::power::PowerManifold;
use riemannkit_core::{
    decorator::{BasePoint, BaseTangent, Decorator, DecoratorManifold, Operation, Resolution},
    decorators::{Metric, MetricDecorator, ValidationDecorator},
    error::{ManifoldError, Result},
    manifold::Manifold,
    representation::LinearRepresentation,
    types::Scalar,
};
use std::fmt;
use std::sync::Arc;

/// Which elements of the graph index the components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphManifoldType {
    /// One component per vertex
    #[default]
    Vertex,
    /// One component per edge
    Edge,
}

impl fmt::Display for GraphManifoldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("Vertex"),
            Self::Edge => f.write_str("Edge"),
        }
    }
}

/// Decorator attaching a graph to a power manifold.
pub struct GraphDecorator<T, M, G> {
    power: PowerManifold<T, M>,
    graph: Arc<G>,
    kind: GraphManifoldType,
    name: String,
}

/// A power manifold indexed by the vertices or edges of a graph.
pub type GraphManifold<T, M, G> = DecoratorManifold<GraphDecorator<T, M, G>>;

impl<T: Scalar, M: Manifold<T>, G: GraphStructure> GraphDecorator<T, M, G> {
    /// Attaches `graph` to the power of `base` sized by the index domain.
    pub fn new(base: M, graph: G, kind: GraphManifoldType) -> Self {
        Self::from_shared(Arc::new(base), Arc::new(graph), kind)
    }

    /// Same as [`GraphDecorator::new`] with shared base and graph.
    pub fn from_shared(base: Arc<M>, graph: Arc<G>, kind: GraphManifoldType) -> Self {
        let size = match kind {
            GraphManifoldType::Vertex => graph.vertex_count(),
            GraphManifoldType::Edge => graph.edge_count(),
        };
        let name = format!("GraphManifold({}, {kind}, {size})", base.name());
        Self {
            power: PowerManifold::from_shared(base, size),
            graph,
            kind,
            name,
        }
    }

    /// Returns the graph.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Returns the indexing mode.
    pub fn kind(&self) -> GraphManifoldType {
        self.kind
    }

    /// Number of components: the vertex or edge count of the graph.
    pub fn domain_size(&self) -> usize {
        self.power.size()
    }

    fn check_domain(&self, len: usize, context: &str) -> Result<()> {
        let expected = self.domain_size();
        if len == expected {
            Ok(())
        } else {
            let unit = match self.kind {
                GraphManifoldType::Vertex => "vertices",
                GraphManifoldType::Edge => "edges",
            };
            Err(ManifoldError::domain(
                context,
                format!("graph has {expected} {unit}, got {len} components"),
            ))
        }
    }
}

impl<T, M, G> Clone for GraphDecorator<T, M, G> {
    fn clone(&self) -> Self {
        Self {
            power: self.power.clone(),
            graph: Arc::clone(&self.graph),
            kind: self.kind,
            name: self.name.clone(),
        }
    }
}

impl<T, M: fmt::Debug, G: fmt::Debug> fmt::Debug for GraphDecorator<T, M, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphDecorator")
            .field("power", &self.power)
            .field("graph", &self.graph)
            .field("kind", &self.kind)
            .finish()
    }
}

impl<T: Scalar, M: Manifold<T>, G: GraphStructure> Decorator<T> for GraphDecorator<T, M, G> {
    type Base = PowerManifold<T, M>;

    fn base(&self) -> &PowerManifold<T, M> {
        &self.power
    }

    fn decorator_name(&self) -> &str {
        &self.name
    }

    fn resolution(op: Operation) -> Resolution {
        match op {
            Operation::CheckPoint | Operation::CheckVector => Resolution::Override,
            _ => Resolution::Transparent,
        }
    }

    fn check_point(&self, point: &BasePoint<T, Self>) -> Result<()> {
        self.check_domain(point.len(), "point")?;
        self.power.check_power_point(point)
    }

    fn check_vector(&self, point: &BasePoint<T, Self>, vector: &BaseTangent<T, Self>) -> Result<()> {
        self.check_domain(point.len(), "point")?;
        self.check_domain(vector.len(), "tangent vector")?;
        self.power.check_power_vector(point, vector)
    }
}

/// Creates the graph manifold of `base` over `graph`.
pub fn graph_manifold<T, M, G>(base: M, graph: G, kind: GraphManifoldType) -> GraphManifold<T, M, G>
where
    T: Scalar,
    M: Manifold<T>,
    G: GraphStructure,
{
    GraphDecorator::new(base, graph, kind).into_manifold()
}

/// Aggregation of logarithms along graph edges.
pub trait NeighborAggregation<T: Scalar>: Manifold<T> {
    /// Sums the weighted logarithms towards the neighbors of each vertex.
    ///
    /// For every edge `(u, w)` with weight `a`, slot `u` receives
    /// `a · log(x[u], x[w])`; undirected edges also add
    /// `a · log(x[w], x[u])` to slot `w`.
    fn incident_log_into(&self, point: &Self::Point, result: &mut Self::TangentVector) -> Result<()>;

    /// Allocating version of [`NeighborAggregation::incident_log_into`].
    fn incident_log(&self, point: &Self::Point) -> Result<Self::TangentVector> {
        let mut result = self.zero_vector(point)?;
        self.incident_log_into(point, &mut result)?;
        Ok(result)
    }
}

/// A decorator that defines or forwards neighbor aggregation.
///
/// [`GraphDecorator`] defines it; the validation and metric decorators
/// forward it to their base, so a stack over a graph manifold still
/// aggregates.
pub trait GraphLayer<T: Scalar>: Decorator<T> {
    /// See [`NeighborAggregation::incident_log_into`].
    fn incident_log_into(&self, point: &BasePoint<T, Self>, result: &mut BaseTangent<T, Self>) -> Result<()>;
}

impl<T: Scalar, D: GraphLayer<T>> NeighborAggregation<T> for DecoratorManifold<D> {
    fn incident_log_into(&self, point: &Self::Point, result: &mut Self::TangentVector) -> Result<()> {
        <D as GraphLayer<T>>::incident_log_into(self.decorator(), point, result)
    }
}

impl<T, M, G> GraphLayer<T> for GraphDecorator<T, M, G>
where
    T: Scalar,
    M: Manifold<T>,
    M::TangentVector: LinearRepresentation<T>,
    G: GraphStructure,
{
    fn incident_log_into(&self, point: &BasePoint<T, Self>, result: &mut BaseTangent<T, Self>) -> Result<()> {
        if self.kind == GraphManifoldType::Edge {
            return Err(ManifoldError::not_implemented("incident_log", &self.name));
        }
        self.check_domain(point.len(), "point")?;

        let base = self.power.base();
        let Some(first) = point.first() else {
            result.clear();
            return Ok(());
        };
        let mut scratch = base.zero_vector(first)?;
        if result.len() == point.len() {
            for (slot, p) in result.iter_mut().zip(point) {
                if slot.same_shape(&scratch) {
                    slot.set_zero();
                } else {
                    *slot = base.zero_vector(p)?;
                }
            }
        } else {
            *result = point
                .iter()
                .map(|p| base.zero_vector(p))
                .collect::<Result<Vec<_>>>()?;
        }

        let directed = self.graph.is_directed();
        let vertex = |i: usize| {
            point.get(i).ok_or_else(|| {
                ManifoldError::domain("graph", format!("edge endpoint {i} outside 0..{}", point.len()))
            })
        };

        for edge in self.graph.edges() {
            let weight = <T as Scalar>::from_f64(edge.weight);
            let (xu, xw) = (vertex(edge.source)?, vertex(edge.target)?);

            base.log_into(xu, xw, &mut scratch)?;
            result[edge.source].add_scaled(weight, &scratch);

            if !directed {
                base.log_into(xw, xu, &mut scratch)?;
                result[edge.target].add_scaled(weight, &scratch);
            }
        }
        Ok(())
    }
}

impl<T: Scalar, M: NeighborAggregation<T>> GraphLayer<T> for ValidationDecorator<M> {
    fn incident_log_into(&self, point: &M::Point, result: &mut M::TangentVector) -> Result<()> {
        <Self as Decorator<T>>::base(self).incident_log_into(point, result)
    }
}

impl<T, M, G> GraphLayer<T> for MetricDecorator<M, G>
where
    T: Scalar,
    M: NeighborAggregation<T>,
    G: Metric<T, M>,
{
    fn incident_log_into(&self, point: &M::Point, result: &mut M::TangentVector) -> Result<()> {
        <Self as Decorator<T>>::base(self).incident_log_into(point, result)
    }
}
