//! Generic decorators applicable to any manifold.

pub mod metric;
pub mod validation;

pub use metric::{EuclideanMetric, Metric, MetricDecorator, MetricManifold, ScaledMetric};
pub use validation::{ValidationDecorator, ValidationManifold};
