//! Alternative Riemannian metrics on an existing manifold.
//!
//! [`MetricDecorator`] equips its base with a [`Metric`]. The inner product
//! and the geodesic maps resolve as default fallbacks: when the metric is the
//! base's default metric they run on the base, otherwise the metric computes
//! them.

use crate::{
    decorator::{BasePoint, BaseTangent, Decorator, DecoratorManifold, Operation, Resolution},
    error::{ManifoldError, Result},
    manifold::Manifold,
    types::Scalar,
};
use std::fmt::Debug;
use std::sync::Arc;

/// A Riemannian metric on manifold `M`.
pub trait Metric<T: Scalar, M: Manifold<T>>: Debug + Send + Sync {
    /// Name of the metric.
    fn name(&self) -> &str;

    /// Returns true when this metric coincides with the default metric of `manifold`.
    fn is_default_for(&self, manifold: &M) -> bool;

    /// Inner product of `u` and `v` at `point`.
    fn inner_product(&self, manifold: &M, point: &M::Point, u: &M::TangentVector, v: &M::TangentVector) -> Result<T> {
        let _ = (manifold, point, u, v);
        Err(ManifoldError::not_implemented("inner_product", self.name()))
    }

    /// Exponential map of this metric.
    fn exp_into(&self, manifold: &M, point: &M::Point, tangent: &M::TangentVector, result: &mut M::Point) -> Result<()> {
        let _ = (manifold, point, tangent, result);
        Err(ManifoldError::not_implemented("exp", self.name()))
    }

    /// Logarithmic map of this metric.
    fn log_into(&self, manifold: &M, point: &M::Point, other: &M::Point, result: &mut M::TangentVector) -> Result<()> {
        let _ = (manifold, point, other, result);
        Err(ManifoldError::not_implemented("log", self.name()))
    }
}

/// The metric a manifold already carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EuclideanMetric;

impl<T: Scalar, M: Manifold<T>> Metric<T, M> for EuclideanMetric {
    fn name(&self) -> &str {
        "EuclideanMetric"
    }

    fn is_default_for(&self, _manifold: &M) -> bool {
        true
    }
}

/// The base metric multiplied by a positive constant.
///
/// Scaling by a constant leaves geodesics unchanged, so the exponential and
/// logarithmic maps are those of the base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledMetric<T> {
    factor: T,
}

impl<T: Scalar> ScaledMetric<T> {
    /// Creates a metric scaled by `factor`.
    ///
    /// # Errors
    ///
    /// Returns a Domain error if `factor` is not finite and positive.
    pub fn new(factor: T) -> Result<Self> {
        if !<T as num_traits::Float>::is_finite(factor) || factor <= T::zero() {
            return Err(ManifoldError::domain(
                "ScaledMetric",
                format!("scale factor must be finite and positive, got {factor}"),
            ));
        }
        Ok(Self { factor })
    }

    /// Returns the scale factor.
    pub fn factor(&self) -> T {
        self.factor
    }
}

impl<T: Scalar, M: Manifold<T>> Metric<T, M> for ScaledMetric<T> {
    fn name(&self) -> &str {
        "ScaledMetric"
    }

    fn is_default_for(&self, _manifold: &M) -> bool {
        self.factor == T::one()
    }

    fn inner_product(&self, manifold: &M, point: &M::Point, u: &M::TangentVector, v: &M::TangentVector) -> Result<T> {
        Ok(self.factor * manifold.inner_product(point, u, v)?)
    }

    fn exp_into(&self, manifold: &M, point: &M::Point, tangent: &M::TangentVector, result: &mut M::Point) -> Result<()> {
        manifold.exp_into(point, tangent, result)
    }

    fn log_into(&self, manifold: &M, point: &M::Point, other: &M::Point, result: &mut M::TangentVector) -> Result<()> {
        manifold.log_into(point, other, result)
    }
}

/// Decorator replacing the metric of its base.
#[derive(Debug, Clone)]
pub struct MetricDecorator<M, G> {
    base: Arc<M>,
    metric: G,
}

/// A manifold carrying a metric other than its own.
pub type MetricManifold<M, G> = DecoratorManifold<MetricDecorator<M, G>>;

impl<M, G> MetricDecorator<M, G> {
    /// Equips `base` with `metric`.
    pub fn new(base: M, metric: G) -> Self {
        Self::from_shared(Arc::new(base), metric)
    }

    /// Equips a shared base with `metric`.
    pub fn from_shared(base: Arc<M>, metric: G) -> Self {
        Self { base, metric }
    }

    /// Returns the metric.
    pub fn metric(&self) -> &G {
        &self.metric
    }
}

impl<T, M, G> Decorator<T> for MetricDecorator<M, G>
where
    T: Scalar,
    M: Manifold<T>,
    G: Metric<T, M>,
{
    type Base = M;

    fn base(&self) -> &M {
        &self.base
    }

    fn decorator_name(&self) -> &str {
        "MetricManifold"
    }

    fn resolution(op: Operation) -> Resolution {
        match op {
            Operation::InnerProduct | Operation::Exp | Operation::Log => Resolution::DefaultFallback,
            _ => Resolution::Transparent,
        }
    }

    fn uses_base_by_default(&self, _op: Operation) -> bool {
        self.metric.is_default_for(&self.base)
    }

    fn inner_product(&self, point: &BasePoint<T, Self>, u: &BaseTangent<T, Self>, v: &BaseTangent<T, Self>) -> Result<T> {
        self.metric.inner_product(&self.base, point, u, v)
    }

    fn exp_into(&self, point: &BasePoint<T, Self>, tangent: &BaseTangent<T, Self>, result: &mut BasePoint<T, Self>) -> Result<()> {
        self.metric.exp_into(&self.base, point, tangent, result)
    }

    fn log_into(&self, point: &BasePoint<T, Self>, other: &BasePoint<T, Self>, result: &mut BaseTangent<T, Self>) -> Result<()> {
        self.metric.log_into(&self.base, point, other, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorator::Route;
    use crate::test_manifolds::TestEuclidean;
    use crate::types::DVector;
    use approx::assert_relative_eq;

    #[derive(Debug)]
    struct Unfinished;

    impl<M: Manifold<f64>> Metric<f64, M> for Unfinished {
        fn name(&self) -> &str {
            "Unfinished"
        }

        fn is_default_for(&self, _manifold: &M) -> bool {
            false
        }
    }

    #[test]
    fn test_default_metric_uses_base() {
        let manifold = MetricDecorator::new(TestEuclidean::<f64>::new(2), EuclideanMetric).into_manifold();
        let x = DVector::zeros(2);
        let v = DVector::from_vec(vec![3.0, 4.0]);

        assert_eq!(manifold.resolve::<f64>(Operation::InnerProduct), Route::Base);
        assert_relative_eq!(manifold.norm(&x, &v).unwrap(), 5.0);
    }

    #[test]
    fn test_unit_scale_is_default() {
        let metric = ScaledMetric::new(1.0).unwrap();
        let manifold = MetricDecorator::new(TestEuclidean::<f64>::new(2), metric).into_manifold();
        assert_eq!(manifold.resolve::<f64>(Operation::Exp), Route::Base);
    }

    #[test]
    fn test_scaled_metric_overrides_inner_product() {
        let metric = ScaledMetric::new(4.0).unwrap();
        let manifold = MetricDecorator::new(TestEuclidean::<f64>::new(2), metric).into_manifold();
        let x = DVector::zeros(2);
        let y = DVector::from_vec(vec![3.0, 4.0]);

        assert_eq!(manifold.resolve::<f64>(Operation::InnerProduct), Route::Decorator);
        assert_relative_eq!(manifold.distance(&x, &y).unwrap(), 10.0);
        assert_relative_eq!(manifold.exp(&x, &y).unwrap(), y);
    }

    #[test]
    fn test_non_default_metric_without_geodesics() {
        let manifold = MetricDecorator::new(TestEuclidean::<f64>::new(2), Unfinished).into_manifold();
        let x = DVector::zeros(2);

        let err = manifold.exp(&x, &x).unwrap_err();
        assert_eq!(err, ManifoldError::not_implemented("exp", "Unfinished"));
    }

    #[test]
    fn test_invalid_scale() {
        assert!(ScaledMetric::new(0.0_f64).unwrap_err().is_domain_error());
        assert!(ScaledMetric::new(f64::NAN).is_err());
    }
}
