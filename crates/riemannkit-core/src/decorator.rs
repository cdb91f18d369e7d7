//! Decorator composition engine.
//!
//! A decorator wraps an existing manifold and adds structure to it without
//! reimplementing its geometry. For every operation a decorator kind declares
//! a [`Resolution`]:
//!
//! - [`Resolution::Override`]: the decorator's own hook runs.
//! - [`Resolution::DefaultFallback`]: the base runs when the decorator's
//!   condition ([`Decorator::uses_base_by_default`]) holds, the hook otherwise.
//! - [`Resolution::Transparent`]: the base runs. When the base is itself a
//!   decorated manifold, resolution repeats one layer down.
//!
//! [`DecoratorManifold`] turns any [`Decorator`] into a [`Manifold`] by routing
//! each call according to these rules. Adding a decorator kind only requires a
//! new `Decorator` implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use riemannkit_core::prelude::*;
//!
//! #[derive(Debug)]
//! struct Labelled<M> {
//!     base: M,
//! }
//!
//! impl<T: Scalar, M: Manifold<T>> Decorator<T> for Labelled<M> {
//!     type Base = M;
//!
//!     fn base(&self) -> &M { &self.base }
//!     fn decorator_name(&self) -> &str { "Labelled" }
//! }
//!
//! // Every operation is transparent: exp, log, ... all reach `M`.
//! let labelled = Labelled { base }.into_manifold();
//! ```

use crate::{
    error::{ManifoldError, Result},
    manifold::{Manifold, RetractionMethod, VectorTransportMethod},
    types::Scalar,
};
use std::fmt::{self, Debug};

/// Operations routed by the decorator engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Intrinsic dimension
    Dimension,
    /// Representation shape
    RepresentationShape,
    /// Point validation
    CheckPoint,
    /// Tangent vector validation
    CheckVector,
    /// Exponential map
    Exp,
    /// Logarithmic map
    Log,
    /// Riemannian inner product
    InnerProduct,
    /// Retraction
    Retract,
    /// Inverse retraction
    InverseRetract,
    /// Zero tangent vector
    ZeroVector,
    /// Vector transport
    VectorTransport,
    /// Random point generation
    RandomPoint,
    /// Random tangent generation
    RandomTangent,
    /// Approximate point equality
    IsApproxPoint,
}

impl Operation {
    /// Every routed operation, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Dimension,
        Self::RepresentationShape,
        Self::CheckPoint,
        Self::CheckVector,
        Self::Exp,
        Self::Log,
        Self::InnerProduct,
        Self::Retract,
        Self::InverseRetract,
        Self::ZeroVector,
        Self::VectorTransport,
        Self::RandomPoint,
        Self::RandomTangent,
        Self::IsApproxPoint,
    ];

    /// Returns the operation name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dimension => "dimension",
            Self::RepresentationShape => "representation_shape",
            Self::CheckPoint => "check_point",
            Self::CheckVector => "check_vector",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::InnerProduct => "inner_product",
            Self::Retract => "retract",
            Self::InverseRetract => "inverse_retract",
            Self::ZeroVector => "zero_vector",
            Self::VectorTransport => "vector_transport_to",
            Self::RandomPoint => "random_point",
            Self::RandomTangent => "random_tangent",
            Self::IsApproxPoint => "is_approx_point",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a decorator kind handles one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Resolution {
    /// The decorator always handles the operation.
    Override,
    /// The base handles the operation when the decorator's condition holds.
    DefaultFallback,
    /// The base always handles the operation.
    #[default]
    Transparent,
}

/// Outcome of resolving an operation on a concrete decorator instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The decorator's hook runs.
    Decorator,
    /// The wrapped manifold runs.
    Base,
}

/// Point type of a decorator's base manifold.
pub type BasePoint<T, D> = <<D as Decorator<T>>::Base as Manifold<T>>::Point;

/// Tangent type of a decorator's base manifold.
pub type BaseTangent<T, D> = <<D as Decorator<T>>::Base as Manifold<T>>::TangentVector;

/// A layer of structure added on top of a base manifold.
///
/// Implementors declare a static resolution table through
/// [`Decorator::resolution`] and provide a hook for every operation they
/// override or conditionally handle. Hooks for operations that resolve to the
/// base are never called.
///
/// A hook that is reached but not provided fails with
/// [`ManifoldError::NotImplemented`] naming the decorator.
pub trait Decorator<T: Scalar>: Debug + Send + Sync + Sized {
    /// The wrapped manifold.
    type Base: Manifold<T>;

    /// Returns the wrapped manifold.
    fn base(&self) -> &Self::Base;

    /// Returns the name of the decorated manifold.
    fn decorator_name(&self) -> &str;

    /// Returns how this decorator kind handles `op`.
    fn resolution(op: Operation) -> Resolution {
        let _ = op;
        Resolution::Transparent
    }

    /// Condition for [`Resolution::DefaultFallback`] operations.
    ///
    /// Returns true when this instance behaves like its base for `op`.
    fn uses_base_by_default(&self, op: Operation) -> bool {
        let _ = op;
        false
    }

    /// Intrinsic dimension when [`Operation::Dimension`] is not transparent.
    fn dimension(&self) -> usize {
        self.base().dimension()
    }

    /// Representation shape when [`Operation::RepresentationShape`] is not transparent.
    fn representation_shape(&self) -> Vec<usize> {
        self.base().representation_shape()
    }

    /// Point validation hook.
    fn check_point(&self, point: &BasePoint<T, Self>) -> Result<()> {
        let _ = point;
        Err(self.missing(Operation::CheckPoint))
    }

    /// Tangent validation hook.
    fn check_vector(&self, point: &BasePoint<T, Self>, vector: &BaseTangent<T, Self>) -> Result<()> {
        let _ = (point, vector);
        Err(self.missing(Operation::CheckVector))
    }

    /// Exponential map hook.
    fn exp_into(
        &self,
        point: &BasePoint<T, Self>,
        tangent: &BaseTangent<T, Self>,
        result: &mut BasePoint<T, Self>,
    ) -> Result<()> {
        let _ = (point, tangent, result);
        Err(self.missing(Operation::Exp))
    }

    /// Logarithmic map hook.
    fn log_into(
        &self,
        point: &BasePoint<T, Self>,
        other: &BasePoint<T, Self>,
        result: &mut BaseTangent<T, Self>,
    ) -> Result<()> {
        let _ = (point, other, result);
        Err(self.missing(Operation::Log))
    }

    /// Inner product hook.
    fn inner_product(
        &self,
        point: &BasePoint<T, Self>,
        u: &BaseTangent<T, Self>,
        v: &BaseTangent<T, Self>,
    ) -> Result<T> {
        let _ = (point, u, v);
        Err(self.missing(Operation::InnerProduct))
    }

    /// Retraction hook.
    fn retract_into(
        &self,
        point: &BasePoint<T, Self>,
        tangent: &BaseTangent<T, Self>,
        method: RetractionMethod,
        result: &mut BasePoint<T, Self>,
    ) -> Result<()> {
        let _ = (point, tangent, method, result);
        Err(self.missing(Operation::Retract))
    }

    /// Inverse retraction hook.
    fn inverse_retract_into(
        &self,
        point: &BasePoint<T, Self>,
        other: &BasePoint<T, Self>,
        method: RetractionMethod,
        result: &mut BaseTangent<T, Self>,
    ) -> Result<()> {
        let _ = (point, other, method, result);
        Err(self.missing(Operation::InverseRetract))
    }

    /// Zero vector hook.
    fn zero_vector(&self, point: &BasePoint<T, Self>) -> Result<BaseTangent<T, Self>> {
        let _ = point;
        Err(self.missing(Operation::ZeroVector))
    }

    /// Vector transport hook.
    fn vector_transport_to_into(
        &self,
        from: &BasePoint<T, Self>,
        vector: &BaseTangent<T, Self>,
        to: &BasePoint<T, Self>,
        method: VectorTransportMethod,
        result: &mut BaseTangent<T, Self>,
    ) -> Result<()> {
        let _ = (from, vector, to, method, result);
        Err(self.missing(Operation::VectorTransport))
    }

    /// Random point hook.
    fn random_point(&self) -> Result<BasePoint<T, Self>> {
        Err(self.missing(Operation::RandomPoint))
    }

    /// Random tangent hook.
    fn random_tangent(&self, point: &BasePoint<T, Self>) -> Result<BaseTangent<T, Self>> {
        let _ = point;
        Err(self.missing(Operation::RandomTangent))
    }

    /// Approximate point equality hook.
    fn is_approx_point(&self, x: &BasePoint<T, Self>, y: &BasePoint<T, Self>, tolerance: T) -> Result<bool> {
        let _ = (x, y, tolerance);
        Err(self.missing(Operation::IsApproxPoint))
    }

    /// Error returned by hooks this decorator does not provide.
    fn missing(&self, op: Operation) -> ManifoldError {
        ManifoldError::not_implemented(op, self.decorator_name())
    }

    /// Wraps this decorator into a manifold.
    fn into_manifold(self) -> DecoratorManifold<Self> {
        DecoratorManifold::new(self)
    }
}

/// A manifold obtained by applying a decorator to its base.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratorManifold<D> {
    decorator: D,
}

impl<D> DecoratorManifold<D> {
    /// Wraps a decorator.
    pub fn new(decorator: D) -> Self {
        Self { decorator }
    }

    /// Returns the decorator.
    pub fn decorator(&self) -> &D {
        &self.decorator
    }

    /// Returns the decorator, consuming the manifold.
    pub fn into_decorator(self) -> D {
        self.decorator
    }

    /// Decides which layer handles `op` for this instance.
    pub fn resolve<T: Scalar>(&self, op: Operation) -> Route
    where
        D: Decorator<T>,
    {
        match <D as Decorator<T>>::resolution(op) {
            Resolution::Override => Route::Decorator,
            Resolution::DefaultFallback => {
                if <D as Decorator<T>>::uses_base_by_default(&self.decorator, op) {
                    Route::Base
                } else {
                    Route::Decorator
                }
            }
            Resolution::Transparent => Route::Base,
        }
    }

    /// Returns the wrapped manifold.
    pub fn base<T: Scalar>(&self) -> &<D as Decorator<T>>::Base
    where
        D: Decorator<T>,
    {
        self.decorator.base()
    }
}

impl<T: Scalar, D: Decorator<T>> Manifold<T> for DecoratorManifold<D> {
    type Point = BasePoint<T, D>;
    type TangentVector = BaseTangent<T, D>;

    fn name(&self) -> &str {
        self.decorator.decorator_name()
    }

    fn dimension(&self) -> usize {
        match self.resolve::<T>(Operation::Dimension) {
            Route::Decorator => <D as Decorator<T>>::dimension(&self.decorator),
            Route::Base => self.decorator.base().dimension(),
        }
    }

    fn representation_shape(&self) -> Vec<usize> {
        match self.resolve::<T>(Operation::RepresentationShape) {
            Route::Decorator => <D as Decorator<T>>::representation_shape(&self.decorator),
            Route::Base => self.decorator.base().representation_shape(),
        }
    }

    fn check_point(&self, point: &Self::Point) -> Result<()> {
        match self.resolve::<T>(Operation::CheckPoint) {
            Route::Decorator => <D as Decorator<T>>::check_point(&self.decorator, point),
            Route::Base => self.decorator.base().check_point(point),
        }
    }

    fn check_vector(&self, point: &Self::Point, vector: &Self::TangentVector) -> Result<()> {
        match self.resolve::<T>(Operation::CheckVector) {
            Route::Decorator => <D as Decorator<T>>::check_vector(&self.decorator, point, vector),
            Route::Base => self.decorator.base().check_vector(point, vector),
        }
    }

    fn exp_into(&self, point: &Self::Point, tangent: &Self::TangentVector, result: &mut Self::Point) -> Result<()> {
        match self.resolve::<T>(Operation::Exp) {
            Route::Decorator => <D as Decorator<T>>::exp_into(&self.decorator, point, tangent, result),
            Route::Base => self.decorator.base().exp_into(point, tangent, result),
        }
    }

    fn log_into(&self, point: &Self::Point, other: &Self::Point, result: &mut Self::TangentVector) -> Result<()> {
        match self.resolve::<T>(Operation::Log) {
            Route::Decorator => <D as Decorator<T>>::log_into(&self.decorator, point, other, result),
            Route::Base => self.decorator.base().log_into(point, other, result),
        }
    }

    fn inner_product(&self, point: &Self::Point, u: &Self::TangentVector, v: &Self::TangentVector) -> Result<T> {
        match self.resolve::<T>(Operation::InnerProduct) {
            Route::Decorator => <D as Decorator<T>>::inner_product(&self.decorator, point, u, v),
            Route::Base => self.decorator.base().inner_product(point, u, v),
        }
    }

    fn retract_into(
        &self,
        point: &Self::Point,
        tangent: &Self::TangentVector,
        method: RetractionMethod,
        result: &mut Self::Point,
    ) -> Result<()> {
        match self.resolve::<T>(Operation::Retract) {
            Route::Decorator => {
                <D as Decorator<T>>::retract_into(&self.decorator, point, tangent, method, result)
            }
            Route::Base => self.decorator.base().retract_into(point, tangent, method, result),
        }
    }

    fn inverse_retract_into(
        &self,
        point: &Self::Point,
        other: &Self::Point,
        method: RetractionMethod,
        result: &mut Self::TangentVector,
    ) -> Result<()> {
        match self.resolve::<T>(Operation::InverseRetract) {
            Route::Decorator => {
                <D as Decorator<T>>::inverse_retract_into(&self.decorator, point, other, method, result)
            }
            Route::Base => self
                .decorator
                .base()
                .inverse_retract_into(point, other, method, result),
        }
    }

    fn zero_vector(&self, point: &Self::Point) -> Result<Self::TangentVector> {
        match self.resolve::<T>(Operation::ZeroVector) {
            Route::Decorator => <D as Decorator<T>>::zero_vector(&self.decorator, point),
            Route::Base => self.decorator.base().zero_vector(point),
        }
    }

    fn vector_transport_to_into(
        &self,
        from: &Self::Point,
        vector: &Self::TangentVector,
        to: &Self::Point,
        method: VectorTransportMethod,
        result: &mut Self::TangentVector,
    ) -> Result<()> {
        match self.resolve::<T>(Operation::VectorTransport) {
            Route::Decorator => <D as Decorator<T>>::vector_transport_to_into(
                &self.decorator,
                from,
                vector,
                to,
                method,
                result,
            ),
            Route::Base => self
                .decorator
                .base()
                .vector_transport_to_into(from, vector, to, method, result),
        }
    }

    fn random_point(&self) -> Result<Self::Point> {
        match self.resolve::<T>(Operation::RandomPoint) {
            Route::Decorator => <D as Decorator<T>>::random_point(&self.decorator),
            Route::Base => self.decorator.base().random_point(),
        }
    }

    fn random_tangent(&self, point: &Self::Point) -> Result<Self::TangentVector> {
        match self.resolve::<T>(Operation::RandomTangent) {
            Route::Decorator => <D as Decorator<T>>::random_tangent(&self.decorator, point),
            Route::Base => self.decorator.base().random_tangent(point),
        }
    }

    fn is_approx_point(&self, x: &Self::Point, y: &Self::Point, tolerance: T) -> Result<bool> {
        match self.resolve::<T>(Operation::IsApproxPoint) {
            Route::Decorator => <D as Decorator<T>>::is_approx_point(&self.decorator, x, y, tolerance),
            Route::Base => self.decorator.base().is_approx_point(x, y, tolerance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_manifolds::{PartialManifold, TestEuclidean};
    use crate::types::DVector;
    use approx::assert_relative_eq;

    /// Doubles the exponential step and claims a larger dimension.
    #[derive(Debug)]
    struct Doubling {
        base: TestEuclidean<f64>,
    }

    impl Decorator<f64> for Doubling {
        type Base = TestEuclidean<f64>;

        fn base(&self) -> &Self::Base {
            &self.base
        }

        fn decorator_name(&self) -> &str {
            "Doubling"
        }

        fn resolution(op: Operation) -> Resolution {
            match op {
                Operation::Exp | Operation::Dimension => Resolution::Override,
                Operation::InnerProduct => Resolution::DefaultFallback,
                _ => Resolution::Transparent,
            }
        }

        fn dimension(&self) -> usize {
            2 * self.base.dimension()
        }

        fn exp_into(&self, point: &DVector<f64>, tangent: &DVector<f64>, result: &mut DVector<f64>) -> Result<()> {
            *result = point + tangent * 2.0;
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Passthrough<M> {
        base: M,
    }

    impl<T: Scalar, M: Manifold<T>> Decorator<T> for Passthrough<M> {
        type Base = M;

        fn base(&self) -> &M {
            &self.base
        }

        fn decorator_name(&self) -> &str {
            "Passthrough"
        }
    }

    #[test]
    fn test_override_routes_to_hook() {
        let manifold = Doubling { base: TestEuclidean::new(2) }.into_manifold();
        let x = DVector::from_vec(vec![1.0, 1.0]);
        let v = DVector::from_vec(vec![0.5, -0.5]);

        assert_eq!(manifold.resolve::<f64>(Operation::Exp), Route::Decorator);
        let y = manifold.exp(&x, &v).unwrap();
        assert_relative_eq!(y, DVector::from_vec(vec![2.0, 0.0]));
        assert_eq!(Manifold::<f64>::dimension(&manifold), 4);
        assert_eq!(Manifold::<f64>::representation_shape(&manifold), vec![2]);
    }

    #[test]
    fn test_transparent_routes_to_base() {
        let manifold = Doubling { base: TestEuclidean::new(2) }.into_manifold();
        let x = DVector::from_vec(vec![1.0, 1.0]);
        let y = DVector::from_vec(vec![3.0, 1.0]);

        assert_eq!(manifold.resolve::<f64>(Operation::Log), Route::Base);
        assert_relative_eq!(manifold.log(&x, &y).unwrap(), DVector::from_vec(vec![2.0, 0.0]));
    }

    #[test]
    fn test_fallback_without_condition_reaches_missing_hook() {
        let manifold = Doubling { base: TestEuclidean::new(2) }.into_manifold();
        let x = DVector::zeros(2);

        assert_eq!(manifold.resolve::<f64>(Operation::InnerProduct), Route::Decorator);
        let err = manifold.inner_product(&x, &x, &x).unwrap_err();
        assert_eq!(err, ManifoldError::not_implemented("inner_product", "Doubling"));
    }

    #[test]
    fn test_nested_transparency() {
        let inner = Passthrough { base: TestEuclidean::<f64>::new(3) }.into_manifold();
        let outer = Passthrough { base: inner }.into_manifold();
        let x = DVector::from_vec(vec![0.0, 0.0, 0.0]);
        let v = DVector::from_vec(vec![1.0, 2.0, 2.0]);

        assert_eq!(outer.name(), "Passthrough");
        assert_eq!(outer.dimension(), 3);
        assert_relative_eq!(outer.norm(&x, &v).unwrap(), 3.0);
        assert_relative_eq!(outer.exp(&x, &v).unwrap(), v);
    }

    #[test]
    fn test_not_implemented_propagates_unchanged() {
        let inner = Passthrough { base: PartialManifold::<f64>::new(2) }.into_manifold();
        let outer = Passthrough { base: inner }.into_manifold();
        let x = DVector::zeros(2);

        let err = outer.log(&x, &x).unwrap_err();
        assert_eq!(err, ManifoldError::not_implemented("log", "PartialManifold"));
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::VectorTransport.to_string(), "vector_transport_to");
        assert_eq!(Operation::ALL.len(), 14);
        assert_eq!(Resolution::default(), Resolution::Transparent);
    }
}
