//! Core manifold trait and associated types.
//!
//! This module defines the capability interface that every manifold, concrete
//! or decorated, satisfies. A Riemannian manifold (M, g) is a smooth manifold
//! equipped with an inner product g_p on every tangent space T_p M.
//!
//! # Operations
//!
//! - **Descriptors**: `dimension`, `representation_shape`
//! - **Validation**: `check_point`, `check_vector` and their boolean forms
//! - **Geodesics**: exponential map `exp_p: T_p M → M` and its local inverse `log_p`
//! - **Retractions**: first-order approximations of `exp`, selected by [`RetractionMethod`]
//! - **Transport**: moving `v ∈ T_x M` to `T_y M`, selected by [`VectorTransportMethod`]
//!
//! Only the descriptors are required. Every other operation defaults to
//! [`ManifoldError::NotImplemented`], so a manifold implements exactly the
//! subset that its geometry supports.
//!
//! # In-place variants
//!
//! Operations producing a point or a tangent vector come in two forms. The
//! `_into` form writes into a caller-owned buffer, the plain form allocates
//! the result and delegates to the `_into` form.

use crate::{
    error::{ManifoldError, Result},
    types::Scalar,
};
use num_traits::Float;
use std::fmt::{self, Debug};

/// Retraction methods selectable on a manifold.
///
/// Each method has its own numerical recipe; a manifold reports
/// `NotImplemented` for the methods its geometry does not provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RetractionMethod {
    /// The exponential map itself.
    #[default]
    Exponential,
    /// Step in the ambient space and project back onto the manifold.
    Projection,
    /// Polar factor of the ambient step, computed from an SVD.
    Polar,
    /// Q factor of a QR factorization of the ambient step.
    QR,
}

impl RetractionMethod {
    /// Returns the name of the method.
    pub fn name(self) -> &'static str {
        match self {
            Self::Exponential => "exponential",
            Self::Projection => "projection",
            Self::Polar => "polar",
            Self::QR => "qr",
        }
    }
}

impl fmt::Display for RetractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Vector transport methods selectable on a manifold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VectorTransportMethod {
    /// Parallel transport along the connecting geodesic.
    #[default]
    Parallel,
    /// Orthogonal projection onto the target tangent space.
    Projection,
}

impl VectorTransportMethod {
    /// Returns the name of the method.
    pub fn name(self) -> &'static str {
        match self {
            Self::Parallel => "parallel",
            Self::Projection => "projection",
        }
    }
}

impl fmt::Display for VectorTransportMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for Riemannian manifolds.
///
/// # Type Parameters
///
/// - `T`: The scalar type (f32 or f64)
///
/// Points and tangent vectors are associated types so that vector manifolds,
/// matrix manifolds and power manifolds share one interface.
///
/// # Mathematical Properties
///
/// Implementations are expected to satisfy, within tolerance:
///
/// 1. `exp_x(0) = x` and `log_x(exp_x(v)) = v` for small `v`
/// 2. `retract(x, 0, m) = x` and `inverse_retract(x, retract(x, v, m), m) = v` for small `v`
/// 3. `inner_product` is symmetric, bilinear and positive definite on `T_x M`
///
/// # Example
///
/// ```rust,ignore
/// use riemannkit_core::prelude::*;
///
/// #[derive(Debug)]
/// struct Line;
///
/// impl Manifold<f64> for Line {
///     type Point = DVector<f64>;
///     type TangentVector = DVector<f64>;
///
///     fn name(&self) -> &str { "Line" }
///     fn dimension(&self) -> usize { 1 }
///     fn representation_shape(&self) -> Vec<usize> { vec![1] }
///
///     fn exp_into(&self, x: &DVector<f64>, v: &DVector<f64>, out: &mut DVector<f64>) -> Result<()> {
///         *out = x + v;
///         Ok(())
///     }
/// }
/// ```
pub trait Manifold<T: Scalar>: Debug + Send + Sync {
    /// Representation of a point.
    type Point: Clone + Debug + Send + Sync;

    /// Representation of a tangent vector.
    type TangentVector: Clone + Debug + Send + Sync;

    /// Returns a human-readable name for the manifold.
    fn name(&self) -> &str;

    /// Returns the intrinsic dimension of the manifold.
    fn dimension(&self) -> usize;

    /// Returns the shape of the array representing a point.
    fn representation_shape(&self) -> Vec<usize>;

    /// Checks that `point` lies on the manifold.
    ///
    /// # Errors
    ///
    /// Returns a Domain error describing the violated constraint.
    fn check_point(&self, point: &Self::Point) -> Result<()> {
        let _ = point;
        Err(ManifoldError::not_implemented("check_point", self.name()))
    }

    /// Checks that `vector` lies in the tangent space at `point`.
    fn check_vector(&self, point: &Self::Point, vector: &Self::TangentVector) -> Result<()> {
        let _ = (point, vector);
        Err(ManifoldError::not_implemented("check_vector", self.name()))
    }

    /// Returns whether `point` lies on the manifold.
    ///
    /// With `strict` set, a failed check is returned as the Domain error
    /// instead of `false`. Errors other than Domain errors always propagate.
    fn is_point(&self, point: &Self::Point, strict: bool) -> Result<bool> {
        match self.check_point(point) {
            Ok(()) => Ok(true),
            Err(err) if err.is_domain_error() && !strict => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Returns whether `vector` lies in the tangent space at `point`.
    fn is_vector(&self, point: &Self::Point, vector: &Self::TangentVector, strict: bool) -> Result<bool> {
        match self.check_vector(point, vector) {
            Ok(()) => Ok(true),
            Err(err) if err.is_domain_error() && !strict => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Computes the exponential map `exp_point(tangent)` into `result`.
    fn exp_into(
        &self,
        point: &Self::Point,
        tangent: &Self::TangentVector,
        result: &mut Self::Point,
    ) -> Result<()> {
        let _ = (point, tangent, result);
        Err(ManifoldError::not_implemented("exp", self.name()))
    }

    /// Computes the exponential map `exp_point(tangent)`.
    fn exp(&self, point: &Self::Point, tangent: &Self::TangentVector) -> Result<Self::Point> {
        let mut result = point.clone();
        self.exp_into(point, tangent, &mut result)?;
        Ok(result)
    }

    /// Computes the logarithmic map `log_point(other)` into `result`.
    fn log_into(
        &self,
        point: &Self::Point,
        other: &Self::Point,
        result: &mut Self::TangentVector,
    ) -> Result<()> {
        let _ = (point, other, result);
        Err(ManifoldError::not_implemented("log", self.name()))
    }

    /// Computes the logarithmic map `log_point(other)`.
    fn log(&self, point: &Self::Point, other: &Self::Point) -> Result<Self::TangentVector> {
        let mut result = self.zero_vector(point)?;
        self.log_into(point, other, &mut result)?;
        Ok(result)
    }

    /// Computes the Riemannian inner product `g_point(u, v)`.
    fn inner_product(
        &self,
        point: &Self::Point,
        u: &Self::TangentVector,
        v: &Self::TangentVector,
    ) -> Result<T> {
        let _ = (point, u, v);
        Err(ManifoldError::not_implemented("inner_product", self.name()))
    }

    /// Computes the norm of a tangent vector, `sqrt(g_point(v, v))`.
    fn norm(&self, point: &Self::Point, vector: &Self::TangentVector) -> Result<T> {
        self.inner_product(point, vector, vector)
            .map(|ip| <T as Float>::sqrt(<T as Float>::max(ip, T::zero())))
    }

    /// Computes the geodesic distance as the norm of the logarithm.
    fn distance(&self, x: &Self::Point, y: &Self::Point) -> Result<T> {
        let log = self.log(x, y)?;
        self.norm(x, &log)
    }

    /// Performs a retraction with the given method into `result`.
    ///
    /// The exponential method falls back to [`Manifold::exp_into`]; any other
    /// method must be provided by the manifold.
    fn retract_into(
        &self,
        point: &Self::Point,
        tangent: &Self::TangentVector,
        method: RetractionMethod,
        result: &mut Self::Point,
    ) -> Result<()> {
        match method {
            RetractionMethod::Exponential => self.exp_into(point, tangent, result),
            other => Err(ManifoldError::not_implemented(
                format!("retract ({other})"),
                self.name(),
            )),
        }
    }

    /// Performs a retraction with the given method.
    fn retract(
        &self,
        point: &Self::Point,
        tangent: &Self::TangentVector,
        method: RetractionMethod,
    ) -> Result<Self::Point> {
        let mut result = point.clone();
        self.retract_into(point, tangent, method, &mut result)?;
        Ok(result)
    }

    /// Computes the inverse of a retraction into `result`.
    fn inverse_retract_into(
        &self,
        point: &Self::Point,
        other: &Self::Point,
        method: RetractionMethod,
        result: &mut Self::TangentVector,
    ) -> Result<()> {
        match method {
            RetractionMethod::Exponential => self.log_into(point, other, result),
            other_method => Err(ManifoldError::not_implemented(
                format!("inverse_retract ({other_method})"),
                self.name(),
            )),
        }
    }

    /// Computes the inverse of a retraction.
    fn inverse_retract(
        &self,
        point: &Self::Point,
        other: &Self::Point,
        method: RetractionMethod,
    ) -> Result<Self::TangentVector> {
        let mut result = self.zero_vector(point)?;
        self.inverse_retract_into(point, other, method, &mut result)?;
        Ok(result)
    }

    /// Returns the zero vector of the tangent space at `point`.
    fn zero_vector(&self, point: &Self::Point) -> Result<Self::TangentVector> {
        let _ = point;
        Err(ManifoldError::not_implemented("zero_vector", self.name()))
    }

    /// Transports `vector` from `T_from M` to `T_to M` into `result`.
    fn vector_transport_to_into(
        &self,
        from: &Self::Point,
        vector: &Self::TangentVector,
        to: &Self::Point,
        method: VectorTransportMethod,
        result: &mut Self::TangentVector,
    ) -> Result<()> {
        let _ = (from, vector, to, result);
        Err(ManifoldError::not_implemented(
            format!("vector_transport_to ({method})"),
            self.name(),
        ))
    }

    /// Transports `vector` from `T_from M` to `T_to M`.
    fn vector_transport_to(
        &self,
        from: &Self::Point,
        vector: &Self::TangentVector,
        to: &Self::Point,
        method: VectorTransportMethod,
    ) -> Result<Self::TangentVector> {
        let mut result = self.zero_vector(to)?;
        self.vector_transport_to_into(from, vector, to, method, &mut result)?;
        Ok(result)
    }

    /// Generates a random point on the manifold.
    fn random_point(&self) -> Result<Self::Point> {
        Err(ManifoldError::not_implemented("random_point", self.name()))
    }

    /// Generates a random tangent vector at `point`.
    fn random_tangent(&self, point: &Self::Point) -> Result<Self::TangentVector> {
        let _ = point;
        Err(ManifoldError::not_implemented("random_tangent", self.name()))
    }

    /// Approximate equality of two points.
    ///
    /// The default compares the geodesic distance against `tolerance`.
    fn is_approx_point(&self, x: &Self::Point, y: &Self::Point, tolerance: T) -> Result<bool> {
        Ok(self.distance(x, y)? <= tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_manifolds::{PartialManifold, TestEuclidean};
    use crate::types::DVector;

    #[test]
    fn test_manifold_basic_properties() {
        let manifold = TestEuclidean::<f64>::new(10);
        assert_eq!(manifold.name(), "TestEuclidean");
        assert_eq!(manifold.dimension(), 10);
        assert_eq!(manifold.representation_shape(), vec![10]);
    }

    #[test]
    fn test_default_implementations() {
        let manifold = TestEuclidean::<f64>::new(3);
        let point = DVector::zeros(3);
        let vector = DVector::from_vec(vec![1.0, 0.0, 0.0]);

        // norm uses inner_product
        assert_eq!(manifold.norm(&point, &vector).unwrap(), 1.0);

        // distance uses log and norm
        let other_point = DVector::from_vec(vec![3.0, 4.0, 0.0]);
        assert_eq!(manifold.distance(&point, &other_point).unwrap(), 5.0);

        // exponential retraction falls back to exp
        let retracted = manifold
            .retract(&point, &vector, RetractionMethod::Exponential)
            .unwrap();
        assert_eq!(retracted, vector);
        let back = manifold
            .inverse_retract(&point, &retracted, RetractionMethod::Exponential)
            .unwrap();
        assert_eq!(back, vector);
    }

    #[test]
    fn test_is_point_strictness() {
        let manifold = TestEuclidean::<f64>::new(2);
        let wrong = DVector::from_vec(vec![1.0, 2.0, 3.0]);

        assert!(!manifold.is_point(&wrong, false).unwrap());
        let err = manifold.is_point(&wrong, true).unwrap_err();
        assert!(err.is_domain_error());
        assert!(manifold.is_point(&DVector::zeros(2), true).unwrap());
    }

    #[test]
    fn test_unimplemented_operations() {
        let manifold = PartialManifold::<f64>::new(2);
        let x = DVector::zeros(2);
        let v = DVector::zeros(2);

        let err = manifold.exp(&x, &v).unwrap_err();
        assert_eq!(err, ManifoldError::not_implemented("exp", "PartialManifold"));

        let err = manifold.retract(&x, &v, RetractionMethod::Polar).unwrap_err();
        assert_eq!(
            err,
            ManifoldError::not_implemented("retract (polar)", "PartialManifold")
        );

        // is_point propagates NotImplemented even when not strict
        assert!(manifold.is_point(&x, false).unwrap_err().is_not_implemented());
    }

    #[test]
    fn test_method_defaults() {
        assert_eq!(RetractionMethod::default(), RetractionMethod::Exponential);
        assert_eq!(VectorTransportMethod::default(), VectorTransportMethod::Parallel);
        assert_eq!(RetractionMethod::QR.to_string(), "qr");
    }

    #[test]
    fn test_manifold_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TestEuclidean<f64>>();
    }
}
