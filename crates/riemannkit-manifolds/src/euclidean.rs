//! Euclidean space R^n.
//!
//! The flat manifold: geodesics are straight lines, every tangent space is
//! R^n itself and transport is the identity.

use riemannkit_core::{
    error::{ManifoldError, Result},
    manifold::{Manifold, RetractionMethod, VectorTransportMethod},
    types::{DVector, Scalar},
};
use rand_distr::{Distribution, StandardNormal};
use std::marker::PhantomData;

/// Euclidean space R^n with the standard inner product.
///
/// # Mathematical Properties
///
/// - **Dimension**: n
/// - **Exponential map**: exp_x(v) = x + v
/// - **Logarithmic map**: log_x(y) = y - x
/// - **Retractions**: exponential and projection coincide with exp
#[derive(Debug, Clone, PartialEq)]
pub struct Euclidean<T> {
    dim: usize,
    _phantom: PhantomData<T>,
}

impl<T: Scalar> Euclidean<T> {
    /// Creates R^n.
    ///
    /// # Errors
    /// Returns a Domain error if `dim` is zero.
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(ManifoldError::domain("Euclidean", "dimension must be positive"));
        }
        Ok(Self {
            dim,
            _phantom: PhantomData,
        })
    }

    fn check_len(&self, len: usize, context: &str) -> Result<()> {
        if len == self.dim {
            Ok(())
        } else {
            Err(ManifoldError::domain(
                context,
                format!("expected length {}, got {len}", self.dim),
            ))
        }
    }

    fn gaussian(&self) -> DVector<T> {
        let mut rng = rand::thread_rng();
        DVector::from_fn(self.dim, |_, _| {
            let val: f64 = StandardNormal.sample(&mut rng);
            <T as Scalar>::from_f64(val)
        })
    }
}

impl<T: Scalar> Manifold<T> for Euclidean<T> {
    type Point = DVector<T>;
    type TangentVector = DVector<T>;

    fn name(&self) -> &str {
        "Euclidean"
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn representation_shape(&self) -> Vec<usize> {
        vec![self.dim]
    }

    fn check_point(&self, point: &Self::Point) -> Result<()> {
        self.check_len(point.len(), "point")?;
        if point.iter().all(|x| num_traits::Float::is_finite(*x)) {
            Ok(())
        } else {
            Err(ManifoldError::invalid_point("coordinates must be finite"))
        }
    }

    fn check_vector(&self, point: &Self::Point, vector: &Self::TangentVector) -> Result<()> {
        self.check_len(point.len(), "point")?;
        self.check_len(vector.len(), "tangent vector")
    }

    fn exp_into(&self, point: &Self::Point, tangent: &Self::TangentVector, result: &mut Self::Point) -> Result<()> {
        result.copy_from(point);
        *result += tangent;
        Ok(())
    }

    fn log_into(&self, point: &Self::Point, other: &Self::Point, result: &mut Self::TangentVector) -> Result<()> {
        result.copy_from(other);
        *result -= point;
        Ok(())
    }

    fn inner_product(&self, _point: &Self::Point, u: &Self::TangentVector, v: &Self::TangentVector) -> Result<T> {
        Ok(u.dot(v))
    }

    fn retract_into(
        &self,
        point: &Self::Point,
        tangent: &Self::TangentVector,
        method: RetractionMethod,
        result: &mut Self::Point,
    ) -> Result<()> {
        match method {
            RetractionMethod::Exponential | RetractionMethod::Projection => {
                self.exp_into(point, tangent, result)
            }
            other => Err(ManifoldError::not_implemented(format!("retract ({other})"), self.name())),
        }
    }

    fn inverse_retract_into(
        &self,
        point: &Self::Point,
        other: &Self::Point,
        method: RetractionMethod,
        result: &mut Self::TangentVector,
    ) -> Result<()> {
        match method {
            RetractionMethod::Exponential | RetractionMethod::Projection => {
                self.log_into(point, other, result)
            }
            m => Err(ManifoldError::not_implemented(format!("inverse_retract ({m})"), self.name())),
        }
    }

    fn zero_vector(&self, _point: &Self::Point) -> Result<Self::TangentVector> {
        Ok(DVector::zeros(self.dim))
    }

    fn vector_transport_to_into(
        &self,
        _from: &Self::Point,
        vector: &Self::TangentVector,
        _to: &Self::Point,
        _method: VectorTransportMethod,
        result: &mut Self::TangentVector,
    ) -> Result<()> {
        result.copy_from(vector);
        Ok(())
    }

    fn random_point(&self) -> Result<Self::Point> {
        Ok(self.gaussian())
    }

    fn random_tangent(&self, _point: &Self::Point) -> Result<Self::TangentVector> {
        Ok(self.gaussian())
    }
}
