//! Sphere manifold S^{n-1} = {x in R^n : ||x|| = 1}
//!
//! The unit sphere with the metric inherited from R^n. Geodesics are great
//! circles and every map used here has a closed form.

use riemannkit_core::{
    config::validation_config,
    error::{ManifoldError, Result},
    manifold::{Manifold, RetractionMethod, VectorTransportMethod},
    types::{DVector, Scalar},
};
use num_traits::Float;
use rand_distr::{Distribution, StandardNormal};
use std::marker::PhantomData;

/// The unit sphere S^{n-1} in R^n.
///
/// Points satisfy ||x|| = 1, and the tangent space at x consists of all
/// vectors orthogonal to x.
///
/// # Mathematical Properties
///
/// - **Dimension**: n-1 (for sphere in R^n)
/// - **Tangent space**: T_x S^{n-1} = {v in R^n : x^T v = 0}
/// - **Exponential map**: exp_x(v) = cos(||v||) x + sin(||v||) v/||v||
/// - **Logarithmic map**: log_x(y) = θ (y - cos(θ)x) / sin(θ), θ = arccos(x^T y)
/// - **Projection retraction**: R_x(v) = (x + v) / ||x + v||
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere<T> {
    /// Ambient dimension (n)
    ambient_dim: usize,
    _phantom: PhantomData<T>,
}

impl<T: Scalar> Sphere<T> {
    /// Creates a new sphere S^{n-1} embedded in R^n.
    ///
    /// # Errors
    /// Returns a Domain error if `ambient_dim` < 2
    pub fn new(ambient_dim: usize) -> Result<Self> {
        if ambient_dim < 2 {
            return Err(ManifoldError::domain(
                "Sphere",
                "ambient dimension must be at least 2",
            ));
        }
        Ok(Self {
            ambient_dim,
            _phantom: PhantomData,
        })
    }

    /// Returns the ambient dimension (n)
    pub fn ambient_dimension(&self) -> usize {
        self.ambient_dim
    }

    fn check_len(&self, len: usize, context: &str) -> Result<()> {
        if len == self.ambient_dim {
            Ok(())
        } else {
            Err(ManifoldError::domain(
                context,
                format!("expected length {}, got {len}", self.ambient_dim),
            ))
        }
    }

    fn gaussian(&self) -> DVector<T> {
        let mut rng = rand::thread_rng();
        DVector::from_fn(self.ambient_dim, |_, _| {
            let val: f64 = StandardNormal.sample(&mut rng);
            <T as Scalar>::from_f64(val)
        })
    }
}

impl<T: Scalar> Manifold<T> for Sphere<T> {
    type Point = DVector<T>;
    type TangentVector = DVector<T>;

    fn name(&self) -> &str {
        "Sphere"
    }

    fn dimension(&self) -> usize {
        self.ambient_dim - 1
    }

    fn representation_shape(&self) -> Vec<usize> {
        vec![self.ambient_dim]
    }

    fn check_point(&self, point: &Self::Point) -> Result<()> {
        self.check_len(point.len(), "point")?;
        let tol = validation_config().approx_tolerance::<T>();
        let deviation = <T as Float>::abs(point.norm_squared() - T::one());
        if deviation > tol {
            return Err(ManifoldError::invalid_point(format!(
                "norm must be 1, squared norm deviates by {deviation}"
            )));
        }
        Ok(())
    }

    fn check_vector(&self, point: &Self::Point, vector: &Self::TangentVector) -> Result<()> {
        self.check_len(point.len(), "point")?;
        self.check_len(vector.len(), "tangent vector")?;
        let tol = validation_config().approx_tolerance::<T>();
        let inner = point.dot(vector);
        if <T as Float>::abs(inner) > tol {
            return Err(ManifoldError::invalid_tangent(format!(
                "must be orthogonal to the point, inner product is {inner}"
            )));
        }
        Ok(())
    }

    fn exp_into(&self, point: &Self::Point, tangent: &Self::TangentVector, result: &mut Self::Point) -> Result<()> {
        let tangent_norm = tangent.norm();

        if tangent_norm < T::EPSILON {
            // exp_x(0) = x
            result.copy_from(point);
            return Ok(());
        }

        let cos_norm = <T as Float>::cos(tangent_norm);
        let sin_norm = <T as Float>::sin(tangent_norm);
        *result = point * cos_norm + tangent * (sin_norm / tangent_norm);
        Ok(())
    }

    fn log_into(&self, point: &Self::Point, other: &Self::Point, result: &mut Self::TangentVector) -> Result<()> {
        // Clamp to avoid numerical issues with arccos
        let cos_theta = <T as Float>::max(<T as Float>::min(point.dot(other), T::one()), -T::one());
        let theta = <T as Float>::acos(cos_theta);

        if theta < T::EPSILON {
            result.fill(T::zero());
            return Ok(());
        }

        let sin_theta = <T as Float>::sin(theta);
        if sin_theta < T::EPSILON {
            return Err(ManifoldError::numerical_error(
                "logarithm is not unique for antipodal points",
            ));
        }

        *result = (other - point * cos_theta) * (theta / sin_theta);
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
            RetractionMethod::Exponential => self.exp_into(point, tangent, result),
            RetractionMethod::Projection => {
                let step = point + tangent;
                let norm = step.norm();
                if norm < T::EPSILON {
                    return Err(ManifoldError::numerical_error(
                        "projection retraction of a vanishing step",
                    ));
                }
                *result = step / norm;
                Ok(())
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
            RetractionMethod::Exponential => self.log_into(point, other, result),
            RetractionMethod::Projection => {
                // y = (x + v)/||x + v|| with v ⊥ x gives v = y/<x, y> - x
                let inner = point.dot(other);
                if inner < T::EPSILON {
                    return Err(ManifoldError::numerical_error(
                        "inverse projection retraction requires <x, y> > 0",
                    ));
                }
                *result = other / inner - point;
                Ok(())
            }
            m => Err(ManifoldError::not_implemented(format!("inverse_retract ({m})"), self.name())),
        }
    }

    fn zero_vector(&self, _point: &Self::Point) -> Result<Self::TangentVector> {
        Ok(DVector::zeros(self.ambient_dim))
    }

    fn vector_transport_to_into(
        &self,
        from: &Self::Point,
        vector: &Self::TangentVector,
        to: &Self::Point,
        method: VectorTransportMethod,
        result: &mut Self::TangentVector,
    ) -> Result<()> {
        match method {
            VectorTransportMethod::Projection => {
                *result = vector - to * to.dot(vector);
            }
            VectorTransportMethod::Parallel => {
                // Transport along the great circle joining `from` and `to`
                let denom = T::one() + from.dot(to);
                if denom < T::EPSILON {
                    return Err(ManifoldError::numerical_error(
                        "parallel transport between antipodal points is not unique",
                    ));
                }
                let coeff = to.dot(vector) / denom;
                *result = vector - (from + to) * coeff;
            }
        }
        Ok(())
    }

    fn random_point(&self) -> Result<Self::Point> {
        loop {
            let candidate = self.gaussian();
            let norm = candidate.norm();
            if norm > T::EPSILON {
                return Ok(candidate / norm);
            }
        }
    }

    fn random_tangent(&self, point: &Self::Point) -> Result<Self::TangentVector> {
        let random_vec = self.gaussian();
        // Project to tangent space: v - <v,x>x
        let inner = point.dot(&random_vec);
        Ok(random_vec - point * inner)
    }
}
