//! Power manifold M^n.
//!
//! A point of the power manifold is a list of `n` points of the base manifold
//! and a tangent vector a list of `n` base tangent vectors. Every operation
//! acts componentwise, and the metric is the sum of the component metrics:
//!
//! ```text
//! g_x(u, v) = Σᵢ g_{xᵢ}(uᵢ, vᵢ)
//! ```

use riemannkit_core::{
    error::{ManifoldError, Result},
    manifold::{Manifold, RetractionMethod, VectorTransportMethod},
    types::Scalar,
};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// The power manifold `base^size`.
pub struct PowerManifold<T, M> {
    base: Arc<M>,
    size: usize,
    name: String,
    _phantom: PhantomData<T>,
}

impl<T: Scalar, M: Manifold<T>> PowerManifold<T, M> {
    /// Creates `base^size`.
    pub fn new(base: M, size: usize) -> Self {
        Self::from_shared(Arc::new(base), size)
    }

    /// Creates `base^size` over a shared base.
    pub fn from_shared(base: Arc<M>, size: usize) -> Self {
        let name = format!("Power({}, {size})", base.name());
        Self {
            base,
            size,
            name,
            _phantom: PhantomData,
        }
    }

    /// Returns the base manifold.
    pub fn base(&self) -> &M {
        &self.base
    }

    /// Returns the number of components.
    pub fn size(&self) -> usize {
        self.size
    }

    fn check_len(&self, len: usize, context: &str) -> Result<()> {
        if len == self.size {
            Ok(())
        } else {
            Err(ManifoldError::domain(
                context,
                format!("expected {} components, got {len}", self.size),
            ))
        }
    }

    /// Validates a power point: the component count, then each component.
    ///
    /// A failing component is reported with its index.
    pub fn check_power_point(&self, point: &[M::Point]) -> Result<()> {
        self.check_len(point.len(), "point")?;
        for (i, p) in point.iter().enumerate() {
            self.base
                .check_point(p)
                .map_err(|e| e.in_context(format!("component {i}")))?;
        }
        Ok(())
    }

    /// Validates a power tangent vector at `point`.
    pub fn check_power_vector(&self, point: &[M::Point], vector: &[M::TangentVector]) -> Result<()> {
        self.check_len(point.len(), "point")?;
        self.check_len(vector.len(), "tangent vector")?;
        for (i, (p, v)) in point.iter().zip(vector).enumerate() {
            self.base
                .check_vector(p, v)
                .map_err(|e| e.in_context(format!("component {i}")))?;
        }
        Ok(())
    }

    /// Resizes a tangent buffer to the zero vector at `point` if needed.
    fn prepare_tangent(&self, point: &[M::Point], result: &mut Vec<M::TangentVector>) -> Result<()> {
        if result.len() != point.len() {
            *result = self.zero_vector_at(point)?;
        }
        Ok(())
    }

    fn zero_vector_at(&self, point: &[M::Point]) -> Result<Vec<M::TangentVector>> {
        point.iter().map(|p| self.base.zero_vector(p)).collect()
    }
}

impl<T, M> Clone for PowerManifold<T, M> {
    fn clone(&self) -> Self {
        Self {
            base: Arc::clone(&self.base),
            size: self.size,
            name: self.name.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T, M: fmt::Debug> fmt::Debug for PowerManifold<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PowerManifold")
            .field("base", &self.base)
            .field("size", &self.size)
            .finish()
    }
}

impl<T: Scalar, M: Manifold<T>> Manifold<T> for PowerManifold<T, M> {
    type Point = Vec<M::Point>;
    type TangentVector = Vec<M::TangentVector>;

    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        self.base.dimension() * self.size
    }

    fn representation_shape(&self) -> Vec<usize> {
        let mut shape = self.base.representation_shape();
        shape.push(self.size);
        shape
    }

    fn check_point(&self, point: &Self::Point) -> Result<()> {
        self.check_power_point(point)
    }

    fn check_vector(&self, point: &Self::Point, vector: &Self::TangentVector) -> Result<()> {
        self.check_power_vector(point, vector)
    }

    fn exp_into(&self, point: &Self::Point, tangent: &Self::TangentVector, result: &mut Self::Point) -> Result<()> {
        self.check_len(point.len(), "point")?;
        self.check_len(tangent.len(), "tangent vector")?;
        if result.len() != point.len() {
            result.clone_from(point);
        }
        for ((p, v), out) in point.iter().zip(tangent).zip(result.iter_mut()) {
            self.base.exp_into(p, v, out)?;
        }
        Ok(())
    }

    fn log_into(&self, point: &Self::Point, other: &Self::Point, result: &mut Self::TangentVector) -> Result<()> {
        self.check_len(point.len(), "point")?;
        self.check_len(other.len(), "point")?;
        self.prepare_tangent(point, result)?;
        for ((p, q), out) in point.iter().zip(other).zip(result.iter_mut()) {
            self.base.log_into(p, q, out)?;
        }
        Ok(())
    }

    fn inner_product(&self, point: &Self::Point, u: &Self::TangentVector, v: &Self::TangentVector) -> Result<T> {
        self.check_len(point.len(), "point")?;
        self.check_len(u.len(), "tangent vector")?;
        self.check_len(v.len(), "tangent vector")?;
        point
            .iter()
            .zip(u)
            .zip(v)
            .try_fold(T::zero(), |acc, ((p, a), b)| Ok(acc + self.base.inner_product(p, a, b)?))
    }

    fn retract_into(
        &self,
        point: &Self::Point,
        tangent: &Self::TangentVector,
        method: RetractionMethod,
        result: &mut Self::Point,
    ) -> Result<()> {
        self.check_len(point.len(), "point")?;
        self.check_len(tangent.len(), "tangent vector")?;
        if result.len() != point.len() {
            result.clone_from(point);
        }
        for ((p, v), out) in point.iter().zip(tangent).zip(result.iter_mut()) {
            self.base.retract_into(p, v, method, out)?;
        }
        Ok(())
    }

    fn inverse_retract_into(
        &self,
        point: &Self::Point,
        other: &Self::Point,
        method: RetractionMethod,
        result: &mut Self::TangentVector,
    ) -> Result<()> {
        self.check_len(point.len(), "point")?;
        self.check_len(other.len(), "point")?;
        self.prepare_tangent(point, result)?;
        for ((p, q), out) in point.iter().zip(other).zip(result.iter_mut()) {
            self.base.inverse_retract_into(p, q, method, out)?;
        }
        Ok(())
    }

    fn zero_vector(&self, point: &Self::Point) -> Result<Self::TangentVector> {
        self.check_len(point.len(), "point")?;
        self.zero_vector_at(point)
    }

    fn vector_transport_to_into(
        &self,
        from: &Self::Point,
        vector: &Self::TangentVector,
        to: &Self::Point,
        method: VectorTransportMethod,
        result: &mut Self::TangentVector,
    ) -> Result<()> {
        self.check_len(from.len(), "point")?;
        self.check_len(to.len(), "point")?;
        self.check_len(vector.len(), "tangent vector")?;
        self.prepare_tangent(to, result)?;
        for (((x, v), y), out) in from.iter().zip(vector).zip(to).zip(result.iter_mut()) {
            self.base.vector_transport_to_into(x, v, y, method, out)?;
        }
        Ok(())
    }

    fn random_point(&self) -> Result<Self::Point> {
        (0..self.size).map(|_| self.base.random_point()).collect()
    }

    fn random_tangent(&self, point: &Self::Point) -> Result<Self::TangentVector> {
        self.check_len(point.len(), "point")?;
        point.iter().map(|p| self.base.random_tangent(p)).collect()
    }

    fn is_approx_point(&self, x: &Self::Point, y: &Self::Point, tolerance: T) -> Result<bool> {
        self.check_len(x.len(), "point")?;
        self.check_len(y.len(), "point")?;
        for (p, q) in x.iter().zip(y) {
            if !self.base.is_approx_point(p, q, tolerance)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
