//! Common test manifolds for use in unit tests.
//!
//! This module provides small manifolds that exercise the capability
//! interface without depending on the concrete manifolds crate.

#![cfg(any(test, feature = "test-utils"))]

use crate::{
    error::{ManifoldError, Result},
    manifold::{Manifold, RetractionMethod, VectorTransportMethod},
    types::{DVector, Scalar},
};
use std::marker::PhantomData;

/// A flat Euclidean manifold for testing.
///
/// Every operation is implemented with its trivial closed form.
#[derive(Debug, Clone, PartialEq)]
pub struct TestEuclidean<T> {
    dim: usize,
    _phantom: PhantomData<T>,
}

impl<T: Scalar> TestEuclidean<T> {
    /// Creates the space R^dim.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            _phantom: PhantomData,
        }
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
}

impl<T: Scalar> Manifold<T> for TestEuclidean<T> {
    type Point = DVector<T>;
    type TangentVector = DVector<T>;

    fn name(&self) -> &str {
        "TestEuclidean"
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn representation_shape(&self) -> Vec<usize> {
        vec![self.dim]
    }

    fn check_point(&self, point: &Self::Point) -> Result<()> {
        self.check_len(point.len(), "point")
    }

    fn check_vector(&self, point: &Self::Point, vector: &Self::TangentVector) -> Result<()> {
        self.check_point(point)?;
        self.check_len(vector.len(), "tangent vector")
    }

    fn exp_into(&self, point: &Self::Point, tangent: &Self::TangentVector, result: &mut Self::Point) -> Result<()> {
        *result = point + tangent;
        Ok(())
    }

    fn log_into(&self, point: &Self::Point, other: &Self::Point, result: &mut Self::TangentVector) -> Result<()> {
        *result = other - point;
        Ok(())
    }

    fn inner_product(&self, _point: &Self::Point, u: &Self::TangentVector, v: &Self::TangentVector) -> Result<T> {
        Ok(u.dot(v))
    }

    fn retract_into(
        &self,
        point: &Self::Point,
        tangent: &Self::TangentVector,
        _method: RetractionMethod,
        result: &mut Self::Point,
    ) -> Result<()> {
        self.exp_into(point, tangent, result)
    }

    fn inverse_retract_into(
        &self,
        point: &Self::Point,
        other: &Self::Point,
        _method: RetractionMethod,
        result: &mut Self::TangentVector,
    ) -> Result<()> {
        self.log_into(point, other, result)
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
        result.clone_from(vector);
        Ok(())
    }

    fn random_point(&self) -> Result<Self::Point> {
        Ok(DVector::from_fn(self.dim, |_, _| {
            <T as Scalar>::from_f64(rand::random::<f64>() * 2.0 - 1.0)
        }))
    }

    fn random_tangent(&self, _point: &Self::Point) -> Result<Self::TangentVector> {
        self.random_point()
    }
}

/// A manifold that only provides its descriptors and an inner product.
///
/// Used to check that missing operations surface as `NotImplemented`.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialManifold<T> {
    dim: usize,
    _phantom: PhantomData<T>,
}

impl<T: Scalar> PartialManifold<T> {
    /// Creates a partial manifold of the given dimension.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            _phantom: PhantomData,
        }
    }
}

impl<T: Scalar> Manifold<T> for PartialManifold<T> {
    type Point = DVector<T>;
    type TangentVector = DVector<T>;

    fn name(&self) -> &str {
        "PartialManifold"
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn representation_shape(&self) -> Vec<usize> {
        vec![self.dim]
    }

    fn inner_product(&self, _point: &Self::Point, u: &Self::TangentVector, v: &Self::TangentVector) -> Result<T> {
        Ok(u.dot(v))
    }

    fn zero_vector(&self, _point: &Self::Point) -> Result<Self::TangentVector> {
        Ok(DVector::zeros(self.dim))
    }
}
