//! Linear structure of point and tangent representations.
//!
//! Generic code such as the power manifold or neighbor aggregation needs to
//! allocate zero tangents and accumulate weighted sums without knowing the
//! concrete array type. [`LinearRepresentation`] exposes exactly that.

use crate::types::{DMatrix, DVector, Scalar};

/// Vector-space operations on a value representation.
pub trait LinearRepresentation<T: Scalar>: Clone {
    /// Returns a zero value with the same shape as `self`.
    fn zeros_like(&self) -> Self;

    /// Computes `self += alpha * other` in place.
    fn add_scaled(&mut self, alpha: T, other: &Self);

    /// Computes `self *= alpha` in place.
    fn scale_mut(&mut self, alpha: T);

    /// Overwrites `self` with zeros, keeping its storage.
    fn set_zero(&mut self);

    /// Returns true if `self` and `other` have the same shape.
    fn same_shape(&self, other: &Self) -> bool;
}

impl<T: Scalar> LinearRepresentation<T> for DVector<T> {
    fn zeros_like(&self) -> Self {
        DVector::zeros(self.len())
    }

    fn add_scaled(&mut self, alpha: T, other: &Self) {
        self.axpy(alpha, other, T::one());
    }

    fn scale_mut(&mut self, alpha: T) {
        *self *= alpha;
    }

    fn set_zero(&mut self) {
        self.fill(T::zero());
    }

    fn same_shape(&self, other: &Self) -> bool {
        self.len() == other.len()
    }
}

impl<T: Scalar> LinearRepresentation<T> for DMatrix<T> {
    fn zeros_like(&self) -> Self {
        DMatrix::zeros(self.nrows(), self.ncols())
    }

    fn add_scaled(&mut self, alpha: T, other: &Self) {
        *self += other * alpha;
    }

    fn scale_mut(&mut self, alpha: T) {
        *self *= alpha;
    }

    fn set_zero(&mut self) {
        self.fill(T::zero());
    }

    fn same_shape(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }
}

impl<T: Scalar, E: LinearRepresentation<T>> LinearRepresentation<T> for Vec<E> {
    fn zeros_like(&self) -> Self {
        self.iter().map(LinearRepresentation::zeros_like).collect()
    }

    fn add_scaled(&mut self, alpha: T, other: &Self) {
        for (a, b) in self.iter_mut().zip(other.iter()) {
            a.add_scaled(alpha, b);
        }
    }

    fn scale_mut(&mut self, alpha: T) {
        for a in self.iter_mut() {
            a.scale_mut(alpha);
        }
    }

    fn set_zero(&mut self) {
        for a in self.iter_mut() {
            a.set_zero();
        }
    }

    fn same_shape(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a.same_shape(b))
    }
}
