//! Group structure of point representations.
//!
//! The built-in operations (addition and multiplication) act directly on the
//! arrays holding points. [`GroupRepresentation`] provides them for the
//! nalgebra types; a representation without a meaningful product reports
//! `NotImplemented` for the multiplicative operations.

use riemannkit_core::{
    error::{ManifoldError, Result},
    types::{DMatrix, DVector, Scalar},
};

/// Additive and multiplicative group operations on a representation.
pub trait GroupRepresentation<T: Scalar>: Clone + Send + Sync + Sized + 'static {
    /// Neutral element of addition with the shape of `self`.
    fn additive_identity(&self) -> Self;

    /// Sum `self + other`.
    fn additive_compose(&self, other: &Self) -> Result<Self>;

    /// Negation `-self`.
    fn additive_inverse(&self) -> Self;

    /// Neutral element of multiplication matching `self`.
    fn multiplicative_identity(&self) -> Result<Self>;

    /// Product `self · other`.
    fn multiplicative_compose(&self, other: &Self) -> Result<Self>;

    /// Multiplicative inverse of `self`.
    fn multiplicative_inverse(&self) -> Result<Self>;

    /// Writes `self + other` into `result`.
    fn additive_compose_into(&self, other: &Self, result: &mut Self) -> Result<()> {
        *result = self.additive_compose(other)?;
        Ok(())
    }

    /// Writes `-self` into `result`.
    fn additive_inverse_into(&self, result: &mut Self) {
        *result = self.additive_inverse();
    }

    /// Writes `self · other` into `result`.
    fn multiplicative_compose_into(&self, other: &Self, result: &mut Self) -> Result<()> {
        *result = self.multiplicative_compose(other)?;
        Ok(())
    }

    /// Writes the multiplicative inverse of `self` into `result`.
    fn multiplicative_inverse_into(&self, result: &mut Self) -> Result<()> {
        *result = self.multiplicative_inverse()?;
        Ok(())
    }
}

impl<T: Scalar> GroupRepresentation<T> for DVector<T> {
    fn additive_identity(&self) -> Self {
        DVector::zeros(self.len())
    }

    fn additive_compose(&self, other: &Self) -> Result<Self> {
        if self.len() != other.len() {
            return Err(ManifoldError::dimension_mismatch(self.len(), other.len()));
        }
        Ok(self + other)
    }

    fn additive_inverse(&self) -> Self {
        -self
    }

    fn multiplicative_identity(&self) -> Result<Self> {
        Err(ManifoldError::not_implemented("multiplicative_identity", "DVector"))
    }

    fn multiplicative_compose(&self, _other: &Self) -> Result<Self> {
        Err(ManifoldError::not_implemented("multiplicative_compose", "DVector"))
    }

    fn multiplicative_inverse(&self) -> Result<Self> {
        Err(ManifoldError::not_implemented("multiplicative_inverse", "DVector"))
    }

    fn additive_compose_into(&self, other: &Self, result: &mut Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(ManifoldError::dimension_mismatch(self.len(), other.len()));
        }
        if result.len() == self.len() {
            result.copy_from(self);
            *result += other;
        } else {
            *result = self + other;
        }
        Ok(())
    }

    fn additive_inverse_into(&self, result: &mut Self) {
        if result.len() == self.len() {
            result.copy_from(self);
            result.neg_mut();
        } else {
            *result = -self;
        }
    }
}

impl<T: Scalar> GroupRepresentation<T> for DMatrix<T> {
    fn additive_identity(&self) -> Self {
        DMatrix::zeros(self.nrows(), self.ncols())
    }

    fn additive_compose(&self, other: &Self) -> Result<Self> {
        if self.shape() != other.shape() {
            return Err(ManifoldError::dimension_mismatch(
                format!("{:?}", self.shape()),
                format!("{:?}", other.shape()),
            ));
        }
        Ok(self + other)
    }

    fn additive_inverse(&self) -> Self {
        -self
    }

    fn multiplicative_identity(&self) -> Result<Self> {
        if !self.is_square() {
            return Err(ManifoldError::dimension_mismatch(
                "square matrix",
                format!("{}x{} matrix", self.nrows(), self.ncols()),
            ));
        }
        Ok(DMatrix::identity(self.nrows(), self.ncols()))
    }

    fn multiplicative_compose(&self, other: &Self) -> Result<Self> {
        if self.ncols() != other.nrows() {
            return Err(ManifoldError::dimension_mismatch(
                format!("{} rows", self.ncols()),
                format!("{} rows", other.nrows()),
            ));
        }
        Ok(self * other)
    }

    fn multiplicative_inverse(&self) -> Result<Self> {
        if !self.is_square() {
            return Err(ManifoldError::dimension_mismatch(
                "square matrix",
                format!("{}x{} matrix", self.nrows(), self.ncols()),
            ));
        }
        self.clone()
            .try_inverse()
            .ok_or_else(|| ManifoldError::numerical_error("matrix is not invertible"))
    }

    fn additive_compose_into(&self, other: &Self, result: &mut Self) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(ManifoldError::dimension_mismatch(
                format!("{:?}", self.shape()),
                format!("{:?}", other.shape()),
            ));
        }
        if result.shape() == self.shape() {
            result.copy_from(self);
            *result += other;
        } else {
            *result = self + other;
        }
        Ok(())
    }

    fn additive_inverse_into(&self, result: &mut Self) {
        if result.shape() == self.shape() {
            result.copy_from(self);
            result.neg_mut();
        } else {
            *result = -self;
        }
    }

    fn multiplicative_compose_into(&self, other: &Self, result: &mut Self) -> Result<()> {
        if self.ncols() != other.nrows() {
            return Err(ManifoldError::dimension_mismatch(
                format!("{} rows", self.ncols()),
                format!("{} rows", other.nrows()),
            ));
        }
        if result.shape() == (self.nrows(), other.ncols()) {
            self.mul_to(other, result);
        } else {
            *result = self * other;
        }
        Ok(())
    }

    fn multiplicative_inverse_into(&self, result: &mut Self) -> Result<()> {
        if !self.is_square() {
            return Err(ManifoldError::dimension_mismatch(
                "square matrix",
                format!("{}x{} matrix", self.nrows(), self.ncols()),
            ));
        }
        if result.shape() == self.shape() {
            result.copy_from(self);
        } else {
            *result = self.clone();
        }
        if result.try_inverse_mut() {
            Ok(())
        } else {
            Err(ManifoldError::numerical_error("matrix is not invertible"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vector_addition() {
        let x = DVector::from_vec(vec![1.0, -2.0]);
        let sum = x.additive_compose(&x.additive_inverse()).unwrap();
        assert_relative_eq!(sum, x.additive_identity());
        assert!(x.additive_compose(&DVector::zeros(3)).is_err());
    }

    #[test]
    fn test_vector_has_no_product() {
        let x = DVector::<f64>::zeros(2);
        assert!(x.multiplicative_identity().unwrap_err().is_not_implemented());
    }

    #[test]
    fn test_matrix_multiplication() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 0.0, 1.0]);
        let inv = a.multiplicative_inverse().unwrap();
        assert_relative_eq!(
            a.multiplicative_compose(&inv).unwrap(),
            a.multiplicative_identity().unwrap(),
            epsilon = 1e-12
        );

        let singular = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        assert!(matches!(
            singular.multiplicative_inverse(),
            Err(ManifoldError::NumericalError { .. })
        ));
        assert!(DMatrix::<f64>::zeros(2, 3).multiplicative_identity().is_err());
    }

    #[test]
    fn test_in_place_operations_reuse_buffer() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 0.0, 1.0]);
        let b = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 3.0, 1.0]);
        let mut out = DMatrix::<f64>::zeros(2, 2);
        let buffer = out.as_ptr();

        a.multiplicative_compose_into(&b, &mut out).unwrap();
        assert_relative_eq!(out, &a * &b);
        a.multiplicative_inverse_into(&mut out).unwrap();
        assert_relative_eq!(out, a.multiplicative_inverse().unwrap(), epsilon = 1e-12);
        a.additive_compose_into(&b, &mut out).unwrap();
        assert_relative_eq!(out, &a + &b);
        a.additive_inverse_into(&mut out);
        assert_relative_eq!(out, -&a);
        assert_eq!(out.as_ptr(), buffer);

        let mut wrong = DMatrix::<f64>::zeros(3, 1);
        a.multiplicative_compose_into(&b, &mut wrong).unwrap();
        assert_relative_eq!(wrong, &a * &b);
    }
}
