//! Special orthogonal group SO(n) = {X in R^{n×n} : X^T X = I, det(X) = 1}
//!
//! Rotations carry the bi-invariant metric inherited from the Frobenius inner
//! product. Tangent vectors are stored in the ambient representation: a
//! tangent vector at X is a matrix V = XΩ with Ω skew-symmetric.
//!
//! # Retractions
//!
//! | method | map | inverse |
//! |---|---|---|
//! | `Exponential` | X·expm(X^T V) | closed form for n = 2, 3 |
//! | `Polar`, `Projection` | polar factor of X + V | Ω = (Q + Q^T)^{-1}(Q - Q^T), Q = X^T Y |
//! | `QR` | Q factor of X + V with positive R diagonal | column-by-column triangular solve |

use riemannkit_core::{
    config::validation_config,
    error::{ManifoldError, Result},
    manifold::{Manifold, RetractionMethod, VectorTransportMethod},
    types::{DMatrix, Scalar},
};
use num_traits::Float;
use rand_distr::{Distribution, StandardNormal};
use std::marker::PhantomData;

/// The rotation group SO(n).
///
/// # Mathematical Properties
///
/// - **Dimension**: n(n-1)/2
/// - **Tangent space**: T_X SO(n) = {XΩ : Ω^T = -Ω}
/// - **Riemannian metric**: <U, V> = tr(U^T V)
#[derive(Debug, Clone, PartialEq)]
pub struct Rotations<T> {
    n: usize,
    _phantom: PhantomData<T>,
}

/// Skew-symmetric part (A - A^T)/2.
fn skew<T: Scalar>(a: &DMatrix<T>) -> DMatrix<T> {
    (a - a.transpose()) * <T as Scalar>::from_f64(0.5)
}

impl<T: Scalar> Rotations<T> {
    /// Creates SO(n).
    ///
    /// # Errors
    /// Returns a Domain error if `n` < 2.
    pub fn new(n: usize) -> Result<Self> {
        if n < 2 {
            return Err(ManifoldError::domain("Rotations", "matrix size must be at least 2"));
        }
        Ok(Self {
            n,
            _phantom: PhantomData,
        })
    }

    /// Returns the matrix size n.
    pub fn matrix_size(&self) -> usize {
        self.n
    }

    /// Differential of left multiplication by `g`, applied to `v`: g·v.
    pub fn left_multiply_tangent(&self, g: &DMatrix<T>, v: &DMatrix<T>) -> DMatrix<T> {
        g * v
    }

    /// Differential of right multiplication by `g`, applied to `v`: v·g.
    pub fn right_multiply_tangent(&self, g: &DMatrix<T>, v: &DMatrix<T>) -> DMatrix<T> {
        v * g
    }

    /// Writes g·v into `result`, reusing its storage.
    pub fn left_multiply_tangent_into(&self, g: &DMatrix<T>, v: &DMatrix<T>, result: &mut DMatrix<T>) -> Result<()> {
        self.check_shape(g, "left_multiply_tangent")?;
        self.check_shape(v, "left_multiply_tangent")?;
        self.prepare_buffer(result);
        g.mul_to(v, result);
        Ok(())
    }

    /// Writes v·g into `result`, reusing its storage.
    pub fn right_multiply_tangent_into(&self, g: &DMatrix<T>, v: &DMatrix<T>, result: &mut DMatrix<T>) -> Result<()> {
        self.check_shape(g, "right_multiply_tangent")?;
        self.check_shape(v, "right_multiply_tangent")?;
        self.prepare_buffer(result);
        v.mul_to(g, result);
        Ok(())
    }

    fn prepare_buffer(&self, result: &mut DMatrix<T>) {
        if result.shape() != (self.n, self.n) {
            *result = DMatrix::zeros(self.n, self.n);
        }
    }

    fn check_shape(&self, matrix: &DMatrix<T>, context: &str) -> Result<()> {
        if matrix.shape() == (self.n, self.n) {
            Ok(())
        } else {
            Err(ManifoldError::domain(
                context,
                format!(
                    "expected a {n}x{n} matrix, got {}x{}",
                    matrix.nrows(),
                    matrix.ncols(),
                    n = self.n
                ),
            ))
        }
    }

    /// Q factor of `a` with the signs of its columns fixed so that R has a
    /// positive diagonal.
    fn q_factor(a: DMatrix<T>) -> DMatrix<T> {
        let qr = a.qr();
        let r = qr.r();
        let mut q = qr.q();
        for j in 0..q.ncols() {
            if r[(j, j)] < T::zero() {
                q.column_mut(j).neg_mut();
            }
        }
        q
    }

    /// Polar factor A (A^T A)^{-1/2} of `a`.
    ///
    /// The singular values of X + V come in equal pairs, so the factor is
    /// taken from the symmetric square root of the Gram matrix.
    fn polar_factor(a: DMatrix<T>) -> Result<DMatrix<T>> {
        let eigen = (a.transpose() * &a).symmetric_eigen();
        let floor = <T as Float>::sqrt(T::EPSILON);
        if eigen.eigenvalues.iter().any(|&lambda| lambda <= floor) {
            return Err(ManifoldError::numerical_error(
                "polar retraction: matrix is numerically singular",
            ));
        }
        let inv_sqrt = eigen
            .eigenvalues
            .map(|lambda| T::one() / <T as Float>::sqrt(lambda));
        let q = eigen.eigenvectors;
        Ok(a * (&q * DMatrix::from_diagonal(&inv_sqrt) * q.transpose()))
    }

    /// Skew matrix Ω with exp(Ω) = R, for R in SO(2) or SO(3).
    fn log_rotation(&self, r: &DMatrix<T>) -> Result<DMatrix<T>> {
        match self.n {
            2 => {
                let theta = <T as Float>::atan2(r[(1, 0)], r[(0, 0)]);
                let mut omega = DMatrix::zeros(2, 2);
                omega[(0, 1)] = -theta;
                omega[(1, 0)] = theta;
                Ok(omega)
            }
            3 => {
                let half = <T as Scalar>::from_f64(0.5);
                let cos_theta = <T as Float>::max(
                    <T as Float>::min((r.trace() - T::one()) * half, T::one()),
                    -T::one(),
                );
                let theta = <T as Float>::acos(cos_theta);
                let sin_theta = <T as Float>::sin(theta);
                let antisym = skew(r);

                if theta < <T as Float>::sqrt(T::EPSILON) {
                    // first-order expansion near the identity
                    return Ok(antisym);
                }
                if sin_theta < <T as Float>::sqrt(T::EPSILON) {
                    return Err(ManifoldError::numerical_error(
                        "logarithm is not unique for rotations by π",
                    ));
                }
                Ok(antisym * (theta / sin_theta))
            }
            _ => Err(ManifoldError::not_implemented(
                format!("log (SO({}))", self.n),
                "Rotations",
            )),
        }
    }

    /// Solves (I + Ω) = A R for Ω skew and R upper triangular, one column at a time.
    fn inverse_qr(&self, a: &DMatrix<T>) -> Result<DMatrix<T>> {
        let n = self.n;
        let mut m = DMatrix::<T>::zeros(n, n);

        for j in 0..n {
            let mut rhs = nalgebra::DVector::<T>::zeros(j + 1);
            for i in 0..j {
                rhs[i] = -m[(j, i)];
            }
            rhs[j] = T::one();

            let block = a.view((0, 0), (j + 1, j + 1)).clone_owned();
            let r_col = block.lu().solve(&rhs).ok_or_else(|| {
                ManifoldError::numerical_error("inverse QR retraction: singular leading block")
            })?;
            let col = a.columns(0, j + 1) * r_col;
            m.set_column(j, &col);
        }

        Ok(m - DMatrix::identity(n, n))
    }
}

impl<T: Scalar> Manifold<T> for Rotations<T> {
    type Point = DMatrix<T>;
    type TangentVector = DMatrix<T>;

    fn name(&self) -> &str {
        "Rotations"
    }

    fn dimension(&self) -> usize {
        self.n * (self.n - 1) / 2
    }

    fn representation_shape(&self) -> Vec<usize> {
        vec![self.n, self.n]
    }

    fn check_point(&self, point: &Self::Point) -> Result<()> {
        self.check_shape(point, "point")?;
        let tol = validation_config().approx_tolerance::<T>();
        let gram_error = (point.transpose() * point - DMatrix::identity(self.n, self.n)).norm();
        if gram_error > tol {
            return Err(ManifoldError::invalid_point(format!(
                "X^T X deviates from the identity by {gram_error}"
            )));
        }
        if point.determinant() <= T::zero() {
            return Err(ManifoldError::invalid_point("determinant must be positive"));
        }
        Ok(())
    }

    fn check_vector(&self, point: &Self::Point, vector: &Self::TangentVector) -> Result<()> {
        self.check_shape(point, "point")?;
        self.check_shape(vector, "tangent vector")?;
        let tol = validation_config().approx_tolerance::<T>();
        let xt_v = point.transpose() * vector;
        let sym_error = (&xt_v + xt_v.transpose()).norm();
        if sym_error > tol {
            return Err(ManifoldError::invalid_tangent(format!(
                "X^T V must be skew-symmetric, symmetric part has norm {sym_error}"
            )));
        }
        Ok(())
    }

    fn exp_into(&self, point: &Self::Point, tangent: &Self::TangentVector, result: &mut Self::Point) -> Result<()> {
        let omega = point.transpose() * tangent;
        *result = point * omega.exp();
        Ok(())
    }

    fn log_into(&self, point: &Self::Point, other: &Self::Point, result: &mut Self::TangentVector) -> Result<()> {
        let omega = self.log_rotation(&(point.transpose() * other))?;
        *result = point * omega;
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
            RetractionMethod::Polar | RetractionMethod::Projection => {
                *result = Self::polar_factor(point + tangent)?;
                Ok(())
            }
            RetractionMethod::QR => {
                *result = Self::q_factor(point + tangent);
                Ok(())
            }
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
            RetractionMethod::Polar | RetractionMethod::Projection => {
                let q = point.transpose() * other;
                let sym = &q + q.transpose();
                let antisym = &q - q.transpose();
                let omega = sym.lu().solve(&antisym).ok_or_else(|| {
                    ManifoldError::numerical_error("inverse polar retraction: singular system")
                })?;
                *result = point * omega;
                Ok(())
            }
            RetractionMethod::QR => {
                let omega = self.inverse_qr(&(point.transpose() * other))?;
                *result = point * omega;
                Ok(())
            }
        }
    }

    fn zero_vector(&self, _point: &Self::Point) -> Result<Self::TangentVector> {
        Ok(DMatrix::zeros(self.n, self.n))
    }

    fn vector_transport_to_into(
        &self,
        _from: &Self::Point,
        vector: &Self::TangentVector,
        to: &Self::Point,
        method: VectorTransportMethod,
        result: &mut Self::TangentVector,
    ) -> Result<()> {
        match method {
            VectorTransportMethod::Projection => {
                *result = to * skew(&(to.transpose() * vector));
                Ok(())
            }
            VectorTransportMethod::Parallel => Err(ManifoldError::not_implemented(
                format!("vector_transport_to ({method})"),
                self.name(),
            )),
        }
    }

    fn random_point(&self) -> Result<Self::Point> {
        let mut rng = rand::thread_rng();
        let gaussian = DMatrix::from_fn(self.n, self.n, |_, _| {
            let val: f64 = StandardNormal.sample(&mut rng);
            <T as Scalar>::from_f64(val)
        });
        let mut q = Self::q_factor(gaussian);
        if q.determinant() < T::zero() {
            q.column_mut(0).neg_mut();
        }
        Ok(q)
    }

    fn random_tangent(&self, point: &Self::Point) -> Result<Self::TangentVector> {
        let mut rng = rand::thread_rng();
        let gaussian = DMatrix::from_fn(self.n, self.n, |_, _| {
            let val: f64 = StandardNormal.sample(&mut rng);
            <T as Scalar>::from_f64(val)
        });
        Ok(point * skew(&gaussian))
    }

    fn is_approx_point(&self, x: &Self::Point, y: &Self::Point, tolerance: T) -> Result<bool> {
        Ok((x - y).norm() <= tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rotation_2d(theta: f64) -> DMatrix<f64> {
        DMatrix::from_row_slice(2, 2, &[theta.cos(), -theta.sin(), theta.sin(), theta.cos()])
    }

    fn skew_3d(a: f64, b: f64, c: f64) -> DMatrix<f64> {
        DMatrix::from_row_slice(3, 3, &[0.0, -c, b, c, 0.0, -a, -b, a, 0.0])
    }

    #[test]
    fn test_rotations_creation() {
        let so3 = Rotations::<f64>::new(3).unwrap();
        assert_eq!(so3.dimension(), 3);
        assert_eq!(so3.representation_shape(), vec![3, 3]);
        assert!(Rotations::<f64>::new(1).is_err());
    }

    #[test]
    fn test_membership() {
        let so2 = Rotations::<f64>::new(2).unwrap();
        assert!(so2.is_point(&rotation_2d(0.3), true).unwrap());

        let reflection = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, -1.0]);
        let err = so2.check_point(&reflection).unwrap_err();
        assert_eq!(err, ManifoldError::invalid_point("determinant must be positive"));

        let x = DMatrix::identity(2, 2);
        let omega = DMatrix::from_row_slice(2, 2, &[0.0, -1.0, 1.0, 0.0]);
        assert!(so2.is_vector(&x, &omega, true).unwrap());
        assert!(!so2.is_vector(&x, &DMatrix::identity(2, 2), false).unwrap());
    }

    #[test]
    fn test_exp_log_so2() {
        let so2 = Rotations::<f64>::new(2).unwrap();
        let x = rotation_2d(0.4);
        let y = rotation_2d(1.1);

        let v = so2.log(&x, &y).unwrap();
        assert!(so2.is_vector(&x, &v, true).unwrap());
        assert_relative_eq!(so2.distance(&x, &y).unwrap(), 0.7 * 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(so2.exp(&x, &v).unwrap(), y, epsilon = 1e-12);
    }

    #[test]
    fn test_exp_log_so3() {
        let so3 = Rotations::<f64>::new(3).unwrap();
        let x = so3.random_point().unwrap();
        let v = &x * skew_3d(0.2, -0.3, 0.5);

        let y = so3.exp(&x, &v).unwrap();
        assert!(so3.is_point(&y, true).unwrap());
        let back = so3.log(&x, &y).unwrap();
        assert_relative_eq!(back, v, epsilon = 1e-10);
    }

    #[test]
    fn test_polar_factor_with_repeated_singular_values() {
        // I + Ω has singular values (√(1+c²), √(1+c²), 1)
        let c = 0.5_f64;
        let a = DMatrix::identity(3, 3) + skew_3d(0.0, 0.0, c);
        let p = Rotations::<f64>::polar_factor(a.clone()).unwrap();

        let theta = c.atan();
        let expected = DMatrix::from_row_slice(
            3,
            3,
            &[theta.cos(), -theta.sin(), 0.0, theta.sin(), theta.cos(), 0.0, 0.0, 0.0, 1.0],
        );
        assert_relative_eq!(p, expected, epsilon = 1e-12);

        let sym = p.transpose() * &a;
        assert_relative_eq!(sym.clone(), sym.transpose(), epsilon = 1e-12);
    }

    #[test]
    fn test_polar_factor_singular() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        assert!(matches!(
            Rotations::<f64>::polar_factor(a),
            Err(ManifoldError::NumericalError { .. })
        ));
    }

    #[test]
    fn test_log_unsupported_size() {
        let so4 = Rotations::<f64>::new(4).unwrap();
        let x = DMatrix::identity(4, 4);
        assert!(so4.log(&x, &x).unwrap_err().is_not_implemented());
    }

    #[test]
    fn test_random_generation() {
        let so4 = Rotations::<f64>::new(4).unwrap();
        let x = so4.random_point().unwrap();
        assert!(so4.is_point(&x, true).unwrap());
        let v = so4.random_tangent(&x).unwrap();
        assert!(so4.is_vector(&x, &v, true).unwrap());
    }

    #[test]
    fn test_projection_transport() {
        let so3 = Rotations::<f64>::new(3).unwrap();
        let x = so3.random_point().unwrap();
        let y = so3.random_point().unwrap();
        let v = so3.random_tangent(&x).unwrap();

        let w = so3
            .vector_transport_to(&x, &v, &y, VectorTransportMethod::Projection)
            .unwrap();
        assert!(so3.is_vector(&y, &w, true).unwrap());
    }

    #[test]
    fn test_multiplication_differentials() {
        let so2 = Rotations::<f64>::new(2).unwrap();
        let g = rotation_2d(0.5);
        let v = DMatrix::from_row_slice(2, 2, &[0.0, -1.0, 1.0, 0.0]);

        assert_relative_eq!(so2.left_multiply_tangent(&g, &v), &g * &v);
        assert_relative_eq!(so2.right_multiply_tangent(&g, &v), &v * &g);

        let mut out = DMatrix::zeros(1, 1);
        so2.left_multiply_tangent_into(&g, &v, &mut out).unwrap();
        assert_relative_eq!(out, &g * &v);
        so2.right_multiply_tangent_into(&g, &v, &mut out).unwrap();
        assert_relative_eq!(out, &v * &g);
        assert!(so2
            .left_multiply_tangent_into(&g, &DMatrix::zeros(3, 3), &mut out)
            .unwrap_err()
            .is_domain_error());
    }
}
