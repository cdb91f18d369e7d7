//! Argument and result validation around a manifold.
//!
//! [`ValidationDecorator`] overrides the geometric operations of its base.
//! Each override checks the inputs with the base's `check_point` and
//! `check_vector`, runs the base operation, then checks the output. Failures
//! are Domain errors whose context names the operation, for example
//! `"exp: tangent vector"`.
//!
//! Which checks run is controlled by a [`ValidationConfig`]. A base that does
//! not provide a validator is not checked.

use crate::{
    config::{validation_config, ValidationConfig},
    decorator::{BasePoint, BaseTangent, Decorator, DecoratorManifold, Operation, Resolution},
    error::Result,
    manifold::{Manifold, RetractionMethod, VectorTransportMethod},
    types::Scalar,
};
use std::sync::Arc;

/// Decorator that validates the arguments and results of its base.
#[derive(Debug, Clone)]
pub struct ValidationDecorator<M> {
    base: Arc<M>,
    config: ValidationConfig,
}

/// A manifold whose operations are validated.
pub type ValidationManifold<M> = DecoratorManifold<ValidationDecorator<M>>;

impl<M> ValidationDecorator<M> {
    /// Wraps `base` using the global validation configuration.
    pub fn new(base: M) -> Self {
        Self::with_config(base, validation_config().clone())
    }

    /// Wraps `base` with an explicit configuration.
    pub fn with_config(base: M, config: ValidationConfig) -> Self {
        Self::from_shared(Arc::new(base), config)
    }

    /// Wraps a shared base.
    pub fn from_shared(base: Arc<M>, config: ValidationConfig) -> Self {
        Self { base, config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }
}

/// Accepts a missing validator, tags any Domain error with the operation.
fn checked(result: Result<()>, op: Operation) -> Result<()> {
    match result {
        Err(err) if err.is_not_implemented() => Ok(()),
        other => other.map_err(|err| err.in_context(op)),
    }
}

impl<M> ValidationDecorator<M> {
    fn check_input_point<T: Scalar>(&self, op: Operation, point: &<M as Manifold<T>>::Point) -> Result<()>
    where
        M: Manifold<T>,
    {
        if self.config.check_inputs {
            checked(self.base.check_point(point), op)?;
        }
        Ok(())
    }

    fn check_input_vector<T: Scalar>(
        &self,
        op: Operation,
        point: &<M as Manifold<T>>::Point,
        vector: &<M as Manifold<T>>::TangentVector,
    ) -> Result<()>
    where
        M: Manifold<T>,
    {
        if self.config.check_inputs {
            checked(self.base.check_point(point), op)?;
            checked(self.base.check_vector(point, vector), op)?;
        }
        Ok(())
    }

    fn check_output_point<T: Scalar>(&self, op: Operation, point: &<M as Manifold<T>>::Point) -> Result<()>
    where
        M: Manifold<T>,
    {
        if self.config.check_outputs {
            checked(self.base.check_point(point), op)?;
        }
        Ok(())
    }

    fn check_output_vector<T: Scalar>(
        &self,
        op: Operation,
        point: &<M as Manifold<T>>::Point,
        vector: &<M as Manifold<T>>::TangentVector,
    ) -> Result<()>
    where
        M: Manifold<T>,
    {
        if self.config.check_outputs {
            checked(self.base.check_vector(point, vector), op)?;
        }
        Ok(())
    }
}

impl<T: Scalar, M: Manifold<T>> Decorator<T> for ValidationDecorator<M> {
    type Base = M;

    fn base(&self) -> &M {
        &self.base
    }

    fn decorator_name(&self) -> &str {
        "ValidationManifold"
    }

    fn resolution(op: Operation) -> Resolution {
        match op {
            Operation::Exp
            | Operation::Log
            | Operation::InnerProduct
            | Operation::Retract
            | Operation::InverseRetract
            | Operation::ZeroVector
            | Operation::VectorTransport
            | Operation::RandomTangent => Resolution::Override,
            _ => Resolution::Transparent,
        }
    }

    fn exp_into(&self, point: &BasePoint<T, Self>, tangent: &BaseTangent<T, Self>, result: &mut BasePoint<T, Self>) -> Result<()> {
        self.check_input_vector::<T>(Operation::Exp, point, tangent)?;
        self.base.exp_into(point, tangent, result)?;
        self.check_output_point::<T>(Operation::Exp, result)
    }

    fn log_into(&self, point: &BasePoint<T, Self>, other: &BasePoint<T, Self>, result: &mut BaseTangent<T, Self>) -> Result<()> {
        self.check_input_point::<T>(Operation::Log, point)?;
        self.check_input_point::<T>(Operation::Log, other)?;
        self.base.log_into(point, other, result)?;
        self.check_output_vector::<T>(Operation::Log, point, result)
    }

    fn inner_product(&self, point: &BasePoint<T, Self>, u: &BaseTangent<T, Self>, v: &BaseTangent<T, Self>) -> Result<T> {
        self.check_input_vector::<T>(Operation::InnerProduct, point, u)?;
        self.check_input_vector::<T>(Operation::InnerProduct, point, v)?;
        self.base.inner_product(point, u, v)
    }

    fn retract_into(
        &self,
        point: &BasePoint<T, Self>,
        tangent: &BaseTangent<T, Self>,
        method: RetractionMethod,
        result: &mut BasePoint<T, Self>,
    ) -> Result<()> {
        self.check_input_vector::<T>(Operation::Retract, point, tangent)?;
        self.base.retract_into(point, tangent, method, result)?;
        self.check_output_point::<T>(Operation::Retract, result)
    }

    fn inverse_retract_into(
        &self,
        point: &BasePoint<T, Self>,
        other: &BasePoint<T, Self>,
        method: RetractionMethod,
        result: &mut BaseTangent<T, Self>,
    ) -> Result<()> {
        self.check_input_point::<T>(Operation::InverseRetract, point)?;
        self.check_input_point::<T>(Operation::InverseRetract, other)?;
        self.base.inverse_retract_into(point, other, method, result)?;
        self.check_output_vector::<T>(Operation::InverseRetract, point, result)
    }

    fn zero_vector(&self, point: &BasePoint<T, Self>) -> Result<BaseTangent<T, Self>> {
        self.check_input_point::<T>(Operation::ZeroVector, point)?;
        let zero = self.base.zero_vector(point)?;
        self.check_output_vector::<T>(Operation::ZeroVector, point, &zero)?;
        Ok(zero)
    }

    fn vector_transport_to_into(
        &self,
        from: &BasePoint<T, Self>,
        vector: &BaseTangent<T, Self>,
        to: &BasePoint<T, Self>,
        method: VectorTransportMethod,
        result: &mut BaseTangent<T, Self>,
    ) -> Result<()> {
        self.check_input_vector::<T>(Operation::VectorTransport, from, vector)?;
        self.check_input_point::<T>(Operation::VectorTransport, to)?;
        self.base
            .vector_transport_to_into(from, vector, to, method, result)?;
        self.check_output_vector::<T>(Operation::VectorTransport, to, result)
    }

    fn random_tangent(&self, point: &BasePoint<T, Self>) -> Result<BaseTangent<T, Self>> {
        self.check_input_point::<T>(Operation::RandomTangent, point)?;
        let tangent = self.base.random_tangent(point)?;
        self.check_output_vector::<T>(Operation::RandomTangent, point, &tangent)?;
        Ok(tangent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationConfigBuilder;
    use crate::error::ManifoldError;
    use crate::test_manifolds::{PartialManifold, TestEuclidean};
    use crate::types::DVector;
    use approx::assert_relative_eq;

    #[test]
    fn test_valid_arguments_pass_through() {
        let manifold = ValidationDecorator::new(TestEuclidean::<f64>::new(2)).into_manifold();
        let x = DVector::from_vec(vec![1.0, 0.0]);
        let v = DVector::from_vec(vec![0.0, 1.0]);

        assert_eq!(manifold.name(), "ValidationManifold");
        assert_relative_eq!(manifold.exp(&x, &v).unwrap(), DVector::from_vec(vec![1.0, 1.0]));
        assert_relative_eq!(manifold.inner_product(&x, &v, &v).unwrap(), 1.0);
    }

    #[test]
    fn test_invalid_tangent_reports_operation() {
        let manifold = ValidationDecorator::new(TestEuclidean::<f64>::new(2)).into_manifold();
        let x = DVector::from_vec(vec![1.0, 0.0]);
        let v = DVector::from_vec(vec![0.0, 1.0, 2.0]);

        let err = manifold.exp(&x, &v).unwrap_err();
        assert_eq!(
            err,
            ManifoldError::domain("exp: tangent vector", "expected length 2, got 3")
        );
    }

    #[test]
    fn test_disabled_input_checks() {
        let config = ValidationConfigBuilder::new().check_inputs(false).build();
        let manifold = ValidationDecorator::with_config(TestEuclidean::<f64>::new(2), config).into_manifold();
        let x = DVector::from_vec(vec![1.0, 0.0, 0.0]);

        // the output check still catches the bad point
        let err = manifold.log(&x, &x).unwrap_err();
        assert!(err.is_domain_error());
        assert!(!manifold.decorator().config().check_inputs);
    }

    #[test]
    fn test_missing_validators_are_skipped() {
        let manifold = ValidationDecorator::new(PartialManifold::<f64>::new(2)).into_manifold();
        let x = DVector::zeros(2);
        let v = DVector::from_vec(vec![3.0, 4.0]);

        assert_relative_eq!(manifold.norm(&x, &v).unwrap(), 5.0);
        let err = manifold.exp(&x, &v).unwrap_err();
        assert_eq!(err, ManifoldError::not_implemented("exp", "PartialManifold"));
    }
}
