//! Group operations and their compiled form.
//!
//! A [`GroupOperation`] names the operation a group decorator adds to its
//! base: the built-in addition or multiplication of the point
//! representation, or a user-supplied [`CustomOperation`]. At construction
//! the decorator resolves it once into an [`OperationTable`] of closures, so
//! no per-call dispatch on the operation kind remains.

use crate::group::ActionDirection;
use crate::representation::GroupRepresentation;
use riemannkit_core::{error::Result, types::Scalar};
use std::fmt;
use std::sync::Arc;

/// Identity-like element for a point: `x ↦ e`.
pub type IdentityFn<P> = Arc<dyn Fn(&P) -> Result<P> + Send + Sync>;

/// Binary group operation `(x, y) ↦ x ∘ y`.
pub type ComposeFn<P> = Arc<dyn Fn(&P, &P) -> Result<P> + Send + Sync>;

/// Group inverse `x ↦ x⁻¹`.
pub type InverseFn<P> = Arc<dyn Fn(&P) -> Result<P> + Send + Sync>;

/// Composition written into a buffer.
pub type ComposeIntoFn<P> = Arc<dyn Fn(&P, &P, &mut P) -> Result<()> + Send + Sync>;

/// Inverse written into a buffer.
pub type InverseIntoFn<P> = Arc<dyn Fn(&P, &mut P) -> Result<()> + Send + Sync>;

/// Differential of the translation by `x` at `y`, applied to `v` and written
/// into a buffer.
pub type TranslateDiffIntoFn<P, V> =
    Arc<dyn Fn(&P, &P, &V, ActionDirection, &mut V) -> Result<()> + Send + Sync>;

/// Tag identifying the kind of a group operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupOperationKind {
    /// Elementwise addition
    Addition,
    /// Matrix multiplication
    Multiplication,
    /// User-supplied operation
    Custom,
}

impl fmt::Display for GroupOperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Addition => f.write_str("Addition"),
            Self::Multiplication => f.write_str("Multiplication"),
            Self::Custom => f.write_str("Custom"),
        }
    }
}

/// A user-supplied group operation.
pub struct CustomOperation<P> {
    name: String,
    identity: IdentityFn<P>,
    compose: ComposeFn<P>,
    inverse: InverseFn<P>,
}

impl<P> CustomOperation<P> {
    /// Creates a custom operation from its identity, composition and inverse.
    ///
    /// `identity(x)` returns the identity element with the representation of `x`.
    pub fn new<I, C, V>(name: impl Into<String>, identity: I, compose: C, inverse: V) -> Self
    where
        I: Fn(&P) -> Result<P> + Send + Sync + 'static,
        C: Fn(&P, &P) -> Result<P> + Send + Sync + 'static,
        V: Fn(&P) -> Result<P> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            identity: Arc::new(identity),
            compose: Arc::new(compose),
            inverse: Arc::new(inverse),
        }
    }

    /// Returns the name of the operation.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<P> Clone for CustomOperation<P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            identity: Arc::clone(&self.identity),
            compose: Arc::clone(&self.compose),
            inverse: Arc::clone(&self.inverse),
        }
    }
}

impl<P> fmt::Debug for CustomOperation<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomOperation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The operation turning a manifold into a group.
#[derive(Debug)]
pub enum GroupOperation<P> {
    /// `x + y`, identity zero, inverse `-x`.
    Addition,
    /// `x · y`, identity `I`, inverse `x⁻¹`.
    Multiplication,
    /// A user-supplied operation.
    Custom(CustomOperation<P>),
}

impl<P> Clone for GroupOperation<P> {
    fn clone(&self) -> Self {
        match self {
            Self::Addition => Self::Addition,
            Self::Multiplication => Self::Multiplication,
            Self::Custom(op) => Self::Custom(op.clone()),
        }
    }
}

impl<P> GroupOperation<P> {
    /// Returns the kind of this operation.
    pub fn kind(&self) -> GroupOperationKind {
        match self {
            Self::Addition => GroupOperationKind::Addition,
            Self::Multiplication => GroupOperationKind::Multiplication,
            Self::Custom(_) => GroupOperationKind::Custom,
        }
    }

    /// Returns the display name of this operation.
    pub fn name(&self) -> &str {
        match self {
            Self::Addition => "Addition",
            Self::Multiplication => "Multiplication",
            Self::Custom(op) => op.name(),
        }
    }
}

/// Closures implementing a group operation on points `P` and tangents `V`.
pub struct OperationTable<P, V> {
    pub(crate) identity: IdentityFn<P>,
    pub(crate) compose: ComposeFn<P>,
    pub(crate) compose_into: ComposeIntoFn<P>,
    pub(crate) inverse: InverseFn<P>,
    pub(crate) inverse_into: InverseIntoFn<P>,
    pub(crate) translate_diff: Option<TranslateDiffIntoFn<P, V>>,
}

impl<P: 'static, V: Clone + 'static> OperationTable<P, V> {
    /// Compiles a built-in or custom operation.
    pub(crate) fn compile<T>(operation: &GroupOperation<P>) -> Self
    where
        T: Scalar,
        P: GroupRepresentation<T>,
    {
        match operation {
            GroupOperation::Addition => Self {
                identity: Arc::new(|x: &P| -> Result<P> { Ok(x.additive_identity()) }),
                compose: Arc::new(|x: &P, y: &P| x.additive_compose(y)),
                compose_into: Arc::new(|x: &P, y: &P, out: &mut P| x.additive_compose_into(y, out)),
                inverse: Arc::new(|x: &P| -> Result<P> { Ok(x.additive_inverse()) }),
                inverse_into: Arc::new(|x: &P, out: &mut P| -> Result<()> {
                    x.additive_inverse_into(out);
                    Ok(())
                }),
                // translations are isometries with identity differential
                translate_diff: Some(Arc::new(
                    |_x: &P, _y: &P, v: &V, _direction: ActionDirection, out: &mut V| -> Result<()> {
                        out.clone_from(v);
                        Ok(())
                    },
                )),
            },
            GroupOperation::Multiplication => Self {
                identity: Arc::new(|x: &P| x.multiplicative_identity()),
                compose: Arc::new(|x: &P, y: &P| x.multiplicative_compose(y)),
                compose_into: Arc::new(|x: &P, y: &P, out: &mut P| x.multiplicative_compose_into(y, out)),
                inverse: Arc::new(|x: &P| x.multiplicative_inverse()),
                inverse_into: Arc::new(|x: &P, out: &mut P| x.multiplicative_inverse_into(out)),
                translate_diff: None,
            },
            GroupOperation::Custom(custom) => Self::from_custom(custom),
        }
    }
}

impl<P: 'static, V> OperationTable<P, V> {
    /// Compiles a custom operation, which needs no representation support.
    ///
    /// The buffered variants assign the result of the allocating closures.
    pub(crate) fn from_custom(custom: &CustomOperation<P>) -> Self {
        let compose = Arc::clone(&custom.compose);
        let inverse = Arc::clone(&custom.inverse);
        Self {
            identity: Arc::clone(&custom.identity),
            compose: Arc::clone(&custom.compose),
            compose_into: Arc::new(move |x: &P, y: &P, out: &mut P| -> Result<()> {
                *out = compose(x, y)?;
                Ok(())
            }),
            inverse: Arc::clone(&custom.inverse),
            inverse_into: Arc::new(move |x: &P, out: &mut P| -> Result<()> {
                *out = inverse(x)?;
                Ok(())
            }),
            translate_diff: None,
        }
    }
}

impl<P, V> Clone for OperationTable<P, V> {
    fn clone(&self) -> Self {
        Self {
            identity: Arc::clone(&self.identity),
            compose: Arc::clone(&self.compose),
            compose_into: Arc::clone(&self.compose_into),
            inverse: Arc::clone(&self.inverse),
            inverse_into: Arc::clone(&self.inverse_into),
            translate_diff: self.translate_diff.clone(),
        }
    }
}

impl<P, V> fmt::Debug for OperationTable<P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationTable")
            .field("translate_diff", &self.translate_diff.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riemannkit_core::types::DVector;

    #[test]
    fn test_operation_kinds() {
        let add = GroupOperation::<DVector<f64>>::Addition;
        assert_eq!(add.kind(), GroupOperationKind::Addition);
        assert_eq!(add.name(), "Addition");

        let custom = GroupOperation::Custom(CustomOperation::new(
            "Max",
            |x: &DVector<f64>| Ok(x.clone()),
            |x: &DVector<f64>, _y: &DVector<f64>| Ok(x.clone()),
            |x: &DVector<f64>| Ok(x.clone()),
        ));
        assert_eq!(custom.kind(), GroupOperationKind::Custom);
        assert_eq!(custom.name(), "Max");
        assert!(format!("{:?}", custom.clone()).contains("Max"));
    }

    #[test]
    fn test_compiled_addition() {
        let table = OperationTable::<DVector<f64>, DVector<f64>>::compile::<f64>(&GroupOperation::Addition);
        let x = DVector::from_vec(vec![1.0, 2.0]);
        let v = DVector::from_vec(vec![0.5, 0.5]);

        assert_eq!((table.compose)(&x, &x).unwrap(), DVector::from_vec(vec![2.0, 4.0]));
        assert_eq!((table.inverse)(&x).unwrap(), -&x);
        assert_eq!((table.identity)(&x).unwrap(), DVector::zeros(2));
        let mut out = DVector::zeros(2);
        (table.compose_into)(&x, &v, &mut out).unwrap();
        assert_eq!(out, DVector::from_vec(vec![1.5, 2.5]));
        (table.inverse_into)(&x, &mut out).unwrap();
        assert_eq!(out, -&x);

        let diff = table.translate_diff.as_ref().unwrap();
        diff(&x, &x, &v, ActionDirection::Right, &mut out).unwrap();
        assert_eq!(out, v);
    }

    #[test]
    fn test_custom_operation_fills_buffers() {
        let custom = CustomOperation::new(
            "Max",
            |x: &DVector<f64>| Ok(DVector::zeros(x.len())),
            |x: &DVector<f64>, y: &DVector<f64>| Ok(x.zip_map(y, f64::max)),
            |x: &DVector<f64>| Ok(x.clone()),
        );
        let table = OperationTable::<DVector<f64>, DVector<f64>>::from_custom(&custom);
        let mut out = DVector::zeros(1);
        (table.compose_into)(
            &DVector::from_vec(vec![1.0, 4.0]),
            &DVector::from_vec(vec![3.0, 2.0]),
            &mut out,
        )
        .unwrap();
        assert_eq!(out, DVector::from_vec(vec![3.0, 4.0]));
    }

    #[test]
    fn test_compiled_multiplication_has_no_differential() {
        let table = OperationTable::<DVector<f64>, DVector<f64>>::compile::<f64>(&GroupOperation::Multiplication);
        assert!(table.translate_diff.is_none());
        assert!((table.identity)(&DVector::zeros(2)).unwrap_err().is_not_implemented());
    }
}
