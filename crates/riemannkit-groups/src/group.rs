//! Lie group structure on top of a manifold.
//!
//! [`GroupDecorator`] adds a group operation to a base manifold. Every
//! manifold operation stays transparent, so the geometry is exactly the
//! base's; the group algebra is exposed through the [`LieGroup`] trait.
//!
//! # Identity short-circuits
//!
//! The symbolic [`Identity`] never reaches the underlying operation:
//!
//! - `compose(e, y) = y`, `compose(x, e) = x`, `compose(e, e) = e`
//! - `inverse(e) = e`
//! - `translate_diff(e, y, v) = v`
//!
//! An identity belonging to another group instance is rejected with a Domain
//! error. Clones of a group share its [`GroupId`] and accept each other's
//! identity.
//!
//! Decorators stacked on top of a group reach its algebra through
//! [`GroupLayer`], so `LieGroup` holds for every such stack.

use crate::identity::{GroupElement, GroupId, Identity};
use crate::layer::GroupLayer;
use crate::operation::{CustomOperation, GroupOperation, GroupOperationKind, OperationTable};
use crate::representation::GroupRepresentation;
use riemannkit_core::{
    config::validation_config,
    decorator::{BasePoint, BaseTangent, Decorator, DecoratorManifold},
    error::{ManifoldError, Result},
    manifold::Manifold,
    types::Scalar,
};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Side on which a group element acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionDirection {
    /// τ_x(y) = x ∘ y
    #[default]
    Left,
    /// τ_x(y) = y ∘ x
    Right,
}

/// Decorator turning its base into a group under an operation.
pub struct GroupDecorator<T: Scalar, M: Manifold<T>> {
    base: Arc<M>,
    operation: GroupOperation<M::Point>,
    table: OperationTable<M::Point, M::TangentVector>,
    id: GroupId,
    name: String,
    _phantom: PhantomData<T>,
}

/// A manifold with a group operation.
pub type GroupManifold<T, M> = DecoratorManifold<GroupDecorator<T, M>>;

impl<T: Scalar, M: Manifold<T>> GroupDecorator<T, M> {
    /// Equips `base` with a built-in or custom operation.
    pub fn new(base: M, operation: GroupOperation<M::Point>) -> Self
    where
        M::Point: GroupRepresentation<T>,
        M::TangentVector: 'static,
    {
        Self::from_shared(Arc::new(base), operation)
    }

    /// Equips a shared base with a built-in or custom operation.
    pub fn from_shared(base: Arc<M>, operation: GroupOperation<M::Point>) -> Self
    where
        M::Point: GroupRepresentation<T>,
        M::TangentVector: 'static,
    {
        let table = OperationTable::compile::<T>(&operation);
        Self::assemble(base, operation, table)
    }

    /// Equips `base` with a custom operation.
    ///
    /// Unlike [`GroupDecorator::new`], the point representation needs no
    /// built-in group structure.
    pub fn with_custom(base: M, operation: CustomOperation<M::Point>) -> Self
    where
        M::Point: 'static,
    {
        let table = OperationTable::from_custom(&operation);
        Self::assemble(Arc::new(base), GroupOperation::Custom(operation), table)
    }

    fn assemble(
        base: Arc<M>,
        operation: GroupOperation<M::Point>,
        table: OperationTable<M::Point, M::TangentVector>,
    ) -> Self {
        let name = format!("{}Group({})", operation.name(), base.name());
        Self {
            base,
            operation,
            table,
            id: GroupId::new(),
            name,
            _phantom: PhantomData,
        }
    }

    /// Registers the differential of the translations.
    ///
    /// `f(x, y, v, direction)` maps `v ∈ T_y` to the tangent space at the
    /// translated point.
    #[must_use]
    pub fn with_translate_diff<F>(self, f: F) -> Self
    where
        M::Point: 'static,
        M::TangentVector: 'static,
        F: Fn(&M::Point, &M::Point, &M::TangentVector, ActionDirection) -> Result<M::TangentVector>
            + Send
            + Sync
            + 'static,
    {
        self.with_translate_diff_into(
            move |x: &M::Point, y: &M::Point, v: &M::TangentVector, direction: ActionDirection, out: &mut M::TangentVector| {
                *out = f(x, y, v, direction)?;
                Ok(())
            },
        )
    }

    /// Registers the differential of the translations, writing into a buffer.
    #[must_use]
    pub fn with_translate_diff_into<F>(mut self, f: F) -> Self
    where
        F: Fn(&M::Point, &M::Point, &M::TangentVector, ActionDirection, &mut M::TangentVector) -> Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.table.translate_diff = Some(Arc::new(f));
        self
    }

    /// Returns the group operation.
    pub fn operation(&self) -> &GroupOperation<M::Point> {
        &self.operation
    }
}

impl<T: Scalar, M: Manifold<T>> Clone for GroupDecorator<T, M> {
    fn clone(&self) -> Self {
        Self {
            base: Arc::clone(&self.base),
            operation: self.operation.clone(),
            table: self.table.clone(),
            id: self.id.clone(),
            name: self.name.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T: Scalar, M: Manifold<T>> fmt::Debug for GroupDecorator<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupDecorator")
            .field("base", &self.base)
            .field("operation", &self.operation.name())
            .field("table", &self.table)
            .finish()
    }
}

impl<T: Scalar, M: Manifold<T>> Decorator<T> for GroupDecorator<T, M> {
    type Base = M;

    fn base(&self) -> &M {
        &self.base
    }

    fn decorator_name(&self) -> &str {
        &self.name
    }
}

impl<T: Scalar, M: Manifold<T>> GroupLayer<T> for GroupDecorator<T, M> {
    fn operation_kind(&self) -> GroupOperationKind {
        self.operation.kind()
    }

    fn group_id(&self) -> &GroupId {
        &self.id
    }

    fn identity_like(&self, x: &BasePoint<T, Self>) -> Result<BasePoint<T, Self>> {
        (self.table.identity)(x)
    }

    fn compose_points(&self, x: &BasePoint<T, Self>, y: &BasePoint<T, Self>) -> Result<BasePoint<T, Self>> {
        (self.table.compose)(x, y)
    }

    fn compose_into(&self, x: &BasePoint<T, Self>, y: &BasePoint<T, Self>, result: &mut BasePoint<T, Self>) -> Result<()> {
        (self.table.compose_into)(x, y, result)
    }

    fn inverse_point(&self, x: &BasePoint<T, Self>) -> Result<BasePoint<T, Self>> {
        (self.table.inverse)(x)
    }

    fn inverse_into(&self, x: &BasePoint<T, Self>, result: &mut BasePoint<T, Self>) -> Result<()> {
        (self.table.inverse_into)(x, result)
    }

    fn translate_diff_points(
        &self,
        x: &BasePoint<T, Self>,
        y: &BasePoint<T, Self>,
        v: &BaseTangent<T, Self>,
        direction: ActionDirection,
    ) -> Result<BaseTangent<T, Self>> {
        let mut result = v.clone();
        self.translate_diff_into(x, y, v, direction, &mut result)?;
        Ok(result)
    }

    fn translate_diff_into(
        &self,
        x: &BasePoint<T, Self>,
        y: &BasePoint<T, Self>,
        v: &BaseTangent<T, Self>,
        direction: ActionDirection,
        result: &mut BaseTangent<T, Self>,
    ) -> Result<()> {
        match &self.table.translate_diff {
            Some(diff) => diff(x, y, v, direction, result),
            None => Err(ManifoldError::not_implemented("translate_diff", &self.name)),
        }
    }
}

fn check_owner<T: Scalar, G: LieGroup<T>>(group: &G, identity: &Identity<'_, T, G>, op: &str) -> Result<()> {
    if identity.belongs_to(group) {
        Ok(())
    } else {
        Err(ManifoldError::domain(
            op,
            format!("identity element of another group used with {}", group.name()),
        ))
    }
}

/// Group algebra of a manifold.
///
/// Implementors provide the operation on concrete points; the provided
/// methods handle the symbolic identity and the translation conventions.
pub trait LieGroup<T: Scalar>: Manifold<T> + Sized {
    /// Returns the kind of the group operation.
    fn operation_kind(&self) -> GroupOperationKind;

    /// Returns the id shared by this group and its clones.
    fn group_id(&self) -> &GroupId;

    /// Returns the identity element with the representation of `x`.
    fn identity_like(&self, x: &Self::Point) -> Result<Self::Point>;

    /// Composes two points.
    fn compose_points(&self, x: &Self::Point, y: &Self::Point) -> Result<Self::Point>;

    /// Inverts a point.
    fn inverse_point(&self, x: &Self::Point) -> Result<Self::Point>;

    /// Differential of the translation by `x` at `y`, applied to `v ∈ T_y`.
    fn translate_diff_points(
        &self,
        x: &Self::Point,
        y: &Self::Point,
        v: &Self::TangentVector,
        direction: ActionDirection,
    ) -> Result<Self::TangentVector>;

    /// Returns the symbolic identity of this group.
    fn identity_element(&self) -> Identity<'_, T, Self> {
        Identity::new(self)
    }

    /// Computes the inverse of `x`.
    fn inverse<'g>(&'g self, x: &GroupElement<'g, T, Self>) -> Result<GroupElement<'g, T, Self>> {
        match x {
            GroupElement::Identity(e) => {
                check_owner(self, e, "inverse")?;
                Ok(GroupElement::Identity(*e))
            }
            GroupElement::Point(p) => Ok(GroupElement::Point(self.inverse_point(p)?)),
        }
    }

    /// Computes `x ∘ y`.
    fn compose<'g>(
        &'g self,
        x: &GroupElement<'g, T, Self>,
        y: &GroupElement<'g, T, Self>,
    ) -> Result<GroupElement<'g, T, Self>> {
        match (x, y) {
            (GroupElement::Identity(a), GroupElement::Identity(b)) => {
                check_owner(self, a, "compose")?;
                check_owner(self, b, "compose")?;
                Ok(GroupElement::Identity(*a))
            }
            (GroupElement::Identity(e), GroupElement::Point(p))
            | (GroupElement::Point(p), GroupElement::Identity(e)) => {
                check_owner(self, e, "compose")?;
                Ok(GroupElement::Point(p.clone()))
            }
            (GroupElement::Point(a), GroupElement::Point(b)) => {
                Ok(GroupElement::Point(self.compose_points(a, b)?))
            }
        }
    }

    /// Translates `y` by `x`: `x ∘ y` on the left, `y ∘ x` on the right.
    fn translate<'g>(
        &'g self,
        x: &GroupElement<'g, T, Self>,
        y: &GroupElement<'g, T, Self>,
        direction: ActionDirection,
    ) -> Result<GroupElement<'g, T, Self>> {
        match direction {
            ActionDirection::Left => self.compose(x, y),
            ActionDirection::Right => self.compose(y, x),
        }
    }

    /// Translates `y` by the inverse of `x`.
    fn inverse_translate<'g>(
        &'g self,
        x: &GroupElement<'g, T, Self>,
        y: &GroupElement<'g, T, Self>,
        direction: ActionDirection,
    ) -> Result<GroupElement<'g, T, Self>> {
        let inv = self.inverse(x)?;
        self.translate(&inv, y, direction)
    }

    /// Differential of the translation by `x` at `y`, applied to `v ∈ T_y`.
    ///
    /// Translation by the identity is the identity map on tangent vectors.
    fn translate_diff<'g>(
        &'g self,
        x: &GroupElement<'g, T, Self>,
        y: &GroupElement<'g, T, Self>,
        v: &Self::TangentVector,
        direction: ActionDirection,
    ) -> Result<Self::TangentVector> {
        match (x, y) {
            (GroupElement::Identity(e), _) => {
                check_owner(self, e, "translate_diff")?;
                Ok(v.clone())
            }
            (GroupElement::Point(xp), GroupElement::Identity(e)) => {
                check_owner(self, e, "translate_diff")?;
                let yp = self.identity_like(xp)?;
                self.translate_diff_points(xp, &yp, v, direction)
            }
            (GroupElement::Point(xp), GroupElement::Point(yp)) => {
                self.translate_diff_points(xp, yp, v, direction)
            }
        }
    }

    /// Differential of the translation by the inverse of `x`.
    fn inverse_translate_diff<'g>(
        &'g self,
        x: &GroupElement<'g, T, Self>,
        y: &GroupElement<'g, T, Self>,
        v: &Self::TangentVector,
        direction: ActionDirection,
    ) -> Result<Self::TangentVector> {
        let inv = self.inverse(x)?;
        self.translate_diff(&inv, y, v, direction)
    }

    /// Returns true if `x` is the identity of this group.
    ///
    /// Points are compared with the configured approximate tolerance.
    fn is_identity(&self, x: &GroupElement<'_, T, Self>) -> Result<bool> {
        match x {
            GroupElement::Identity(e) => Ok(e.belongs_to(self)),
            GroupElement::Point(p) => {
                let tolerance = validation_config().approx_tolerance::<T>();
                self.identity_element().is_approx(p, tolerance)
            }
        }
    }

    /// Composes two points into `result`.
    fn compose_into(&self, x: &Self::Point, y: &Self::Point, result: &mut Self::Point) -> Result<()> {
        *result = self.compose_points(x, y)?;
        Ok(())
    }

    /// Inverts a point into `result`.
    fn inverse_into(&self, x: &Self::Point, result: &mut Self::Point) -> Result<()> {
        *result = self.inverse_point(x)?;
        Ok(())
    }

    /// Translation differential on points, written into `result`.
    fn translate_diff_into(
        &self,
        x: &Self::Point,
        y: &Self::Point,
        v: &Self::TangentVector,
        direction: ActionDirection,
        result: &mut Self::TangentVector,
    ) -> Result<()> {
        *result = self.translate_diff_points(x, y, v, direction)?;
        Ok(())
    }
}
