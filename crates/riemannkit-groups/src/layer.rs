//! Group algebra across decorator stacks.
//!
//! The group operations are not part of the routed manifold operations, so
//! they resolve through [`GroupLayer`]: a decorator either defines the
//! algebra itself, as [`GroupDecorator`](crate::group::GroupDecorator) does,
//! or forwards it to its base. Every `DecoratorManifold` whose decorator is a
//! group layer is a [`LieGroup`].
//!
//! The validation and metric decorators forward, so a validated or re-metrized
//! group keeps its algebra. A custom decorator opts in the same way:
//!
//! ```rust,ignore
//! impl<T: Scalar, M: LieGroup<T>> GroupLayer<T> for Labelled<M> {
//!     fn operation_kind(&self) -> GroupOperationKind {
//!         self.base().operation_kind()
//!     }
//!     // ...
//! }
//! ```

use crate::group::{ActionDirection, LieGroup};
use crate::identity::GroupId;
use crate::operation::GroupOperationKind;
use riemannkit_core::{
    decorator::{BasePoint, BaseTangent, Decorator, DecoratorManifold},
    decorators::{Metric, MetricDecorator, ValidationDecorator},
    error::Result,
    manifold::Manifold,
    types::Scalar,
};

/// A decorator that defines or forwards a group operation.
pub trait GroupLayer<T: Scalar>: Decorator<T> {
    /// Returns the kind of the group operation.
    fn operation_kind(&self) -> GroupOperationKind;

    /// Returns the id shared by the group and its clones.
    fn group_id(&self) -> &GroupId;

    /// Returns the identity element with the representation of `x`.
    fn identity_like(&self, x: &BasePoint<T, Self>) -> Result<BasePoint<T, Self>>;

    /// Composes two points.
    fn compose_points(&self, x: &BasePoint<T, Self>, y: &BasePoint<T, Self>) -> Result<BasePoint<T, Self>>;

    /// Composes two points into `result`.
    fn compose_into(&self, x: &BasePoint<T, Self>, y: &BasePoint<T, Self>, result: &mut BasePoint<T, Self>) -> Result<()> {
        *result = self.compose_points(x, y)?;
        Ok(())
    }

    /// Inverts a point.
    fn inverse_point(&self, x: &BasePoint<T, Self>) -> Result<BasePoint<T, Self>>;

    /// Inverts a point into `result`.
    fn inverse_into(&self, x: &BasePoint<T, Self>, result: &mut BasePoint<T, Self>) -> Result<()> {
        *result = self.inverse_point(x)?;
        Ok(())
    }

    /// Differential of the translation by `x` at `y`, applied to `v`.
    fn translate_diff_points(
        &self,
        x: &BasePoint<T, Self>,
        y: &BasePoint<T, Self>,
        v: &BaseTangent<T, Self>,
        direction: ActionDirection,
    ) -> Result<BaseTangent<T, Self>>;

    /// Translation differential written into `result`.
    fn translate_diff_into(
        &self,
        x: &BasePoint<T, Self>,
        y: &BasePoint<T, Self>,
        v: &BaseTangent<T, Self>,
        direction: ActionDirection,
        result: &mut BaseTangent<T, Self>,
    ) -> Result<()> {
        *result = self.translate_diff_points(x, y, v, direction)?;
        Ok(())
    }
}

impl<T: Scalar, D: GroupLayer<T>> LieGroup<T> for DecoratorManifold<D> {
    fn operation_kind(&self) -> GroupOperationKind {
        <D as GroupLayer<T>>::operation_kind(self.decorator())
    }

    fn group_id(&self) -> &GroupId {
        <D as GroupLayer<T>>::group_id(self.decorator())
    }

    fn identity_like(&self, x: &Self::Point) -> Result<Self::Point> {
        <D as GroupLayer<T>>::identity_like(self.decorator(), x)
    }

    fn compose_points(&self, x: &Self::Point, y: &Self::Point) -> Result<Self::Point> {
        <D as GroupLayer<T>>::compose_points(self.decorator(), x, y)
    }

    fn inverse_point(&self, x: &Self::Point) -> Result<Self::Point> {
        <D as GroupLayer<T>>::inverse_point(self.decorator(), x)
    }

    fn translate_diff_points(
        &self,
        x: &Self::Point,
        y: &Self::Point,
        v: &Self::TangentVector,
        direction: ActionDirection,
    ) -> Result<Self::TangentVector> {
        <D as GroupLayer<T>>::translate_diff_points(self.decorator(), x, y, v, direction)
    }

    fn compose_into(&self, x: &Self::Point, y: &Self::Point, result: &mut Self::Point) -> Result<()> {
        <D as GroupLayer<T>>::compose_into(self.decorator(), x, y, result)
    }

    fn inverse_into(&self, x: &Self::Point, result: &mut Self::Point) -> Result<()> {
        <D as GroupLayer<T>>::inverse_into(self.decorator(), x, result)
    }

    fn translate_diff_into(
        &self,
        x: &Self::Point,
        y: &Self::Point,
        v: &Self::TangentVector,
        direction: ActionDirection,
        result: &mut Self::TangentVector,
    ) -> Result<()> {
        <D as GroupLayer<T>>::translate_diff_into(self.decorator(), x, y, v, direction, result)
    }
}

impl<T: Scalar, M: LieGroup<T>> GroupLayer<T> for ValidationDecorator<M> {
    fn operation_kind(&self) -> GroupOperationKind {
        group_of::<T, _>(self).operation_kind()
    }

    fn group_id(&self) -> &GroupId {
        group_of::<T, _>(self).group_id()
    }

    fn identity_like(&self, x: &M::Point) -> Result<M::Point> {
        group_of::<T, _>(self).identity_like(x)
    }

    fn compose_points(&self, x: &M::Point, y: &M::Point) -> Result<M::Point> {
        group_of::<T, _>(self).compose_points(x, y)
    }

    fn compose_into(&self, x: &M::Point, y: &M::Point, result: &mut M::Point) -> Result<()> {
        group_of::<T, _>(self).compose_into(x, y, result)
    }

    fn inverse_point(&self, x: &M::Point) -> Result<M::Point> {
        group_of::<T, _>(self).inverse_point(x)
    }

    fn inverse_into(&self, x: &M::Point, result: &mut M::Point) -> Result<()> {
        group_of::<T, _>(self).inverse_into(x, result)
    }

    fn translate_diff_points(
        &self,
        x: &M::Point,
        y: &M::Point,
        v: &M::TangentVector,
        direction: ActionDirection,
    ) -> Result<M::TangentVector> {
        group_of::<T, _>(self).translate_diff_points(x, y, v, direction)
    }

    fn translate_diff_into(
        &self,
        x: &M::Point,
        y: &M::Point,
        v: &M::TangentVector,
        direction: ActionDirection,
        result: &mut M::TangentVector,
    ) -> Result<()> {
        group_of::<T, _>(self).translate_diff_into(x, y, v, direction, result)
    }
}

impl<T, M, G> GroupLayer<T> for MetricDecorator<M, G>
where
    T: Scalar,
    M: LieGroup<T>,
    G: Metric<T, M>,
{
    fn operation_kind(&self) -> GroupOperationKind {
        group_of::<T, _>(self).operation_kind()
    }

    fn group_id(&self) -> &GroupId {
        group_of::<T, _>(self).group_id()
    }

    fn identity_like(&self, x: &M::Point) -> Result<M::Point> {
        group_of::<T, _>(self).identity_like(x)
    }

    fn compose_points(&self, x: &M::Point, y: &M::Point) -> Result<M::Point> {
        group_of::<T, _>(self).compose_points(x, y)
    }

    fn compose_into(&self, x: &M::Point, y: &M::Point, result: &mut M::Point) -> Result<()> {
        group_of::<T, _>(self).compose_into(x, y, result)
    }

    fn inverse_point(&self, x: &M::Point) -> Result<M::Point> {
        group_of::<T, _>(self).inverse_point(x)
    }

    fn inverse_into(&self, x: &M::Point, result: &mut M::Point) -> Result<()> {
        group_of::<T, _>(self).inverse_into(x, result)
    }

    fn translate_diff_points(
        &self,
        x: &M::Point,
        y: &M::Point,
        v: &M::TangentVector,
        direction: ActionDirection,
    ) -> Result<M::TangentVector> {
        group_of::<T, _>(self).translate_diff_points(x, y, v, direction)
    }

    fn translate_diff_into(
        &self,
        x: &M::Point,
        y: &M::Point,
        v: &M::TangentVector,
        direction: ActionDirection,
        result: &mut M::TangentVector,
    ) -> Result<()> {
        group_of::<T, _>(self).translate_diff_into(x, y, v, direction, result)
    }
}

/// The group a forwarding layer wraps.
fn group_of<T: Scalar, D: Decorator<T>>(layer: &D) -> &D::Base
where
    D::Base: LieGroup<T>,
{
    layer.base()
}
