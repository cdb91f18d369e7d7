//! Ready-made groups over the manifolds of `riemannkit-manifolds`.

use crate::group::{ActionDirection, GroupDecorator, GroupManifold};
use crate::operation::GroupOperation;
use riemannkit_core::{
    decorator::Decorator,
    error::Result,
    types::{DMatrix, Scalar},
};
use riemannkit_manifolds::{Euclidean, Rotations};

/// The translation group (ℝⁿ, +).
///
/// # Errors
/// Returns a Domain error if `n` is zero.
pub fn translation_group<T: Scalar>(n: usize) -> Result<GroupManifold<T, Euclidean<T>>> {
    let base = Euclidean::new(n)?;
    Ok(GroupDecorator::<T, Euclidean<T>>::new(base, GroupOperation::Addition).into_manifold())
}

/// The special orthogonal group SO(n) under matrix multiplication.
///
/// Translations act on tangent vectors by the matrix product on the side of
/// the action.
///
/// # Errors
/// Returns a Domain error if `n` < 2.
pub fn special_orthogonal<T: Scalar>(n: usize) -> Result<GroupManifold<T, Rotations<T>>> {
    let base = Rotations::new(n)?;
    let rotations = base.clone();
    let translate_diff = move |x: &DMatrix<T>,
                               _y: &DMatrix<T>,
                               v: &DMatrix<T>,
                               direction: ActionDirection,
                               result: &mut DMatrix<T>|
          -> Result<()> {
        match direction {
            ActionDirection::Left => rotations.left_multiply_tangent_into(x, v, result),
            ActionDirection::Right => rotations.right_multiply_tangent_into(x, v, result),
        }
    };
    let decorator = GroupDecorator::<T, Rotations<T>>::new(base, GroupOperation::Multiplication)
        .with_translate_diff_into(translate_diff);
    Ok(decorator.into_manifold())
}
