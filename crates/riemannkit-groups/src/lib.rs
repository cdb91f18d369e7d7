//! RiemannKit Groups - Lie group structure for decorated manifolds.
//!
//! A [`GroupDecorator`] equips a base manifold with a group operation. The
//! geometry of the base is left untouched, while the [`LieGroup`] trait adds
//! composition, inversion, translations and their differentials.
//!
//! # Example
//!
//! ```rust
//! use riemannkit_groups::prelude::*;
//! use nalgebra::DVector;
//!
//! let group = translation_group::<f64>(2).unwrap();
//! let x = GroupElement::Point(DVector::from_vec(vec![1.0, 2.0]));
//! let e = GroupElement::Identity(group.identity_element());
//!
//! let y = group.compose(&e, &x).unwrap();
//! assert_eq!(y.as_point(), x.as_point());
//! ```

pub mod constructors;
pub mod group;
pub mod identity;
pub mod layer;
pub mod operation;
pub mod representation;

pub use constructors::{special_orthogonal, translation_group};
pub use group::{ActionDirection, GroupDecorator, GroupManifold, LieGroup};
pub use identity::{GroupElement, GroupId, Identity};
pub use layer::GroupLayer;
pub use operation::{CustomOperation, GroupOperation, GroupOperationKind};
pub use representation::GroupRepresentation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::constructors::{special_orthogonal, translation_group};
    pub use crate::group::{ActionDirection, GroupDecorator, GroupManifold, LieGroup};
    pub use crate::identity::{GroupElement, GroupId, Identity};
    pub use crate::layer::GroupLayer;
    pub use crate::operation::{CustomOperation, GroupOperation, GroupOperationKind};
    pub use crate::representation::GroupRepresentation;
}
