//! The identity element and group elements.
//!
//! The identity of a group has no single array representation: its shape
//! depends on the points it is combined with. [`Identity`] is therefore a
//! symbolic element tied to one group instance, and [`GroupElement`] is
//! either that symbol or a concrete point.
//!
//! Group instances are told apart by a [`GroupId`]. Clones of a group share
//! its id, so they accept each other's identity.

use crate::group::LieGroup;
use riemannkit_core::{error::Result, manifold::Manifold, types::Scalar};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Tag shared by a group and its clones.
#[derive(Debug, Clone)]
pub struct GroupId(Arc<()>);

impl GroupId {
    /// Creates an id distinct from every existing one.
    pub fn new() -> Self {
        Self(Arc::new(()))
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for GroupId {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for GroupId {}

/// Symbolic identity element of the group `G`.
///
/// Two identities are equal exactly when their groups share a [`GroupId`].
pub struct Identity<'g, T, G> {
    group: &'g G,
    _phantom: PhantomData<T>,
}

impl<'g, T: Scalar, G: Manifold<T>> Identity<'g, T, G> {
    /// Creates the identity of `group`.
    pub fn new(group: &'g G) -> Self {
        Self {
            group,
            _phantom: PhantomData,
        }
    }

    /// Returns the group this identity belongs to.
    pub fn group(&self) -> &'g G {
        self.group
    }

    /// Returns true if this is the identity of `group` or of a clone of it.
    pub fn belongs_to(&self, group: &G) -> bool
    where
        G: LieGroup<T>,
    {
        self.group.group_id() == group.group_id()
    }

    /// Returns the identity with the representation of `like`.
    pub fn materialize(&self, like: &G::Point) -> Result<G::Point>
    where
        G: LieGroup<T>,
    {
        self.group.identity_like(like)
    }

    /// Returns true if `point` approximates the identity within `tolerance`.
    pub fn is_approx(&self, point: &G::Point, tolerance: T) -> Result<bool>
    where
        G: LieGroup<T>,
    {
        let identity = self.group.identity_like(point)?;
        self.group.is_approx_point(&identity, point, tolerance)
    }
}

impl<T, G> Clone for Identity<'_, T, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, G> Copy for Identity<'_, T, G> {}

impl<T: Scalar, G: LieGroup<T>> PartialEq for Identity<'_, T, G> {
    fn eq(&self, other: &Self) -> bool {
        self.group.group_id() == other.group.group_id()
    }
}

impl<T: Scalar, G: LieGroup<T>> Eq for Identity<'_, T, G> {}

impl<T: Scalar, G: Manifold<T>> fmt::Debug for Identity<'_, T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.group.name())
    }
}

/// An element of the group `G`: the symbolic identity or a point.
pub enum GroupElement<'g, T, G: Manifold<T>>
where
    T: Scalar,
{
    /// The identity of the group.
    Identity(Identity<'g, T, G>),
    /// A concrete point.
    Point(G::Point),
}

impl<'g, T: Scalar, G: Manifold<T>> GroupElement<'g, T, G> {
    /// Returns true for the symbolic identity.
    pub fn is_identity_symbol(&self) -> bool {
        matches!(self, Self::Identity(_))
    }

    /// Returns the point, if this element is one.
    pub fn as_point(&self) -> Option<&G::Point> {
        match self {
            Self::Identity(_) => None,
            Self::Point(p) => Some(p),
        }
    }

    /// Returns a concrete point, materializing the identity like `like`.
    pub fn to_point(&self, like: &G::Point) -> Result<G::Point>
    where
        G: LieGroup<T>,
    {
        match self {
            Self::Identity(e) => e.materialize(like),
            Self::Point(p) => Ok(p.clone()),
        }
    }
}

impl<'g, T: Scalar, G: Manifold<T>> From<Identity<'g, T, G>> for GroupElement<'g, T, G> {
    fn from(identity: Identity<'g, T, G>) -> Self {
        Self::Identity(identity)
    }
}

impl<T: Scalar, G: Manifold<T>> Clone for GroupElement<'_, T, G> {
    fn clone(&self) -> Self {
        match self {
            Self::Identity(e) => Self::Identity(*e),
            Self::Point(p) => Self::Point(p.clone()),
        }
    }
}

impl<T: Scalar, G: Manifold<T>> fmt::Debug for GroupElement<'_, T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity(e) => fmt::Debug::fmt(e, f),
            Self::Point(p) => f.debug_tuple("Point").field(p).finish(),
        }
    }
}
