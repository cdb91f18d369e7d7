//! RiemannKit Manifolds - Concrete manifolds used as bases for decoration.
//!
//! This crate provides closed-form implementations of a few classical
//! manifolds. Each one implements the subset of the capability interface its
//! geometry supports; the remaining operations report `NotImplemented`.

pub mod euclidean;
pub mod rotations;
pub mod sphere;

// Re-export main manifolds for convenience
pub use euclidean::Euclidean;
pub use rotations::Rotations;
pub use sphere::Sphere;
