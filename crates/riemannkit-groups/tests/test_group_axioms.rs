//! Group axioms and identity handling for the built-in groups.

use approx::assert_relative_eq;
use nalgebra::{DMatrix, DVector};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use riemannkit_core::prelude::*;
use riemannkit_groups::prelude::*;
use riemannkit_manifolds::{Euclidean, Rotations};

fn point(values: &[f64]) -> GroupElement<'static, f64, GroupManifold<f64, Euclidean<f64>>> {
    GroupElement::Point(DVector::from_column_slice(values))
}

fn unwrap_point<G: Manifold<f64>>(element: GroupElement<'_, f64, G>) -> G::Point {
    match element {
        GroupElement::Point(p) => p,
        GroupElement::Identity(_) => panic!("expected a point"),
    }
}

/// Custom operation whose closures fail when called.
fn tripwire() -> CustomOperation<DVector<f64>> {
    CustomOperation::new(
        "Tripwire",
        |_x: &DVector<f64>| -> Result<DVector<f64>> { Err(ManifoldError::numerical_error("identity called")) },
        |_x: &DVector<f64>, _y: &DVector<f64>| -> Result<DVector<f64>> {
            Err(ManifoldError::numerical_error("compose called"))
        },
        |_x: &DVector<f64>| -> Result<DVector<f64>> { Err(ManifoldError::numerical_error("inverse called")) },
    )
}

#[test]
fn test_identity_short_circuits_custom_operation() {
    let group = GroupDecorator::<f64, _>::with_custom(Euclidean::<f64>::new(2).unwrap(), tripwire()).into_manifold();
    assert_eq!(group.operation_kind(), GroupOperationKind::Custom);
    assert_eq!(group.name(), "TripwireGroup(Euclidean)");

    let e = GroupElement::Identity(group.identity_element());
    let x = GroupElement::Point(DVector::from_vec(vec![3.0, -1.0]));

    assert_eq!(unwrap_point(group.compose(&e, &x).unwrap()), DVector::from_vec(vec![3.0, -1.0]));
    assert_eq!(unwrap_point(group.compose(&x, &e).unwrap()), DVector::from_vec(vec![3.0, -1.0]));
    assert!(group.compose(&e, &e).unwrap().is_identity_symbol());
    assert!(group.inverse(&e).unwrap().is_identity_symbol());

    // concrete points do reach the closures
    let err = group.compose(&x, &x).unwrap_err();
    assert!(matches!(err, ManifoldError::NumericalError { .. }));
}

#[test]
fn test_translate_diff_by_identity_is_identity_map() {
    let group = special_orthogonal::<f64>(3).unwrap();
    let y = group.random_point().unwrap();
    let v = group.random_tangent(&y).unwrap();
    let e = GroupElement::Identity(group.identity_element());

    for direction in [ActionDirection::Left, ActionDirection::Right] {
        let w = group
            .translate_diff(&e, &GroupElement::Point(y.clone()), &v, direction)
            .unwrap();
        assert_eq!(w, v);
    }
}

#[test]
fn test_translate_diff_at_identity_materializes() {
    let group = special_orthogonal::<f64>(3).unwrap();
    let x = group.random_point().unwrap();
    let identity = DMatrix::<f64>::identity(3, 3);
    let v = group.random_tangent(&identity).unwrap();
    let e = GroupElement::Identity(group.identity_element());

    let w = group
        .translate_diff(&GroupElement::Point(x.clone()), &e, &v, ActionDirection::Left)
        .unwrap();
    assert_relative_eq!(w, &x * &v, epsilon = 1e-12);
    assert!(group.is_vector(&x, &w, true).unwrap());
}

#[test]
fn test_so3_translate_diff_lands_in_translated_tangent_space() {
    let group = special_orthogonal::<f64>(3).unwrap();
    let x = group.random_point().unwrap();
    let y = group.random_point().unwrap();
    let v = group.random_tangent(&y).unwrap();
    let gx = GroupElement::Point(x.clone());
    let gy = GroupElement::Point(y.clone());

    let left = group.translate_diff(&gx, &gy, &v, ActionDirection::Left).unwrap();
    assert!(group.is_vector(&(&x * &y), &left, true).unwrap());

    let right = group.translate_diff(&gx, &gy, &v, ActionDirection::Right).unwrap();
    assert!(group.is_vector(&(&y * &x), &right, true).unwrap());

    // the inverse translation undoes the forward one
    let moved = unwrap_point(group.translate(&gx, &gy, ActionDirection::Left).unwrap());
    let back = group
        .inverse_translate_diff(&gx, &GroupElement::Point(moved), &left, ActionDirection::Left)
        .unwrap();
    assert_relative_eq!(back, v, epsilon = 1e-10);
}

#[test]
fn test_multiplication_without_differential() {
    let group = GroupDecorator::<f64, _>::new(Rotations::<f64>::new(3).unwrap(), GroupOperation::Multiplication)
        .into_manifold();
    let x = group.random_point().unwrap();
    let v = group.random_tangent(&x).unwrap();
    let gx = GroupElement::Point(x);

    let err = group.translate_diff(&gx, &gx, &v, ActionDirection::Left).unwrap_err();
    assert!(err.is_not_implemented());
}

#[test]
fn test_so3_axioms() {
    let group = special_orthogonal::<f64>(3).unwrap();
    let a = GroupElement::Point(group.random_point().unwrap());
    let b = GroupElement::Point(group.random_point().unwrap());
    let c = GroupElement::Point(group.random_point().unwrap());

    let ab_c = group.compose(&group.compose(&a, &b).unwrap(), &c).unwrap();
    let a_bc = group.compose(&a, &group.compose(&b, &c).unwrap()).unwrap();
    assert_relative_eq!(unwrap_point(ab_c), unwrap_point(a_bc), epsilon = 1e-12);

    let a_inv = group.inverse(&a).unwrap();
    let left = group.compose(&a_inv, &a).unwrap();
    let right = group.compose(&a, &a_inv).unwrap();
    assert!(group.is_identity(&left).unwrap());
    assert!(group.is_identity(&right).unwrap());
    assert!(!group.is_identity(&a).unwrap());

    let moved = group.translate(&a, &b, ActionDirection::Right).unwrap();
    let restored = group.inverse_translate(&a, &moved, ActionDirection::Right).unwrap();
    assert_relative_eq!(unwrap_point(restored), unwrap_point(b), epsilon = 1e-12);
}

#[test]
fn test_in_place_variants() {
    let group = translation_group::<f64>(2).unwrap();
    let x = DVector::from_vec(vec![1.0, 2.0]);
    let y = DVector::from_vec(vec![-4.0, 0.5]);
    let mut out = DVector::zeros(2);

    group.compose_into(&x, &y, &mut out).unwrap();
    assert_eq!(out, DVector::from_vec(vec![-3.0, 2.5]));

    group.inverse_into(&x, &mut out).unwrap();
    assert_eq!(out, DVector::from_vec(vec![-1.0, -2.0]));

    group
        .translate_diff_into(&x, &y, &y, ActionDirection::Left, &mut out)
        .unwrap();
    assert_eq!(out, y);
}

#[test]
fn test_so3_in_place_variants_reuse_buffers() {
    let group = special_orthogonal::<f64>(3).unwrap();
    let x = group.random_point().unwrap();
    let y = group.random_point().unwrap();
    let v = group.random_tangent(&y).unwrap();

    let mut point = DMatrix::zeros(3, 3);
    let buffer = point.as_ptr();
    group.compose_into(&x, &y, &mut point).unwrap();
    assert_relative_eq!(point, &x * &y, epsilon = 1e-12);
    group.inverse_into(&x, &mut point).unwrap();
    assert_relative_eq!(point, x.transpose(), epsilon = 1e-10);
    assert_eq!(point.as_ptr(), buffer);

    let mut tangent = DMatrix::zeros(3, 3);
    let buffer = tangent.as_ptr();
    group
        .translate_diff_into(&x, &y, &v, ActionDirection::Right, &mut tangent)
        .unwrap();
    assert_relative_eq!(tangent, &v * &x, epsilon = 1e-12);
    assert_eq!(tangent.as_ptr(), buffer);
}

#[test]
fn test_registered_differential() {
    let group = GroupDecorator::<f64, _>::new(Euclidean::<f64>::new(2).unwrap(), GroupOperation::Addition)
        .with_translate_diff(
            |_x: &DVector<f64>, _y: &DVector<f64>, v: &DVector<f64>, _direction: ActionDirection| Ok(v * 2.0),
        )
        .into_manifold();
    let v = DVector::from_vec(vec![1.0, -1.0]);

    let w = group
        .translate_diff(&point(&[1.0, 0.0]), &point(&[0.0, 1.0]), &v, ActionDirection::Left)
        .unwrap();
    assert_eq!(w, DVector::from_vec(vec![2.0, -2.0]));
}

#[test]
fn test_group_algebra_through_validation_layer() {
    let group = special_orthogonal::<f64>(3).unwrap();
    let validated = ValidationDecorator::new(group).into_manifold();
    assert_eq!(validated.operation_kind(), GroupOperationKind::Multiplication);

    let a = GroupElement::Point(validated.random_point().unwrap());
    let a_inv = validated.inverse(&a).unwrap();
    let product = validated.compose(&a, &a_inv).unwrap();
    assert!(validated.is_identity(&product).unwrap());

    let e = GroupElement::Identity(validated.identity_element());
    let v = validated.random_tangent(a.as_point().unwrap()).unwrap();
    let w = validated.translate_diff(&e, &a, &v, ActionDirection::Left).unwrap();
    assert_relative_eq!(w, v);
}

#[test]
fn test_cloned_group_shares_identity() {
    let group = translation_group::<f64>(2).unwrap();
    let copy = group.clone();
    let x = point(&[3.0, -1.0]);

    let e = GroupElement::Identity(copy.identity_element());
    assert_eq!(unwrap_point(group.compose(&x, &e).unwrap()), DVector::from_vec(vec![3.0, -1.0]));
    assert_eq!(group.group_id(), copy.group_id());

    let other = translation_group::<f64>(2).unwrap();
    let foreign = GroupElement::Identity(other.identity_element());
    assert!(group.compose(&x, &foreign).unwrap_err().is_domain_error());
}

proptest! {
    #[test]
    fn prop_translation_group_axioms(
        a in prop::collection::vec(-10.0f64..10.0, 3),
        b in prop::collection::vec(-10.0f64..10.0, 3),
        c in prop::collection::vec(-10.0f64..10.0, 3),
    ) {
        let group = translation_group::<f64>(3).unwrap();
        let (a, b, c) = (point(&a), point(&b), point(&c));
        let e = GroupElement::Identity(group.identity_element());

        let ab_c = unwrap_point(group.compose(&group.compose(&a, &b).unwrap(), &c).unwrap());
        let a_bc = unwrap_point(group.compose(&a, &group.compose(&b, &c).unwrap()).unwrap());
        prop_assert!((ab_c - a_bc).norm() < 1e-9);

        let ea = unwrap_point(group.compose(&e, &a).unwrap());
        prop_assert_eq!(Some(&ea), a.as_point());

        let inv = group.inverse(&a).unwrap();
        let right = group.compose(&a, &inv).unwrap();
        let left = group.compose(&inv, &a).unwrap();
        prop_assert!(group.is_identity(&right).unwrap());
        prop_assert!(group.is_identity(&left).unwrap());
    }

    #[test]
    fn prop_additive_translate_diff_is_identity_map(
        x in prop::collection::vec(-5.0f64..5.0, 2),
        y in prop::collection::vec(-5.0f64..5.0, 2),
        v in prop::collection::vec(-5.0f64..5.0, 2),
    ) {
        let group = translation_group::<f64>(2).unwrap();
        let v = DVector::from_vec(v);
        for direction in [ActionDirection::Left, ActionDirection::Right] {
            let w = group.translate_diff(&point(&x), &point(&y), &v, direction).unwrap();
            prop_assert_eq!(&w, &v);
        }
    }
}
