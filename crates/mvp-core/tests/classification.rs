//! # Classification Totality Tests
//!
//! Every storable primitive maps to exactly one category, the static and
//! runtime classifiers agree, and the mapping does not change between calls.

use std::collections::BTreeSet;

use mvp_core::*;
use nalgebra::SMatrix;

fn static_categories() -> Vec<(&'static str, Category)> {
    vec![
        (i32::KIND, category_of::<i32>()),
        (i64::KIND, category_of::<i64>()),
        (f32::KIND, category_of::<f32>()),
        (f64::KIND, category_of::<f64>()),
        (bool::KIND, category_of::<bool>()),
        (String::KIND, category_of::<String>()),
        (Vector3::KIND, category_of::<Vector3>()),
        (RowVector3::KIND, category_of::<RowVector3>()),
        (Matrix3::KIND, category_of::<Matrix3>()),
        (Quaternion::KIND, category_of::<Quaternion>()),
    ]
}

#[test]
fn every_primitive_has_one_stable_category() {
    let first = static_categories();
    let second = static_categories();
    assert_eq!(first, second);

    let covered: BTreeSet<String> = first.iter().map(|(_, c)| c.to_string()).collect();
    let all: BTreeSet<String> = Category::ALL.iter().map(Category::to_string).collect();
    assert_eq!(covered, all);
}

#[test]
fn runtime_classifier_agrees_with_static_one() {
    fn check<T: Primitive>(sample: T) {
        assert_eq!(sample.to_value().category(), T::CATEGORY, "{}", T::KIND);
    }
    check(1i32);
    check(1i64);
    check(1.0f32);
    check(1.0f64);
    check(true);
    check(String::from("x"));
    check(Vector3::zeros());
    check(RowVector3::zeros());
    check(Matrix3::zeros());
    check(Quaternion::identity());
}

#[test]
fn booleans_and_text_are_never_scalar() {
    assert_eq!(category_of::<bool>(), Category::Boolean);
    assert_eq!(category_of::<str>(), Category::Text);
    assert_eq!(category_of::<&str>(), Category::Text);
    assert_eq!(category_of::<u8>(), Category::Scalar);
}

#[test]
fn other_matrix_shapes_classify_by_rows_and_columns() {
    assert_eq!(category_of::<SMatrix<f64, 1, 4>>(), Category::RowVector3);
    assert_eq!(category_of::<SMatrix<f64, 4, 1>>(), Category::ColumnVector3);
    assert_eq!(category_of::<SMatrix<f64, 2, 2>>(), Category::Matrix3x3);
}

#[test]
fn mixed_runtime_values_fail_classification() {
    assert_eq!(classify(&[]), Ok(None));
    assert_eq!(
        classify(&[Value::Integer(1), Value::Real(2.0)]),
        Ok(Some(Category::Scalar))
    );
    assert!(matches!(
        classify(&[Value::Real(1.0), Value::from("one")]),
        Err(ParameterError::Classification(_))
    ));
}
