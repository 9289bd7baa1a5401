//! Transform utilities for column-major 4x4 matrices
//!
//! Tilesets store transforms as 16 numbers in column-major order. All composition
//! happens in f64 since absolute transforms carry ECEF translations in the millions
//! of meters.

use glam::{DMat4, DVec3};

/// Build a matrix from 16 column-major values, `None` if the length is wrong
pub fn matrix_from_column_major(values: &[f64]) -> Option<DMat4> {
    let cols: &[f64; 16] = values.try_into().ok()?;
    Some(DMat4::from_cols_array(cols))
}

/// Flatten a matrix into 16 column-major values
pub fn matrix_to_column_major(matrix: &DMat4) -> [f64; 16] {
    matrix.to_cols_array()
}

/// Translation component (last column) of an affine transform
pub fn translation(matrix: &DMat4) -> DVec3 {
    matrix.w_axis.truncate()
}

/// Apply a transform to a point as a homogeneous vector with w = 1.
///
/// The result is not divided by w; tile transforms are affine.
pub fn transform_point(matrix: &DMat4, point: DVec3) -> DVec3 {
    (*matrix * point.extend(1.0)).truncate()
}

/// Compose a parent's absolute transform with a child's local transform
pub fn compose(parent: &DMat4, local: &DMat4) -> DMat4 {
    *parent * *local
}
