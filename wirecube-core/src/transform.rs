//! Rotation of points about the vertical axis

use nalgebra::{Matrix3, Point3};

/// Rotation matrix for the X-Z plane.
///
/// `x' = x·cos θ − z·sin θ`, `y' = y`, `z' = x·sin θ + z·cos θ`
pub fn rotation_xz(angle: f64) -> Matrix3<f64> {
    let (sin, cos) = angle.sin_cos();
    Matrix3::new(
        cos, 0.0, -sin, //
        0.0, 1.0, 0.0, //
        sin, 0.0, cos,
    )
}

/// Rotate a single point by `angle` radians
pub fn rotate_xz(point: &Point3<f64>, angle: f64) -> Point3<f64> {
    rotation_xz(angle) * point
}

/// Rotate every point, preserving length and order
pub fn rotate_all(points: &[Point3<f64>], angle: f64) -> Vec<Point3<f64>> {
    let rotation = rotation_xz(angle);
    points.iter().map(|p| rotation * p).collect()
}
