//! Perspective divide from model space to normalized device coordinates

use nalgebra::{Point2, Point3};

/// Forward shift that keeps the unit cube in front of the camera plane
pub const DEFAULT_DEPTH_OFFSET: f64 = 2.0;

/// Projects 3D points by dividing x and y by the shifted depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub depth_offset: f64,
}

impl Projector {
    pub fn new(depth_offset: f64) -> Self {
        Self { depth_offset }
    }

    /// Project a point to NDC.
    ///
    /// A shifted depth of exactly zero is replaced by 1.0. Points behind the
    /// camera are not rejected; they land at mirrored or extreme coordinates.
    pub fn project(&self, point: &Point3<f64>) -> Point2<f64> {
        let mut z = point.z + self.depth_offset;
        if z == 0.0 {
            z = 1.0;
        }
        Point2::new(point.x / z, point.y / z)
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH_OFFSET)
    }
}
