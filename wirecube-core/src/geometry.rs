//! Wireframe geometry: vertices joined by edges, no faces

use nalgebra::Point3;

use crate::transform;

/// Half-extent of the reference cube on every axis
pub const CUBE_HALF_EXTENT: f64 = 0.5;

const H: f64 = CUBE_HALF_EXTENT;

/// Cube corners in object space. Indices are referenced by `CUBE_EDGES`.
pub const CUBE_VERTICES: [[f64; 3]; 8] = [
    [-H, -H, -H], // 0
    [H, -H, -H],  // 1
    [H, H, -H],   // 2
    [-H, H, -H],  // 3
    [-H, -H, H],  // 4
    [H, -H, H],   // 5
    [H, H, H],    // 6
    [-H, H, H],   // 7
];

/// Cube adjacency list
pub const CUBE_EDGES: [Edge; 12] = [
    // Back face
    Edge(0, 1),
    Edge(1, 2),
    Edge(2, 3),
    Edge(3, 0),
    // Front face
    Edge(4, 5),
    Edge(5, 6),
    Edge(6, 7),
    Edge(7, 4),
    // Connecting struts
    Edge(0, 4),
    Edge(1, 5),
    Edge(2, 6),
    Edge(3, 7),
];

/// An unordered pair of indices into a model's vertex list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    /// Both endpoints of the edge taken from `vertices`.
    ///
    /// Returns `None` when either index is out of range.
    pub fn endpoints<'a, T>(&self, vertices: &'a [T]) -> Option<(&'a T, &'a T)> {
        Some((vertices.get(self.0)?, vertices.get(self.1)?))
    }
}

/// A fixed vertex set plus the edges that connect it.
///
/// The base pose is never mutated; each frame works on a rotated copy of
/// the vertices so the angle is always applied to the same reference.
#[derive(Debug, Clone, PartialEq)]
pub struct WireframeModel {
    vertices: Vec<Point3<f64>>,
    edges: &'static [Edge],
}

impl WireframeModel {
    /// The 8-vertex, 12-edge cube centered at the origin
    pub fn cube() -> Self {
        Self {
            vertices: CUBE_VERTICES.iter().copied().map(Point3::from).collect(),
            edges: &CUBE_EDGES,
        }
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        self.edges
    }

    /// Vertices rotated about the vertical axis, in the original order
    pub fn rotated(&self, angle: f64) -> Vec<Point3<f64>> {
        transform::rotate_all(&self.vertices, angle)
    }
}

impl Default for WireframeModel {
    fn default() -> Self {
        Self::cube()
    }
}
