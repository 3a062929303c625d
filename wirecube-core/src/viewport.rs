//! Mapping from normalized device coordinates to display cells

use nalgebra::Point2;

use crate::surface::CellCoord;

/// Map an NDC point in [-1, 1]² onto a `width` × `height` cell grid.
///
/// The y axis is flipped since rows grow downward. Results outside the
/// grid are returned as-is; the surface drops them on write.
pub fn to_cell(ndc: &Point2<f64>, width: u16, height: u16) -> CellCoord {
    let col = (ndc.x + 1.0) / 2.0 * f64::from(width);
    let row = (1.0 - (ndc.y + 1.0) / 2.0) * f64::from(height);
    CellCoord::new(col.floor() as i32, row.floor() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_maps_to_middle() {
        for (w, h) in [(80, 24), (81, 25), (1, 1), (200, 60)] {
            let cell = to_cell(&Point2::origin(), w, h);
            assert_eq!(cell, CellCoord::new(i32::from(w / 2), i32::from(h / 2)));
        }
    }

    #[test]
    fn test_corners() {
        assert_eq!(to_cell(&Point2::new(-1.0, 1.0), 80, 24), CellCoord::new(0, 0));
        assert_eq!(to_cell(&Point2::new(1.0, -1.0), 80, 24), CellCoord::new(80, 24));
    }

    #[test]
    fn test_out_of_range_is_not_clamped() {
        let cell = to_cell(&Point2::new(-1.5, 2.0), 80, 24);
        assert_eq!(cell, CellCoord::new(-20, -12));
    }

    #[test]
    fn test_zero_size_surface() {
        assert_eq!(to_cell(&Point2::new(0.3, -0.7), 0, 0), CellCoord::new(0, 0));
    }
}
