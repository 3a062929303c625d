//! Rasterization of points, lines, boxes and text onto a `Surface`

use serde::{Deserialize, Serialize};

use crate::surface::{CellCoord, CellStyle, Surface};

/// Glyphs used by the primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphSet {
    pub line: char,
    pub point: char,
    pub box_horizontal: char,
    pub box_left: char,
    /// The right edge deliberately differs from the left one
    pub box_right: char,
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self {
            line: '.',
            point: '•',
            box_horizontal: '─',
            box_left: '│',
            box_right: '•',
        }
    }
}

/// Draws primitives with a fixed glyph set
#[derive(Debug, Clone, Copy, Default)]
pub struct Rasterizer {
    pub glyphs: GlyphSet,
}

impl Rasterizer {
    pub fn new(glyphs: GlyphSet) -> Self {
        Self { glyphs }
    }

    pub fn draw_point<S: Surface + ?Sized>(&self, surface: &S, at: CellCoord, style: CellStyle) {
        surface.put(at, self.glyphs.point, style);
    }

    /// Incremental (DDA) line between two cells, endpoints included.
    ///
    /// Walks `max(|dx|, |dy|)` equal steps and rounds each sample to the
    /// nearest cell, so the result is 8-connected. Steps whose samples fall
    /// outside the surface are skipped, which keeps far-off endpoints cheap.
    pub fn draw_line<S: Surface + ?Sized>(
        &self,
        surface: &S,
        from: CellCoord,
        to: CellCoord,
        style: CellStyle,
    ) {
        let glyph = self.glyphs.line;
        let dx = f64::from(to.col) - f64::from(from.col);
        let dy = f64::from(to.row) - f64::from(from.row);
        let steps = dx.abs().max(dy.abs());

        if steps == 0.0 {
            surface.put(from, glyph, style);
            return;
        }

        let x_inc = dx / steps;
        let y_inc = dy / steps;
        let (x0, y0) = (f64::from(from.col), f64::from(from.row));
        let (width, height) = surface.size();

        let Some((x_first, x_last)) = visible_steps(x0, x_inc, width, steps) else {
            return;
        };
        let Some((y_first, y_last)) = visible_steps(y0, y_inc, height, steps) else {
            return;
        };
        let first = x_first.max(y_first);
        let last = x_last.min(y_last);
        if first > last {
            return;
        }

        let mut x = x0 + first * x_inc;
        let mut y = y0 + first * y_inc;
        for _ in (first as u64)..=(last as u64) {
            surface.put(CellCoord::new(x.round() as i32, y.round() as i32), glyph, style);
            x += x_inc;
            y += y_inc;
        }
    }

    /// Rectangle outline between two opposite corners, in any order
    pub fn draw_box<S: Surface + ?Sized>(
        &self,
        surface: &S,
        a: CellCoord,
        b: CellCoord,
        style: CellStyle,
    ) {
        let (top_left, bottom_right) = normalize_corners(a, b);
        let (x1, y1) = (top_left.col, top_left.row);
        let (x2, y2) = (bottom_right.col, bottom_right.row);
        let (width, height) = surface.size();
        let (width, height) = (i32::from(width), i32::from(height));

        // edges stay where they are; only the walk is cut to the surface
        for col in x1.max(-1)..=x2.min(width) {
            surface.put(CellCoord::new(col, y1), self.glyphs.box_horizontal, style);
            surface.put(CellCoord::new(col, y2), self.glyphs.box_horizontal, style);
        }
        for row in y1.saturating_add(1).max(-1)..y2.min(height) {
            surface.put(CellCoord::new(x1, row), self.glyphs.box_left, style);
            surface.put(CellCoord::new(x2, row), self.glyphs.box_right, style);
        }
    }

    /// Write `text` inside the box spanned by `a` and `b`, wrapping at the
    /// right bound and stopping past the bottom one. One cell per char.
    pub fn draw_text<S: Surface + ?Sized>(
        &self,
        surface: &S,
        a: CellCoord,
        b: CellCoord,
        text: &str,
        style: CellStyle,
    ) {
        let (top_left, bottom_right) = normalize_corners(a, b);
        let mut col = top_left.col;
        let mut row = top_left.row;

        for ch in text.chars() {
            surface.put(CellCoord::new(col, row), ch, style);
            col += 1;
            if col >= bottom_right.col {
                row += 1;
                col = top_left.col;
            }
            if row > bottom_right.row {
                break;
            }
        }
    }
}

/// Range of whole steps `i` in `0..=steps` whose sample `start + i * inc`
/// can land on a cell in `0..len`, widened by one step on each side.
fn visible_steps(start: f64, inc: f64, len: u16, steps: f64) -> Option<(f64, f64)> {
    let (low, high) = (-1.0, f64::from(len));
    if inc == 0.0 {
        return (start > low && start < high).then_some((0.0, steps));
    }
    let a = (low - start) / inc;
    let b = (high - start) / inc;
    let first = (a.min(b).floor() - 1.0).max(0.0);
    let last = (a.max(b).ceil() + 1.0).min(steps);
    (first <= last).then_some((first, last))
}

/// Reorder two corners into (top-left, bottom-right)
pub fn normalize_corners(a: CellCoord, b: CellCoord) -> (CellCoord, CellCoord) {
    (
        CellCoord::new(a.col.min(b.col), a.row.min(b.row)),
        CellCoord::new(a.col.max(b.col), a.row.max(b.row)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::io;

    /// Records every write, in order
    #[derive(Default)]
    struct Recorder {
        writes: RefCell<Vec<(CellCoord, char)>>,
    }

    impl Recorder {
        fn cells(&self) -> BTreeMap<(i32, i32), char> {
            self.writes
                .borrow()
                .iter()
                .map(|(c, g)| ((c.col, c.row), *g))
                .collect()
        }
    }

    impl Surface for Recorder {
        fn size(&self) -> (u16, u16) {
            (80, 24)
        }
        fn put(&self, at: CellCoord, glyph: char, _style: CellStyle) {
            self.writes.borrow_mut().push((at, glyph));
        }
        fn clear(&self) {}
        fn show(&self) -> io::Result<()> {
            Ok(())
        }
        fn sync(&self) {}
        fn fini(&self) {}
    }

    fn raster() -> Rasterizer {
        Rasterizer::default()
    }

    #[test]
    fn test_degenerate_line_writes_one_cell() {
        let s = Recorder::default();
        raster().draw_line(&s, CellCoord::new(3, 7), CellCoord::new(3, 7), CellStyle::default());
        assert_eq!(*s.writes.borrow(), vec![(CellCoord::new(3, 7), '.')]);
    }

    #[test]
    fn test_horizontal_line() {
        let s = Recorder::default();
        raster().draw_line(&s, CellCoord::new(0, 0), CellCoord::new(4, 0), CellStyle::default());
        let writes = s.writes.borrow();
        assert_eq!(writes.len(), 5);
        for (i, (cell, glyph)) in writes.iter().enumerate() {
            assert_eq!(*cell, CellCoord::new(i as i32, 0));
            assert_eq!(*glyph, '.');
        }
    }

    #[test]
    fn test_line_is_connected() {
        let s = Recorder::default();
        let from = CellCoord::new(2, 10);
        let to = CellCoord::new(17, 2);
        raster().draw_line(&s, from, to, CellStyle::default());

        let writes = s.writes.borrow();
        assert_eq!(writes.len(), 16);
        assert_eq!(writes.first().unwrap().0, from);
        assert_eq!(writes.last().unwrap().0, to);
        for pair in writes.windows(2) {
            let (a, b) = (pair[0].0, pair[1].0);
            assert!((a.col - b.col).abs() <= 1 && (a.row - b.row).abs() <= 1);
        }
    }

    #[test]
    fn test_far_endpoint_only_walks_visible_cells() {
        let s = Recorder::default();
        raster().draw_line(&s, CellCoord::new(0, 5), CellCoord::new(i32::MAX, 5), CellStyle::default());

        let cells = s.cells();
        for col in 0..80 {
            assert!(cells.contains_key(&(col, 5)), "missing column {col}");
        }
        assert!(s.writes.borrow().len() <= 82);
    }

    #[test]
    fn test_line_entirely_off_surface_writes_little() {
        let s = Recorder::default();
        raster().draw_line(&s, CellCoord::new(i32::MIN, -50), CellCoord::new(i32::MAX, -50), CellStyle::default());
        assert!(s.writes.borrow().is_empty());

        raster().draw_line(&s, CellCoord::new(i32::MIN, i32::MIN), CellCoord::new(i32::MAX, i32::MAX), CellStyle::default());
        assert!(s.writes.borrow().len() <= 30);
    }

    #[test]
    fn test_steep_line_steps_along_rows() {
        let s = Recorder::default();
        raster().draw_line(&s, CellCoord::new(5, 0), CellCoord::new(3, 6), CellStyle::default());
        let rows: Vec<i32> = s.writes.borrow().iter().map(|(c, _)| c.row).collect();
        assert_eq!(rows, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_point_uses_point_glyph() {
        let s = Recorder::default();
        raster().draw_point(&s, CellCoord::new(1, 2), CellStyle::default());
        assert_eq!(*s.writes.borrow(), vec![(CellCoord::new(1, 2), '•')]);
    }

    #[test]
    fn test_box_normalizes_corners() {
        let forward = Recorder::default();
        let reversed = Recorder::default();
        raster().draw_box(&forward, CellCoord::new(2, 2), CellCoord::new(5, 5), CellStyle::default());
        raster().draw_box(&reversed, CellCoord::new(2, 5), CellCoord::new(5, 2), CellStyle::default());
        assert_eq!(forward.cells(), reversed.cells());

        let cells = forward.cells();
        // perimeter of a 4x4 box
        assert_eq!(cells.len(), 12);
        for col in 2..=5 {
            assert_eq!(cells[&(col, 2)], '─');
            assert_eq!(cells[&(col, 5)], '─');
        }
        for row in 3..=4 {
            assert_eq!(cells[&(2, row)], '│');
            assert_eq!(cells[&(5, row)], '•');
        }
        assert!(!cells.contains_key(&(3, 3)));
    }

    #[test]
    fn test_box_with_far_corner_stays_cheap() {
        let s = Recorder::default();
        raster().draw_box(&s, CellCoord::new(10, 5), CellCoord::new(i32::MAX, i32::MAX), CellStyle::default());

        let cells = s.cells();
        assert_eq!(cells[&(10, 5)], '─');
        assert_eq!(cells[&(79, 5)], '─');
        assert_eq!(cells[&(10, 23)], '│');
        assert!(s.writes.borrow().len() < 2 * 82 + 2 * 25);
    }

    #[test]
    fn test_normalize_corners() {
        let (tl, br) = normalize_corners(CellCoord::new(2, 5), CellCoord::new(5, 2));
        assert_eq!(tl, CellCoord::new(2, 2));
        assert_eq!(br, CellCoord::new(5, 5));
    }

    #[test]
    fn test_text_wraps_inside_box() {
        let s = Recorder::default();
        raster().draw_text(&s, CellCoord::new(0, 0), CellCoord::new(3, 1), "abcdefgh", CellStyle::default());
        let writes = s.writes.borrow();
        let placed: Vec<(i32, i32, char)> = writes.iter().map(|(c, g)| (c.col, c.row, *g)).collect();
        assert_eq!(
            placed,
            vec![(0, 0, 'a'), (1, 0, 'b'), (2, 0, 'c'), (0, 1, 'd'), (1, 1, 'e'), (2, 1, 'f')]
        );
    }
}
