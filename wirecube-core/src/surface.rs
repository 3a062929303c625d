//! The display boundary: a character grid the core draws into.

use serde::{Deserialize, Serialize};
use std::io;

/// A column/row position on the cell grid. May lie outside the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellCoord {
    pub col: i32,
    pub row: i32,
}

impl CellCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Shift by a cell delta, saturating at the `i32` range
    pub const fn offset(self, dcol: i32, drow: i32) -> Self {
        Self::new(self.col.saturating_add(dcol), self.row.saturating_add(drow))
    }
}

/// Terminal color. `Reset` leaves the host default in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Grey,
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Color,
}

impl CellStyle {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }
}

/// A character-cell display.
///
/// Receivers are shared so a single surface can be driven by the render
/// loop while the event loop resyncs or finalizes it; implementations
/// provide their own synchronization.
pub trait Surface {
    /// Current size as (columns, rows)
    fn size(&self) -> (u16, u16);

    /// Write one glyph into the back buffer. Out-of-range cells are dropped.
    fn put(&self, at: CellCoord, glyph: char, style: CellStyle);

    /// Blank the back buffer
    fn clear(&self);

    /// Commit the back buffer to the visible output
    fn show(&self) -> io::Result<()>;

    /// Resynchronize after the host was resized
    fn sync(&self);

    /// Restore the host. Idempotent; later writes and commits are ignored.
    fn fini(&self);
}
