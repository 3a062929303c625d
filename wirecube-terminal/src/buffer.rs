//! Cell grid backing the terminal screen.

use wirecube_core::{CellCoord, CellStyle};

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    pub const fn blank(style: CellStyle) -> Self {
        Self { ch: ' ', style }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(CellStyle::default())
    }
}

/// Row-major grid of styled cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16, fill: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; usize::from(width) * usize::from(height)],
        }
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Resize, refilling every cell with `fill`.
    pub fn resize(&mut self, width: u16, height: u16, fill: Cell) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(usize::from(width) * usize::from(height), fill);
    }

    #[inline]
    fn idx(&self, at: CellCoord) -> Option<usize> {
        let col = u16::try_from(at.col).ok()?;
        let row = u16::try_from(at.row).ok()?;
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(usize::from(row) * usize::from(self.width) + usize::from(col))
    }

    pub fn get(&self, at: CellCoord) -> Option<Cell> {
        self.idx(at).map(|i| self.cells[i])
    }

    /// Write a cell; out-of-range coordinates are ignored.
    pub fn set(&mut self, at: CellCoord, cell: Cell) {
        if let Some(i) = self.idx(at) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, fill: Cell) {
        self.cells.fill(fill);
    }

    /// One row of cells, or an empty slice past the bottom
    pub fn row(&self, row: u16) -> &[Cell] {
        if row >= self.height {
            return &[];
        }
        let start = usize::from(row) * usize::from(self.width);
        &self.cells[start..start + usize::from(self.width)]
    }
}

/// Call `f(col, row, len)` for every horizontal run where `next` differs from `prev`.
///
/// Both buffers must have the same size.
pub fn for_each_changed_run<E>(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<(), E>,
) -> Result<(), E> {
    for y in 0..next.height() {
        let (old, new) = (prev.row(y), next.row(y));
        let mut x = 0;
        while x < new.len() {
            if old.get(x) == Some(&new[x]) {
                x += 1;
                continue;
            }
            let start = x;
            while x < new.len() && old.get(x) != Some(&new[x]) {
                x += 1;
            }
            // widths are u16, so run bounds are too
            f(start as u16, y, (x - start) as u16)?;
        }
    }
    Ok(())
}
