//! # Cave Grid
//!
//! Flat row-major boolean grid: `true` is open (a hole in the rock),
//! `false` is wall.
//!
//! ## Frame
//!
//! The outer [`FRAME_THICKNESS`] cells on every side form the frame. Frame
//! cells hold the dominant-fill value and are never touched by smoothing, so
//! square-topology neighbor counts at the interior edge read real cells
//! instead of testing bounds.

use std::fmt;

/// Width of the frame on each side of the grid, in cells.
pub const FRAME_THICKNESS: usize = 2;

/// Row-major boolean grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaveGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl CaveGrid {
    /// Creates a grid of solid wall.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Grid width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Linear index of `(x, y)`.
    #[inline]
    #[must_use]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// Returns true if `(x, y)` is open.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)]
    }

    /// Returns true if `(x, y)` is wall.
    #[inline]
    #[must_use]
    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        !self.get(x, y)
    }

    /// Returns true if `(x, y)` is wall or lies outside the grid.
    #[inline]
    #[must_use]
    pub fn is_wall_or_outside(&self, x: isize, y: isize) -> bool {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) if x < self.width && y < self.height => self.is_wall(x, y),
            _ => true,
        }
    }

    /// Sets `(x, y)` open (`true`) or wall (`false`).
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, open: bool) {
        let idx = self.index(x, y);
        self.cells[idx] = open;
    }

    /// Cells of row `y`.
    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> &[bool] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// All cells, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Consumes the grid, returning its row-major cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<bool> {
        self.cells
    }

    /// Number of open cells.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|&&open| open).count()
    }

    /// Thresholds noise rows into the interior, starting at interior row `first_row`.
    ///
    /// A cell is open iff its byte exceeds `threshold`. `noise` holds whole rows
    /// of `width - 2 * FRAME_THICKNESS` bytes.
    pub fn fill_interior(&mut self, noise: &[u8], first_row: usize, threshold: u8) {
        let byte_width = self.width - 2 * FRAME_THICKNESS;
        let rows = noise.len() / byte_width;
        debug_assert_eq!(noise.len(), rows * byte_width, "partial noise row");
        assert!(
            FRAME_THICKNESS + first_row + rows <= self.height - FRAME_THICKNESS,
            "noise rows overrun the interior"
        );

        for (r, bytes) in noise.chunks_exact(byte_width).enumerate() {
            let start = self.index(FRAME_THICKNESS, FRAME_THICKNESS + first_row + r);
            for (cell, &byte) in self.cells[start..start + byte_width].iter_mut().zip(bytes) {
                *cell = byte > threshold;
            }
        }
    }

    /// Moves rows `[rows, rows + count)` to `[0, count)`.
    pub fn shift_rows_up(&mut self, rows: usize, count: usize) {
        let w = self.width;
        self.cells.copy_within(rows * w..(rows + count) * w, 0);
    }

    /// Copies `count` rows of `src` starting at `src_row` into this grid at `dst_row`.
    ///
    /// # Panics
    ///
    /// Panics if the widths differ or either range is out of bounds.
    pub fn copy_rows_from(&mut self, src: &Self, src_row: usize, dst_row: usize, count: usize) {
        assert_eq!(self.width, src.width, "row copy between grids of different width");
        let w = self.width;
        self.cells[dst_row * w..(dst_row + count) * w]
            .copy_from_slice(&src.cells[src_row * w..(src_row + count) * w]);
    }

    /// Overwrites this grid with `src`, reusing the allocation.
    pub fn copy_from(&mut self, src: &Self) {
        self.width = src.width;
        self.height = src.height;
        self.cells.clone_from(&src.cells);
    }
}

impl fmt::Display for CaveGrid {
    /// One line per row, `#` for wall and `.` for open.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for &open in self.row(y) {
                f.write_str(if open { "." } else { "#" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Precomputed frame cell indices for one grid size.
///
/// Computed once per grid size and reused for every repaint.
#[derive(Clone, Debug)]
pub struct Frame {
    width: usize,
    height: usize,
    border: Vec<usize>,
}

impl Frame {
    /// Builds the frame for a `width` x `height` grid.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let mut border = Vec::with_capacity(2 * FRAME_THICKNESS * (width + height));
        for y in 0..height {
            for x in 0..width {
                if Self::contains(width, height, x, y) {
                    border.push(y * width + x);
                }
            }
        }

        Self {
            width,
            height,
            border,
        }
    }

    /// Returns true if `(x, y)` is a frame cell of a `width` x `height` grid.
    #[inline]
    #[must_use]
    pub const fn contains(width: usize, height: usize, x: usize, y: usize) -> bool {
        x < FRAME_THICKNESS
            || y < FRAME_THICKNESS
            || x + FRAME_THICKNESS >= width
            || y + FRAME_THICKNESS >= height
    }

    /// Number of frame cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.border.len()
    }

    /// Returns true if the frame has no cells.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.border.is_empty()
    }

    /// Sets every frame cell of `grid` to `open`.
    ///
    /// # Panics
    ///
    /// Panics if `grid` is not the size this frame was built for.
    pub fn paint(&self, grid: &mut CaveGrid, open: bool) {
        assert!(
            grid.width == self.width && grid.height == self.height,
            "frame built for {}x{} painted onto {}x{} grid",
            self.width,
            self.height,
            grid.width,
            grid.height
        );
        for &idx in &self.border {
            grid.cells[idx] = open;
        }
    }

    /// A wall-filled grid with the frame set to `open`.
    #[must_use]
    pub fn template(&self, open: bool) -> CaveGrid {
        let mut grid = CaveGrid::new(self.width, self.height);
        self.paint(&mut grid, open);
        grid
    }
}
