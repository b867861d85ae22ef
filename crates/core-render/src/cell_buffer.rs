//! Unified, double-buffered cell projection.
//!
//! `CellBuffer` flattens the dual grids into one `(cluster, style)` cell per
//! column so frames can be compared by value. The front buffer holds the
//! frame being built; the back buffer holds what was last presented.
//! `swap_buffers` promotes front to back between frames.
//!
//! Row hashes use `ahash` and are cheap enough to compare viewports across
//! buffers without walking cells.

use std::hash::{Hash, Hasher};

use ahash::AHasher;
use core_cell::Cell;
use core_grid::cluster_width;
use tracing::trace;

use crate::{CursorTracker, SgrTracker};

/// Fixed-shape unified cell grid with a front and a back frame.
#[derive(Debug, Clone)]
pub struct CellBuffer {
    width: usize,
    height: usize,
    front: Vec<Cell>,
    back: Vec<Cell>,
}

impl CellBuffer {
    /// Buffer of blank cells in both frames.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            front: vec![Cell::blank(); width * height],
            back: vec![Cell::blank(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.front[self.index(row, col)]
    }

    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        let index = self.index(row, col);
        self.front[index] = cell;
    }

    /// Promote the front frame to back (the "presented" frame).
    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Hash of a front row's cells (cluster and style).
    pub fn row_hash(&self, row: usize) -> u64 {
        let mut hasher = AHasher::default();
        let start = self.index(row, 0);
        self.front[start..start + self.width].hash(&mut hasher);
        hasher.finish()
    }

    /// Compare one row against the same row of another buffer by value.
    pub fn row_equals(&self, row: usize, other: &CellBuffer) -> bool {
        debug_assert_eq!(self.width, other.width, "buffers must share a shape");
        let start = self.index(row, 0);
        self.front[start..start + self.width] == other.front[start..start + self.width]
    }

    /// Emit updates for every cell whose `(cluster, style)` differs between
    /// the front and back frames, walking in `(row, col)` order through a
    /// transient cursor tracker and style tracker. `base_row` / `base_col`
    /// offset the emitted positions so the buffer can be drawn inside a
    /// larger display. Ends with `ESC[0m` when a style is left active.
    pub fn diff_render(&self, base_row: usize, base_col: usize) -> Vec<u8> {
        let mut out = Vec::new();
        let mut cursor = CursorTracker::new();
        let mut sgr = SgrTracker::new();
        let mut changed = 0usize;

        for row in 0..self.height {
            for col in 0..self.width {
                let index = self.index(row, col);
                let cell = &self.front[index];
                if *cell == self.back[index] || cell.is_continuation() {
                    continue;
                }
                changed += 1;
                cursor.move_to(&mut out, base_row + row, base_col + col);
                sgr.transition(&mut out, &cell.style);
                out.extend_from_slice(cell.cluster.as_bytes());
                cursor.advance(cluster_width(&cell.cluster) as usize);
            }
        }

        sgr.reset(&mut out);
        trace!(target: "render.diff", changed, bytes = out.len(), "cell diff");
        out
    }

    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.height && col < self.width);
        row * self.width + col
    }
}
