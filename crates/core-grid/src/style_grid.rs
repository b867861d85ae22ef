//! Style storage parallel to [`crate::TextGrid`].
//!
//! Holds the style stamped onto each written cell plus the one "active"
//! style that future writes will stamp. Row indexing and the continuation
//! convention are shared with the text grid; structural operations must be
//! applied to both grids in lockstep by the owner.

use core_cell::Style;

/// Row-major style storage plus the active rendition.
#[derive(Debug, Clone, Default)]
pub struct StyleGrid {
    rows: Vec<Vec<Style>>,
    active: Style,
}

impl StyleGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// The style stamped onto newly written cells.
    pub fn active(&self) -> Style {
        self.active
    }

    /// Apply an SGR parameter string to the active style.
    pub fn apply_sgr(&mut self, params: &str) {
        self.active.apply_sgr(params);
    }

    /// Style stored at a cell; default for unwritten cells.
    pub fn style_at(&self, row: usize, col: usize) -> Style {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or_default()
    }

    /// Stamp the active style over `width` cells starting at `(row, col)`
    /// (a wide cluster's continuation cell mirrors its primary's style).
    pub fn stamp(&mut self, row: usize, col: usize, width: u16) {
        self.fill(row, col, col + width as usize, self.active);
    }

    /// Write `style` over `start..end` of a row, materializing cells.
    pub fn fill(&mut self, row: usize, start: usize, end: usize, style: Style) {
        if start >= end {
            return;
        }
        if row >= self.rows.len() {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() < end {
            cells.resize(end, Style::default());
        }
        for cell in &mut cells[start..end] {
            *cell = style;
        }
    }

    /// Drop stored styles from `len` onward.
    pub fn truncate_row(&mut self, row: usize, len: usize) {
        if let Some(cells) = self.rows.get_mut(row) {
            cells.truncate(len);
        }
    }

    /// Reset a row's styles to default.
    pub fn blank_row(&mut self, row: usize) {
        if let Some(cells) = self.rows.get_mut(row) {
            cells.clear();
        }
    }

    pub fn insert_blank_rows(&mut self, at: usize, count: usize) {
        if at < self.rows.len() {
            self.rows
                .splice(at..at, std::iter::repeat_with(Vec::new).take(count));
        }
    }

    pub fn remove_rows(&mut self, at: usize, count: usize) {
        if at < self.rows.len() {
            let end = (at + count).min(self.rows.len());
            self.rows.drain(at..end);
        }
    }

    /// Drop the oldest `count` rows (buffer trim, mirroring the text grid).
    pub fn shift_up(&mut self, count: usize) {
        let count = count.min(self.rows.len());
        self.rows.drain(..count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(params: &str) -> Style {
        let mut s = Style::default();
        s.apply_sgr(params);
        s
    }

    #[test]
    fn stamp_writes_active_style() {
        let mut g = StyleGrid::new();
        g.apply_sgr("1;31");
        g.stamp(0, 2, 1);
        assert_eq!(g.style_at(0, 2), styled("1;31"));
        assert_eq!(g.style_at(0, 0), Style::default());
    }

    #[test]
    fn wide_stamp_covers_both_cells() {
        let mut g = StyleGrid::new();
        g.apply_sgr("44");
        g.stamp(1, 4, 2);
        assert_eq!(g.style_at(1, 4), styled("44"));
        assert_eq!(g.style_at(1, 5), styled("44"));
    }

    #[test]
    fn unwritten_cells_are_default() {
        let g = StyleGrid::new();
        assert_eq!(g.style_at(9, 9), Style::default());
    }

    #[test]
    fn active_style_accumulates() {
        let mut g = StyleGrid::new();
        g.apply_sgr("1");
        g.apply_sgr("32");
        let active = g.active();
        assert_eq!(active, styled("1;32"));
        g.apply_sgr("0");
        assert!(g.active().is_default());
    }

    #[test]
    fn structural_ops_shift_rows() {
        let mut g = StyleGrid::new();
        g.apply_sgr("7");
        g.stamp(0, 0, 1);
        g.stamp(1, 0, 1);
        g.insert_blank_rows(1, 1);
        assert_eq!(g.style_at(2, 0), styled("7"));
        assert_eq!(g.style_at(1, 0), Style::default());
        g.remove_rows(1, 1);
        assert_eq!(g.style_at(1, 0), styled("7"));
        g.shift_up(1);
        assert_eq!(g.style_at(0, 0), styled("7"));
    }
}
