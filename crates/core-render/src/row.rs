//! Single-row repaint.

use core_cell::Style;
use core_grid::{StyleGrid, TextGrid};

use crate::SgrTracker;

/// Append one row's cells to `out`, assuming the terminal cursor already
/// sits at the row's first column and the rendition is default.
///
/// Continuation cells are skipped: the wide cluster before them advances the
/// terminal cursor two columns on its own. A trailing `ESC[0m` is appended
/// whenever the row leaves a non-default rendition active, so consecutive
/// rows can each be rendered against a default-seeded tracker.
pub fn render_row(out: &mut Vec<u8>, text: &TextGrid, styles: &StyleGrid, row: usize) {
    let mut sgr = SgrTracker::new();
    for col in 0..text.row_len(row) {
        let Some(cluster) = text.cluster_at(row, col) else {
            break;
        };
        if cluster.is_empty() {
            continue;
        }
        let style: Style = styles.style_at(row, col);
        sgr.transition(out, &style);
        out.extend_from_slice(cluster.as_bytes());
    }
    sgr.reset(out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grids(width: usize) -> (TextGrid, StyleGrid) {
        (TextGrid::new(width), StyleGrid::new())
    }

    fn write(text: &mut TextGrid, styles: &mut StyleGrid, col: usize, cluster: &str, width: u16) {
        text.set_cluster(0, col, cluster, width);
        styles.stamp(0, col, width);
    }

    #[test]
    fn plain_row_is_just_bytes() {
        let (mut text, mut styles) = grids(10);
        for (i, c) in ["h", "i"].iter().enumerate() {
            write(&mut text, &mut styles, i, c, 1);
        }
        let mut out = Vec::new();
        render_row(&mut out, &text, &styles, 0);
        assert_eq!(out, b"hi");
    }

    #[test]
    fn unwritten_row_renders_empty() {
        let (text, styles) = grids(10);
        let mut out = Vec::new();
        render_row(&mut out, &text, &styles, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn style_emitted_once_per_run() {
        let (mut text, mut styles) = grids(10);
        styles.apply_sgr("31");
        write(&mut text, &mut styles, 0, "A", 1);
        write(&mut text, &mut styles, 1, "B", 1);
        let mut out = Vec::new();
        render_row(&mut out, &text, &styles, 0);
        assert_eq!(out, b"\x1b[31mAB\x1b[0m");
    }

    #[test]
    fn trailing_reset_only_when_style_active() {
        let (mut text, mut styles) = grids(10);
        styles.apply_sgr("1");
        write(&mut text, &mut styles, 0, "A", 1);
        styles.apply_sgr("0");
        write(&mut text, &mut styles, 1, "b", 1);
        let mut out = Vec::new();
        render_row(&mut out, &text, &styles, 0);
        // The bold run ends mid-row; the tracker returns to default there
        // (via reset, since a bit turns off) and no trailing reset repeats.
        assert_eq!(out, b"\x1b[1mA\x1b[0mb");
    }

    #[test]
    fn continuation_cells_are_skipped() {
        let (mut text, mut styles) = grids(10);
        write(&mut text, &mut styles, 0, "漢", 2);
        write(&mut text, &mut styles, 2, "x", 1);
        let mut out = Vec::new();
        render_row(&mut out, &text, &styles, 0);
        assert_eq!(out, "漢x".as_bytes());
    }
}
