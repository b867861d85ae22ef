//! Normalization + segmentation adapter.
//!
//! Contract:
//! * Input is normalized to NFC before segmentation so composed and
//!   decomposed forms land in identical cells.
//! * Each segment is one extended grapheme cluster with its terminal column
//!   width. Widths are capped at 2; control-only clusters measure 0 and are
//!   skipped by writers.
//! * All width decisions flow through [`cluster_width`]; no other module
//!   consults `unicode_width` directly.

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// One grapheme cluster plus its display width in terminal cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub cluster: String,
    pub width: u16,
}

/// Display width of a single grapheme cluster: 0, 1 or 2.
pub fn cluster_width(cluster: &str) -> u16 {
    (cluster.width() as u16).min(2)
}

/// Normalize to NFC and split into grapheme clusters with widths.
pub fn segment_text(input: &str) -> Vec<Segment> {
    let normalized: String = input.nfc().collect();
    normalized
        .graphemes(true)
        .map(|g| Segment {
            cluster: g.to_string(),
            width: cluster_width(g),
        })
        .collect()
}
