//! Row-major storage for the virtual screen.
//!
//! Two parallel grids share one row indexing scheme: [`TextGrid`] stores
//! grapheme clusters, [`StyleGrid`] stores the style stamped onto each cell.
//! [`ChangeTracker`] records a monotonic modification sequence per row so
//! renderers can ask "what changed since N".
//!
//! Storage conventions:
//! * A row may be shorter than the screen width; unstored trailing cells are
//!   implicitly blank.
//! * The empty cluster marks a continuation cell (right half of a wide
//!   cluster). Writers repair half-overwritten wide pairs so a continuation
//!   cell always sits to the right of a width-2 cluster.
//! * Rows grow on demand and are trimmed oldest-first beyond a hard cap
//!   (default 5000); all row-indexed state shifts down together.

mod segment;
mod style_grid;
mod text_grid;
mod tracker;

pub use segment::{Segment, cluster_width, segment_text};
pub use style_grid::StyleGrid;
pub use text_grid::{DEFAULT_MAX_ROWS, TextGrid};
pub use tracker::ChangeTracker;
