//! Per-cell data model: grapheme cluster plus styling.
//!
//! A cell couples one extended grapheme cluster with the style that was
//! active when it was written. Styles decompose into a nine-bit decoration
//! mask, an optional basic ANSI color per plane, and an optional extended
//! (256-palette or RGB) color per plane.
//!
//! Invariants:
//! * For each plane (fg, bg), basic and extended color are mutually
//!   exclusive: applying one clears the other.
//! * A continuation cell (right half of a wide cluster) has an empty cluster
//!   and mirrors the style of the cluster to its left.
//! * The blank cell is a single space with the default style; clearing
//!   operations produce blank cells.

mod cell;
mod color;
mod flags;
mod style;

pub use cell::Cell;
pub use color::ExtendedColor;
pub use flags::StyleFlags;
pub use style::Style;
