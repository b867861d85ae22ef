//! The virtual terminal engine.
//!
//! [`Screen`] owns the cluster grid, the style grid, the cursor and the
//! change tracker, and interprets a byte stream of text plus ANSI escapes
//! against them. Rendering reads that state back out as minimal ANSI —
//! either a full relative-positioned frame safe to embed at any terminal
//! offset, or a differential rewrite of the rows touched since a caller
//! checkpoint.
//!
//! Core invariants (hold after every public call):
//! * `cursor_row` stays within the viewport:
//!   `lines_off_screen <= cursor_row < lines_off_screen + height`.
//! * `cursor_col <= width`; the value `width` only occurs after a row was
//!   filled exactly and resolves to a wrap before the next cluster lands.
//! * The viewport is always exactly `height` rows starting at
//!   `lines_off_screen`; rows the cap trimmed away shift every row-indexed
//!   piece of state down together.
//! * `write` and the render calls never fail; malformed input degrades per
//!   token, never structurally.

mod screen;

pub use screen::Screen;
