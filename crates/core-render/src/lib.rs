//! Differential output generation.
//!
//! Everything here turns grid state back into minimal ANSI byte streams:
//! * [`CursorTracker`] picks the shortest motion encoding for a tracked
//!   terminal cursor.
//! * [`SgrTracker`] emits the minimal SGR delta between a tracked active
//!   style and a target style.
//! * [`render_row`] repaints one grid row with per-row style hygiene.
//! * [`CellBuffer`] is the unified, double-buffered cell projection used for
//!   cell-level diffing and row hashing.
//!
//! All functions append to caller-owned byte buffers and perform no I/O.

mod cell_buffer;
mod cursor;
mod row;
mod sgr;

pub use cell_buffer::CellBuffer;
pub use cursor::CursorTracker;
pub use row::render_row;
pub use sgr::SgrTracker;

/// Reset-all SGR sequence shared by the render paths.
pub(crate) const SGR_RESET: &[u8] = b"\x1b[0m";
