//! termgrid: a virtual terminal renderer.
//!
//! Feed bytes containing text and ANSI/VT escape sequences into a
//! [`Screen`]; it maintains a fixed-size character grid with per-cell
//! styling and renders minimal ANSI back out, either as a full frame in
//! relative-positioning form (safe to embed anywhere on a real terminal) or
//! as a differential update covering only what changed since a checkpoint.
//!
//! The crate exists so a host TUI can compose output from sources that
//! themselves speak ANSI: a sub-program's "clear screen" clears its own
//! panel, not the whole display, and frame updates stay cheap enough for
//! 40+ FPS repaints.
//!
//! ```
//! use termgrid::Screen;
//!
//! let mut screen = Screen::new(20, 3);
//! screen.write(b"hello \x1b[1;32mworld\x1b[0m");
//! let frame = screen.render();            // full frame, relative form
//! let seq = screen.last_rendered_seq();
//! screen.write(b"\x1b[1;1HHELLO");
//! let delta = screen.render_since(seq);   // only the touched row
//! assert!(!frame.is_empty());
//! assert!(!delta.is_empty());
//! ```

pub use core_ansi::{Token, parse};
pub use core_cell::{Cell, ExtendedColor, Style, StyleFlags};
pub use core_grid::{
    ChangeTracker, DEFAULT_MAX_ROWS, Segment, StyleGrid, TextGrid, cluster_width, segment_text,
};
pub use core_render::{CellBuffer, CursorTracker, SgrTracker, render_row};
pub use core_screen::Screen;
