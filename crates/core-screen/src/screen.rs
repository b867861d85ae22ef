//! Engine state and token dispatch.

use std::borrow::Cow;
use std::fmt;

use core_ansi::{Token, parse};
use core_cell::{Cell, Style};
use core_grid::{ChangeTracker, StyleGrid, TextGrid, segment_text};
use core_render::{CellBuffer, render_row};
use tracing::{debug, trace};

const TAB_STOP: usize = 8;

/// Reply sent for a foreground color query.
const FG_COLOR_REPLY: &[u8] = b"\x1b]10;rgb:0000/0000/0000\x1b\\";
/// Reply sent for a background color query.
const BG_COLOR_REPLY: &[u8] = b"\x1b]11;rgb:FFFF/FFFF/FFFF\x1b\\";

type QueryResponder = Box<dyn FnMut(&[u8])>;

/// A virtual terminal: fixed-size viewport over an append-only row buffer.
///
/// The screen is a unit of exclusive mutation; it is not internally
/// synchronized. `write` interprets bytes, the render methods read the
/// resulting state back out as ANSI.
pub struct Screen {
    width: usize,
    height: usize,
    text: TextGrid,
    styles: StyleGrid,
    tracker: ChangeTracker,
    cursor_row: usize,
    cursor_col: usize,
    /// Rows scrolled above the viewport. The viewport is
    /// `lines_off_screen .. lines_off_screen + height`.
    lines_off_screen: usize,
    /// DECSC slot: (column, viewport-relative row).
    saved_cursor: Option<(usize, usize)>,
    responder: Option<QueryResponder>,
    last_rendered_seq: u64,
}

impl Screen {
    /// A blank screen of `width` columns by `height` viewport rows.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_max_rows(width, height, core_grid::DEFAULT_MAX_ROWS)
    }

    /// Like [`Screen::new`] with an explicit row-buffer cap.
    pub fn with_max_rows(width: usize, height: usize, max_rows: usize) -> Self {
        assert!(width > 0 && height > 0, "screen dimensions must be non-zero");
        Self {
            width,
            height,
            text: TextGrid::with_max_rows(width, max_rows.max(height)),
            styles: StyleGrid::new(),
            tracker: ChangeTracker::new(),
            cursor_row: 0,
            cursor_col: 0,
            lines_off_screen: 0,
            saved_cursor: None,
            responder: None,
            last_rendered_seq: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Absolute (row, col) of the cursor in the row buffer.
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// Rows scrolled above the viewport.
    pub fn lines_off_screen(&self) -> usize {
        self.lines_off_screen
    }

    /// Sequence recorded by the most recent mutation.
    pub fn current_seq(&self) -> u64 {
        self.tracker.current_seq()
    }

    /// Checkpoint taken by the most recent render call.
    pub fn last_rendered_seq(&self) -> u64 {
        self.last_rendered_seq
    }

    /// Sorted absolute row indices mutated after `since`.
    pub fn rows_changed_since(&self, since: u64) -> Vec<usize> {
        self.tracker.rows_changed_since(since)
    }

    /// Sequence recorded by the last mutation of an absolute buffer row,
    /// or 0 for rows never touched. Lets a host check one row against a
    /// checkpoint without materializing the whole changed set.
    pub fn row_seq(&self, row: usize) -> u64 {
        self.tracker.row_seq(row)
    }

    /// Register the sink for DSR / color-query replies. Queries arriving
    /// with no responder registered are silently dropped.
    pub fn set_query_responder(&mut self, responder: impl FnMut(&[u8]) + 'static) {
        self.responder = Some(Box::new(responder));
    }

    /// Interpret `bytes` against the grid, cursor and active style.
    pub fn write(&mut self, bytes: &[u8]) {
        let bytes = preprocess(bytes);
        for token in parse(&bytes) {
            self.dispatch(token);
        }
        self.maybe_trim();
    }

    /// Write `bytes` followed by a newline; a leading newline is inserted
    /// first when the cursor is not already in column 0.
    pub fn writeln(&mut self, bytes: &[u8]) {
        if self.cursor_col != 0 {
            self.write(b"\n");
        }
        self.write(bytes);
        self.write(b"\n");
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    fn dispatch(&mut self, token: Token) {
        match token {
            Token::Text(bytes) => self.write_text(&String::from_utf8_lossy(&bytes)),
            Token::Invalid(bytes) => {
                // Malformed escapes re-enter as text; a lone ESC is dropped.
                if bytes != [0x1b] {
                    self.write_text(&String::from_utf8_lossy(&bytes));
                }
            }
            Token::Csi { command, params, .. } => self.dispatch_csi(command, &params),
            Token::SimpleEsc { command, .. } => self.dispatch_simple(command),
            Token::Osc { .. } | Token::CharsetEsc { .. } => {
                trace!(target: "screen.dispatch", kind = ?token_kind(&token), "consumed and ignored");
            }
        }
    }

    fn dispatch_csi(&mut self, command: u8, params: &str) {
        trace!(target: "screen.dispatch", command = %(command as char), params, "csi");
        match command {
            b'A' => {
                let n = param_one(params, 0);
                self.cursor_row = self
                    .cursor_row
                    .saturating_sub(n)
                    .max(self.lines_off_screen);
            }
            b'B' => {
                let n = param_one(params, 0);
                self.cursor_row = (self.cursor_row + n).min(self.viewport_bottom());
            }
            b'C' => {
                let n = param_one(params, 0);
                self.cursor_col = (self.cursor_col + n).min(self.width - 1);
            }
            b'D' => {
                let n = param_one(params, 0);
                self.cursor_col = self.cursor_col.saturating_sub(n);
            }
            b'E' => {
                let n = param_one(params, 0);
                self.cursor_row = (self.cursor_row + n).min(self.viewport_bottom());
                self.cursor_col = 0;
            }
            b'F' => {
                let n = param_one(params, 0);
                self.cursor_row = self
                    .cursor_row
                    .saturating_sub(n)
                    .max(self.lines_off_screen);
                self.cursor_col = 0;
            }
            b'G' => {
                let col = param_one(params, 0);
                self.cursor_col = (col - 1).min(self.width - 1);
            }
            b'H' | b'f' => {
                let row = param_one(params, 0);
                let col = param_one(params, 1);
                self.cursor_row = self.lines_off_screen + (row - 1).min(self.height - 1);
                self.cursor_col = (col - 1).min(self.width - 1);
            }
            b'I' => {
                let n = param_one(params, 0);
                for _ in 0..n {
                    let next = (self.cursor_col / TAB_STOP + 1) * TAB_STOP;
                    self.cursor_col = next.min(self.width - 1);
                }
            }
            b'J' => self.erase_display(param_zero(params, 0)),
            b'K' => self.erase_line(param_zero(params, 0)),
            b'L' => self.insert_lines(param_one(params, 0)),
            b'S' => self.scroll_up(param_one(params, 0)),
            b'T' => self.scroll_down(param_one(params, 0)),
            b'm' => self.styles.apply_sgr(params),
            b'h' | b'l' => {
                // Mode set/reset (cursor visibility and friends): consumed.
            }
            b'n' => self.device_status(params),
            _ => {
                trace!(target: "screen.dispatch", command = %(command as char), "unknown csi ignored");
            }
        }
    }

    fn dispatch_simple(&mut self, command: u8) {
        match command {
            b'7' => {
                self.saved_cursor =
                    Some((self.cursor_col, self.cursor_row - self.lines_off_screen));
            }
            b'8' => {
                if let Some((col, rel_row)) = self.saved_cursor {
                    self.cursor_col = col.min(self.width - 1);
                    self.cursor_row = self.lines_off_screen + rel_row.min(self.height - 1);
                }
            }
            _ => {
                trace!(target: "screen.dispatch", command = %(command as char), "simple escape ignored");
            }
        }
    }

    fn device_status(&mut self, params: &str) {
        let reply: Option<Vec<u8>> = if params == "6" {
            let row = self.cursor_row - self.lines_off_screen + 1;
            let col = self.cursor_col.min(self.width - 1) + 1;
            Some(format!("\x1b[{row};{col}R").into_bytes())
        } else if params.starts_with("?10") {
            Some(FG_COLOR_REPLY.to_vec())
        } else if params.starts_with("?11") {
            Some(BG_COLOR_REPLY.to_vec())
        } else {
            None
        };
        if let Some(reply) = reply {
            match &mut self.responder {
                Some(responder) => responder(&reply),
                None => trace!(target: "screen.dispatch", "query dropped, no responder"),
            }
        }
    }

    // ------------------------------------------------------------------
    // Text path
    // ------------------------------------------------------------------

    fn write_text(&mut self, text: &str) {
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                self.newline_with_scroll();
            }
            self.write_segment(segment);
        }
    }

    fn write_segment(&mut self, segment: &str) {
        for seg in segment_text(segment) {
            if seg.width == 0 || seg.width as usize > self.width {
                continue;
            }
            if self.cursor_col + seg.width as usize > self.width {
                self.newline_with_scroll();
            }
            self.text
                .set_cluster(self.cursor_row, self.cursor_col, &seg.cluster, seg.width);
            self.styles.stamp(self.cursor_row, self.cursor_col, seg.width);
            self.tracker.mark(self.cursor_row);
            self.cursor_col += seg.width as usize;
        }
    }

    /// Advance one row, scrolling the viewport when the cursor sits on its
    /// last row. Column returns to 0.
    fn newline_with_scroll(&mut self) {
        if self.cursor_row >= self.viewport_bottom() {
            self.lines_off_screen += 1;
            debug!(target: "screen.scroll", lines_off_screen = self.lines_off_screen, "viewport advanced");
            self.mark_viewport();
            self.maybe_trim();
        }
        self.cursor_row += 1;
        self.cursor_col = 0;
    }

    // ------------------------------------------------------------------
    // Erase / scroll / insert
    // ------------------------------------------------------------------

    fn erase_display(&mut self, mode: usize) {
        let top = self.lines_off_screen;
        let bottom = self.viewport_bottom();
        match mode {
            0 => {
                self.erase_line(0);
                for row in self.cursor_row + 1..=bottom {
                    self.blank_row(row);
                }
            }
            1 => {
                for row in top..self.cursor_row {
                    self.blank_row(row);
                }
                let end = (self.cursor_col + 1).min(self.width);
                self.text.fill_blank(self.cursor_row, 0, end);
                self.styles.fill(self.cursor_row, 0, end, Style::default());
                self.tracker.mark(self.cursor_row);
            }
            2 => {
                for row in top..=bottom {
                    self.blank_row(row);
                }
            }
            _ => {}
        }
    }

    fn erase_line(&mut self, mode: usize) {
        let row = self.cursor_row;
        match mode {
            0 => {
                let col = self.cursor_col.min(self.width);
                let active = self.styles.active();
                if active.has_background() {
                    // Erased cells keep the active background, the common
                    // xterm behavior for clear-to-end-of-line.
                    self.text.fill_blank(row, col, self.width);
                    self.styles.fill(row, col, self.width, active.background_only());
                } else {
                    self.text.truncate_row(row, col);
                    self.styles.truncate_row(row, col);
                }
            }
            1 => {
                let end = (self.cursor_col + 1).min(self.width);
                self.text.fill_blank(row, 0, end);
                self.styles.fill(row, 0, end, Style::default());
            }
            2 => {
                self.text.blank_row(row);
                self.styles.blank_row(row);
            }
            _ => return,
        }
        self.tracker.mark(row);
    }

    fn blank_row(&mut self, row: usize) {
        self.text.blank_row(row);
        self.styles.blank_row(row);
        self.tracker.mark(row);
    }

    fn insert_lines(&mut self, n: usize) {
        let bottom = self.viewport_bottom();
        let n = n.min(bottom - self.cursor_row + 1);
        self.text.insert_blank_rows(self.cursor_row, n);
        self.styles.insert_blank_rows(self.cursor_row, n);
        self.tracker.insert_rows(self.cursor_row, n);
        // Rows pushed past the viewport bottom are discarded.
        self.text.remove_rows(bottom + 1, n);
        self.styles.remove_rows(bottom + 1, n);
        self.tracker.remove_rows(bottom + 1, n);
        self.mark_viewport();
    }

    fn scroll_up(&mut self, n: usize) {
        self.lines_off_screen += n;
        debug!(target: "screen.scroll", n, lines_off_screen = self.lines_off_screen, "scroll up");
        self.cursor_row = self.cursor_row.max(self.lines_off_screen);
        self.mark_viewport();
        self.maybe_trim();
    }

    fn scroll_down(&mut self, n: usize) {
        let top = self.lines_off_screen;
        let bottom = self.viewport_bottom();
        let n = n.min(self.height);
        self.text.insert_blank_rows(top, n);
        self.styles.insert_blank_rows(top, n);
        self.tracker.insert_rows(top, n);
        self.text.remove_rows(bottom + 1, n);
        self.styles.remove_rows(bottom + 1, n);
        self.tracker.remove_rows(bottom + 1, n);
        debug!(target: "screen.scroll", n, "scroll down");
        self.mark_viewport();
    }

    /// Record a mutation for every visible row (scroll and insert move all
    /// of them relative to the screen).
    fn mark_viewport(&mut self) {
        self.tracker
            .mark_range(self.lines_off_screen, self.viewport_bottom());
    }

    fn viewport_bottom(&self) -> usize {
        self.lines_off_screen + self.height - 1
    }

    fn maybe_trim(&mut self) {
        let dropped = self.text.trim_excess();
        if dropped > 0 {
            self.styles.shift_up(dropped);
            self.tracker.shift_up(dropped);
            self.lines_off_screen = self.lines_off_screen.saturating_sub(dropped);
            self.cursor_row = self.cursor_row.saturating_sub(dropped);
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Full frame in relative-positioning form: the output reproduces the
    /// viewport starting at whatever position the consuming terminal's
    /// cursor currently has. No `\r`, `\n` or absolute addressing is used,
    /// so the frame can be embedded at any offset (panel, popup).
    pub fn render(&mut self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"\x1b7");
        for v in 0..self.height {
            out.extend_from_slice(b"\x1b8");
            if v > 0 {
                out.extend_from_slice(format!("\x1b[{v}B").as_bytes());
            }
            render_row(&mut out, &self.text, &self.styles, self.lines_off_screen + v);
        }
        self.last_rendered_seq = self.tracker.current_seq();
        out
    }

    /// Differential form: rewrite every visible row mutated after `since`,
    /// each absolutely positioned and erased to end of line. Empty when
    /// nothing changed.
    pub fn render_since(&mut self, since: u64) -> Vec<u8> {
        let mut out = Vec::new();
        for row in self.tracker.rows_changed_since(since) {
            if row < self.lines_off_screen || row > self.viewport_bottom() {
                continue;
            }
            let v = row - self.lines_off_screen;
            out.extend_from_slice(format!("\x1b[{};1H", v + 1).as_bytes());
            render_row(&mut out, &self.text, &self.styles, row);
            out.extend_from_slice(b"\x1b[K");
        }
        self.last_rendered_seq = self.tracker.current_seq();
        out
    }

    /// Project the viewport into a unified cell buffer (fresh back frame).
    pub fn snapshot(&self) -> CellBuffer {
        let mut buffer = CellBuffer::new(self.width, self.height);
        self.snapshot_into(&mut buffer);
        buffer
    }

    /// Refresh `buffer`'s front frame from the viewport. The buffer must
    /// have been created for this screen's dimensions.
    pub fn snapshot_into(&self, buffer: &mut CellBuffer) {
        assert_eq!(
            (buffer.width(), buffer.height()),
            (self.width, self.height),
            "snapshot buffer shape mismatch"
        );
        for v in 0..self.height {
            let row = self.lines_off_screen + v;
            for col in 0..self.width {
                let cell = match self.text.cluster_at(row, col) {
                    Some("") => Cell::continuation(self.styles.style_at(row, col)),
                    Some(cluster) => Cell::new(cluster, self.styles.style_at(row, col)),
                    None => Cell::blank(),
                };
                buffer.set_cell(v, col, cell);
            }
        }
    }

    /// Plain text of one absolute buffer row (no styling, continuation
    /// cells contribute nothing).
    pub fn row_text(&self, row: usize) -> String {
        self.text
            .row(row)
            .map(|cells| cells.concat())
            .unwrap_or_default()
    }
}

impl fmt::Display for Screen {
    /// The viewport as plain text: per-row trailing blanks trimmed, empty
    /// trailing rows dropped. Diagnostic form, not the wire format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = (0..self.height)
            .map(|v| {
                self.row_text(self.lines_off_screen + v)
                    .trim_end()
                    .to_string()
            })
            .collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        write!(f, "{}", lines.join("\n"))
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screen")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cursor", &(self.cursor_row, self.cursor_col))
            .field("lines_off_screen", &self.lines_off_screen)
            .field("seq", &self.tracker.current_seq())
            .finish_non_exhaustive()
    }
}

/// Replace BS and CR with their CSI equivalents before tokenizing.
fn preprocess(bytes: &[u8]) -> Cow<'_, [u8]> {
    if !bytes.iter().any(|&b| b == 0x08 || b == 0x0d) {
        return Cow::Borrowed(bytes);
    }
    let mut out = Vec::with_capacity(bytes.len() + 8);
    for &b in bytes {
        match b {
            0x08 => out.extend_from_slice(b"\x1b[D"),
            0x0d => out.extend_from_slice(b"\x1b[G"),
            _ => out.push(b),
        }
    }
    Cow::Owned(out)
}

/// Numeric parameter at `index`, defaulting to 0 when absent or empty.
fn param_zero(params: &str, index: usize) -> usize {
    params
        .split(';')
        .nth(index)
        .and_then(|p| p.parse().ok())
        .unwrap_or(0)
}

/// Numeric parameter at `index`, defaulting to 1; 0 reads as 1 per the VT
/// convention for motion counts.
fn param_one(params: &str, index: usize) -> usize {
    param_zero(params, index).max(1)
}

fn token_kind(token: &Token) -> &'static str {
    match token {
        Token::Text(_) => "text",
        Token::Csi { .. } => "csi",
        Token::Osc { .. } => "osc",
        Token::SimpleEsc { .. } => "esc",
        Token::CharsetEsc { .. } => "charset",
        Token::Invalid(_) => "invalid",
    }
}
