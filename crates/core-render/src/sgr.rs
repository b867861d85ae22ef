//! Minimal SGR transitions.
//!
//! Tracks the rendition the terminal currently has and emits the shortest
//! parameter list reaching a target style.
//!
//! Reset rule: SGR has no "turn off one decoration cheaply" path that is
//! safe across terminals, and no way to leave an extended color other than
//! selecting something else. So a full `0` + re-emit is forced when any
//! decoration bit turns off, or when a plane drops its extended color.
//! Everything else is incremental: newly added bits, then foreground, then
//! background.

use core_cell::Style;

/// Tracked active rendition with minimal-delta emission.
#[derive(Debug, Default)]
pub struct SgrTracker {
    current: Style,
}

impl SgrTracker {
    /// Tracker assuming the terminal is at the default rendition.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Style {
        self.current
    }

    pub fn is_default(&self) -> bool {
        self.current.is_default()
    }

    /// Append `ESC[0m` unless already default, and track it.
    pub fn reset(&mut self, out: &mut Vec<u8>) {
        if !self.current.is_default() {
            out.extend_from_slice(crate::SGR_RESET);
            self.current = Style::default();
        }
    }

    /// Append the minimal SGR sequence bringing the terminal from the
    /// tracked rendition to `target`, and track the result.
    pub fn transition(&mut self, out: &mut Vec<u8>, target: &Style) {
        if self.current == *target {
            return;
        }

        let turned_off = self.current.flags & !target.flags;
        let fg_changed = (self.current.fg_basic, self.current.fg_ext)
            != (target.fg_basic, target.fg_ext);
        let bg_changed = (self.current.bg_basic, self.current.bg_ext)
            != (target.bg_basic, target.bg_ext);
        let fg_leaves_ext = fg_changed && self.current.fg_ext.is_some() && target.fg_ext.is_none();
        let bg_leaves_ext = bg_changed && self.current.bg_ext.is_some() && target.bg_ext.is_none();

        let params: Vec<u16> = if !turned_off.is_empty() || fg_leaves_ext || bg_leaves_ext {
            let mut params = vec![0];
            params.extend(target.sgr_params_from_default());
            params
        } else {
            let mut params: Vec<u16> = (target.flags & !self.current.flags).sgr_codes().collect();
            if fg_changed {
                let fg = target.fg_params();
                if fg.is_empty() {
                    params.push(39);
                } else {
                    params.extend(fg);
                }
            }
            if bg_changed {
                let bg = target.bg_params();
                if bg.is_empty() {
                    params.push(49);
                } else {
                    params.extend(bg);
                }
            }
            params
        };

        out.extend_from_slice(b"\x1b[");
        for (i, p) in params.iter().enumerate() {
            if i > 0 {
                out.push(b';');
            }
            out.extend_from_slice(p.to_string().as_bytes());
        }
        out.push(b'm');
        self.current = *target;
    }
}
