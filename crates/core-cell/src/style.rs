//! Active style state and SGR code application.

use crate::{ExtendedColor, StyleFlags};

/// Snapshot of the graphic rendition in effect for a cell.
///
/// `fg_basic` / `bg_basic` hold the literal SGR code naming a basic color
/// (30–37 or 90–97 for the foreground, 40–47 or 100–107 for the background).
/// Extended colors displace the basic code for their plane and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub flags: StyleFlags,
    pub fg_basic: Option<u16>,
    pub bg_basic: Option<u16>,
    pub fg_ext: Option<ExtendedColor>,
    pub bg_ext: Option<ExtendedColor>,
}

impl Style {
    /// True when every component is unset (the terminal default rendition).
    pub fn is_default(&self) -> bool {
        *self == Style::default()
    }

    /// Apply one SGR parameter string (the literal text between `ESC[` and
    /// `m`, e.g. `"1;38;5;208"`). Codes apply left to right; empty params
    /// read as 0 per the VT convention; unknown codes are ignored.
    pub fn apply_sgr(&mut self, params: &str) {
        let codes: Vec<u16> = params
            .split(';')
            .map(|p| p.parse::<u16>().unwrap_or(0))
            .collect();
        self.apply_sgr_codes(&codes);
    }

    /// Apply an already-split SGR code list.
    pub fn apply_sgr_codes(&mut self, codes: &[u16]) {
        let mut iter = codes.iter().copied();
        while let Some(code) = iter.next() {
            match code {
                0 => *self = Style::default(),
                1..=9 => {
                    if let Some(flag) = StyleFlags::from_set_code(code) {
                        self.flags |= flag;
                    }
                }
                22..=29 => {
                    if let Some(flag) = StyleFlags::from_clear_code(code) {
                        self.flags &= !flag;
                    }
                }
                30..=37 | 90..=97 => {
                    self.fg_basic = Some(code);
                    self.fg_ext = None;
                }
                40..=47 | 100..=107 => {
                    self.bg_basic = Some(code);
                    self.bg_ext = None;
                }
                38 => {
                    if let Some(color) = take_extended(&mut iter) {
                        self.fg_ext = Some(color);
                        self.fg_basic = None;
                    }
                }
                48 => {
                    if let Some(color) = take_extended(&mut iter) {
                        self.bg_ext = Some(color);
                        self.bg_basic = None;
                    }
                }
                39 => {
                    self.fg_basic = None;
                    self.fg_ext = None;
                }
                49 => {
                    self.bg_basic = None;
                    self.bg_ext = None;
                }
                _ => {}
            }
        }
    }

    /// SGR parameters selecting the current foreground, if one is set.
    /// Extended color wins over basic per the exclusivity invariant.
    pub fn fg_params(&self) -> Vec<u16> {
        if let Some(ext) = self.fg_ext {
            ext.sgr_params(38)
        } else if let Some(code) = self.fg_basic {
            vec![code]
        } else {
            Vec::new()
        }
    }

    /// SGR parameters selecting the current background, if one is set.
    pub fn bg_params(&self) -> Vec<u16> {
        if let Some(ext) = self.bg_ext {
            ext.sgr_params(48)
        } else if let Some(code) = self.bg_basic {
            vec![code]
        } else {
            Vec::new()
        }
    }

    /// Full parameter list reproducing this style from the default rendition
    /// (decorations, then foreground, then background; no leading reset).
    pub fn sgr_params_from_default(&self) -> Vec<u16> {
        let mut params: Vec<u16> = self.flags.sgr_codes().collect();
        params.extend(self.fg_params());
        params.extend(self.bg_params());
        params
    }

    /// A style carrying only this style's background plane. Erase-to-EOL
    /// stamps blanks with this so the fill color survives.
    pub fn background_only(&self) -> Style {
        Style {
            flags: StyleFlags::empty(),
            fg_basic: None,
            fg_ext: None,
            bg_basic: self.bg_basic,
            bg_ext: self.bg_ext,
        }
    }

    /// True when the background plane names a non-default color.
    pub fn has_background(&self) -> bool {
        self.bg_basic.is_some() || self.bg_ext.is_some()
    }
}

/// Consume `5;n` or `2;r;g;b` following a 38/48 introducer. Returns `None`
/// (leaving the style unchanged) when the parameters are truncated.
fn take_extended(iter: &mut impl Iterator<Item = u16>) -> Option<ExtendedColor> {
    match iter.next()? {
        5 => {
            let index = iter.next()?;
            Some(ExtendedColor::Palette256(clamp_u8(index)))
        }
        2 => {
            let r = iter.next()?;
            let g = iter.next()?;
            let b = iter.next()?;
            Some(ExtendedColor::Rgb(clamp_u8(r), clamp_u8(g), clamp_u8(b)))
        }
        _ => None,
    }
}

fn clamp_u8(value: u16) -> u8 {
    value.min(255) as u8
}
