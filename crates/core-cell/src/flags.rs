//! SGR decoration bits.
//!
//! The nine standard decorations map one-to-one onto SGR set codes 1–9 and
//! clear codes 22–29 (22 clears both bold and dim, the VT standard quirk).

use bitflags::bitflags;

bitflags! {
    /// Decoration bitmask over the standard SGR set codes 1–9.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u16 {
        const BOLD          = 1 << 0;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const BLINK         = 1 << 4;
        const RAPID_BLINK   = 1 << 5;
        const REVERSE       = 1 << 6;
        const HIDDEN        = 1 << 7;
        const STRIKETHROUGH = 1 << 8;
    }
}

impl StyleFlags {
    /// Flag set by SGR code 1–9, if any.
    pub fn from_set_code(code: u16) -> Option<StyleFlags> {
        if (1..=9).contains(&code) {
            StyleFlags::from_bits(1 << (code - 1))
        } else {
            None
        }
    }

    /// Flags cleared by SGR code 22–29, if any. Code 22 clears bold and dim.
    pub fn from_clear_code(code: u16) -> Option<StyleFlags> {
        match code {
            22 => Some(StyleFlags::BOLD | StyleFlags::DIM),
            23..=29 => StyleFlags::from_bits(1 << (code - 21)),
            _ => None,
        }
    }

    /// SGR set codes (1–9) for every bit present, in ascending order.
    pub fn sgr_codes(self) -> impl Iterator<Item = u16> {
        (1..=9u16).filter(move |code| {
            self.contains(StyleFlags::from_bits(1 << (code - 1)).expect("code in range"))
        })
    }
}
