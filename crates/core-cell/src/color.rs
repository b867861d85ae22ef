//! Extended (non-basic) terminal colors.

/// 256-palette or truecolor descriptor for one plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtendedColor {
    /// Palette index, `38;5;n` / `48;5;n`.
    Palette256(u8),
    /// Truecolor, `38;2;r;g;b` / `48;2;r;g;b`.
    Rgb(u8, u8, u8),
}

impl ExtendedColor {
    /// SGR parameter list selecting this color. `base` is 38 (foreground)
    /// or 48 (background).
    pub fn sgr_params(self, base: u16) -> Vec<u16> {
        match self {
            ExtendedColor::Palette256(index) => vec![base, 5, u16::from(index)],
            ExtendedColor::Rgb(r, g, b) => {
                vec![base, 2, u16::from(r), u16::from(g), u16::from(b)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_params() {
        assert_eq!(
            ExtendedColor::Palette256(208).sgr_params(38),
            vec![38, 5, 208]
        );
    }

    #[test]
    fn rgb_params() {
        assert_eq!(
            ExtendedColor::Rgb(12, 250, 0).sgr_params(48),
            vec![48, 2, 12, 250, 0]
        );
    }
}
