//! Token value type produced by the scanner.
//!
//! A token is either a run of printable bytes or one parsed escape sequence.
//! Tokens own their bytes; they are transient values consumed during a single
//! engine `write` and never referenced across calls.

/// One lexical unit of a terminal byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Maximal run of bytes containing no ESC (0x1B).
    Text(Vec<u8>),
    /// Control Sequence Introducer: `ESC [ <params> <intermediates> <final>`.
    ///
    /// `command` is the final byte (0x40–0x7E). `params` is the literal
    /// parameter-byte run (0x30–0x3F) as a string, uninterpreted; for
    /// `\x1b[1;31m` it is `"1;31"`. Intermediate bytes are consumed into
    /// `raw` but not exposed separately.
    Csi {
        command: u8,
        params: String,
        raw: Vec<u8>,
    },
    /// Operating System Command, terminated by BEL, ST (0x9C) or `ESC \`.
    /// Consumed and carried so hosts can log it; never interpreted.
    Osc { raw: Vec<u8> },
    /// Two-byte escape from the fixed single-command set, e.g. `ESC 7`.
    SimpleEsc { command: u8, raw: Vec<u8> },
    /// `ESC (`, `ESC )` or `ESC #` plus one designator byte. Ignored.
    CharsetEsc { raw: Vec<u8> },
    /// A prefix that began like an escape but was malformed or truncated.
    Invalid(Vec<u8>),
}

impl Token {
    /// The exact bytes this token consumed from the input.
    pub fn raw_bytes(&self) -> &[u8] {
        match self {
            Token::Text(bytes) | Token::Invalid(bytes) => bytes,
            Token::Csi { raw, .. }
            | Token::Osc { raw }
            | Token::SimpleEsc { raw, .. }
            | Token::CharsetEsc { raw } => raw,
        }
    }

    /// True for tokens the engine writes to the grid as text.
    pub fn is_textual(&self) -> bool {
        matches!(self, Token::Text(_) | Token::Invalid(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_bytes_covers_every_variant() {
        let tokens = [
            Token::Text(b"abc".to_vec()),
            Token::Csi {
                command: b'm',
                params: "1;31".into(),
                raw: b"\x1b[1;31m".to_vec(),
            },
            Token::Osc {
                raw: b"\x1b]0;t\x07".to_vec(),
            },
            Token::SimpleEsc {
                command: b'7',
                raw: b"\x1b7".to_vec(),
            },
            Token::CharsetEsc {
                raw: b"\x1b(B".to_vec(),
            },
            Token::Invalid(b"\x1b".to_vec()),
        ];
        for t in &tokens {
            assert!(!t.raw_bytes().is_empty());
        }
    }

    #[test]
    fn textual_classification() {
        assert!(Token::Text(b"x".to_vec()).is_textual());
        assert!(Token::Invalid(b"\x1b[".to_vec()).is_textual());
        assert!(
            !Token::SimpleEsc {
                command: b'7',
                raw: b"\x1b7".to_vec()
            }
            .is_textual()
        );
    }
}
