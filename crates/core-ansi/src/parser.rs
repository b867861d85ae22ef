//! Escape-sequence scanner.
//!
//! A forward-only state machine over byte classes (all ranges inclusive):
//! * CSI parameter bytes: 0x30–0x3F
//! * CSI intermediate bytes: 0x20–0x2F
//! * CSI final byte: 0x40–0x7E
//! * OSC terminators: BEL (0x07), ST (0x9C), `ESC \`
//!
//! Invariants:
//! * Tokens are emitted in input order and partition the input exactly.
//! * Text runs are maximal: two `Text` tokens are never adjacent.
//! * Scanning never fails; anything unrecognized degrades to `Invalid`.

use crate::token::Token;

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;
const ST: u8 = 0x9c;

/// Single-byte escape commands recognized after a bare ESC.
const SIMPLE_COMMANDS: &[u8] = b"78cDEHMNOZ=><12su";

/// Tokenize `input` into an ordered sequence of tokens.
pub fn parse(input: &[u8]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        if input[pos] != ESC {
            let start = pos;
            while pos < input.len() && input[pos] != ESC {
                pos += 1;
            }
            tokens.push(Token::Text(input[start..pos].to_vec()));
            continue;
        }

        match input.get(pos + 1) {
            None => {
                // ESC at end of input.
                tokens.push(Token::Invalid(vec![ESC]));
                pos += 1;
            }
            Some(b'[') => pos = scan_csi(input, pos, &mut tokens),
            Some(b']') => pos = scan_osc(input, pos, &mut tokens),
            Some(b'(') | Some(b')') | Some(b'#') => pos = scan_charset(input, pos, &mut tokens),
            Some(&next) if SIMPLE_COMMANDS.contains(&next) => {
                tokens.push(Token::SimpleEsc {
                    command: next,
                    raw: input[pos..pos + 2].to_vec(),
                });
                pos += 2;
            }
            Some(_) => {
                // Unrecognized introducer: report the lone ESC and rescan the
                // following byte as ordinary input.
                tokens.push(Token::Invalid(vec![ESC]));
                pos += 1;
            }
        }
    }

    tokens
}

/// Scan a CSI sequence starting at the ESC in `input[start]`.
///
/// Returns the position after the consumed bytes.
fn scan_csi(input: &[u8], start: usize, tokens: &mut Vec<Token>) -> usize {
    let mut pos = start + 2;

    let params_start = pos;
    while pos < input.len() && (0x30..=0x3f).contains(&input[pos]) {
        pos += 1;
    }
    let params_end = pos;

    while pos < input.len() && (0x20..=0x2f).contains(&input[pos]) {
        pos += 1;
    }

    match input.get(pos) {
        Some(&final_byte) if (0x40..=0x7e).contains(&final_byte) => {
            tokens.push(Token::Csi {
                command: final_byte,
                params: String::from_utf8_lossy(&input[params_start..params_end]).into_owned(),
                raw: input[start..=pos].to_vec(),
            });
            pos + 1
        }
        Some(_) => {
            // A byte outside every CSI class before any final byte. The
            // sequence so far is malformed; the offending byte is rescanned.
            tokens.push(Token::Invalid(input[start..pos].to_vec()));
            pos
        }
        None => {
            tokens.push(Token::Invalid(input[start..].to_vec()));
            input.len()
        }
    }
}

/// Scan an OSC sequence starting at the ESC in `input[start]`.
fn scan_osc(input: &[u8], start: usize, tokens: &mut Vec<Token>) -> usize {
    let mut pos = start + 2;

    while pos < input.len() {
        match input[pos] {
            BEL | ST => {
                tokens.push(Token::Osc {
                    raw: input[start..=pos].to_vec(),
                });
                return pos + 1;
            }
            ESC if input.get(pos + 1) == Some(&b'\\') => {
                tokens.push(Token::Osc {
                    raw: input[start..pos + 2].to_vec(),
                });
                return pos + 2;
            }
            _ => pos += 1,
        }
    }

    // No terminator before end of input.
    tokens.push(Token::Invalid(input[start..].to_vec()));
    input.len()
}

/// Scan `ESC (`, `ESC )` or `ESC #` plus one designator byte.
fn scan_charset(input: &[u8], start: usize, tokens: &mut Vec<Token>) -> usize {
    if start + 2 < input.len() {
        tokens.push(Token::CharsetEsc {
            raw: input[start..start + 3].to_vec(),
        });
        start + 3
    } else {
        tokens.push(Token::Invalid(input[start..].to_vec()));
        input.len()
    }
}
