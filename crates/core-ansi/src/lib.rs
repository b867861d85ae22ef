//! Byte-level tokenization of ANSI/VT escape sequences.
//!
//! This crate turns a raw byte stream into an ordered sequence of [`Token`]s
//! without interpreting them. Interpretation (cursor motion, SGR, erasure)
//! lives upstream in `core-screen`; keeping the scanner pure makes the
//! lossless round-trip law trivially testable.
//!
//! Contract:
//! * `parse` is total: malformed or truncated escapes become [`Token::Invalid`]
//!   and scanning continues. There is no error type.
//! * Every token retains the exact bytes it consumed; concatenating
//!   [`Token::raw_bytes`] over the output reproduces the input byte-for-byte.
//! * The stream is single-shot. A truncated escape at end of input is reported
//!   as `Invalid`, never as a resumable partial state.

mod parser;
mod token;

pub use parser::parse;
pub use token::Token;
