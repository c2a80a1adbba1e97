//! lox_core: Source-location primitives shared by the Lox tokenizer crates.
//!
//! Provides byte spans for lexemes and a line map for converting byte
//! offsets back to source lines.

pub mod text;

pub use text::{to_text_pos, LineMap, TextPos, TextSpan};
