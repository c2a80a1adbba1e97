//! lox_scanner: Lexical scanner for Lox source text.
//!
//! Produces a flat token stream covering punctuation, one- and
//! two-character operators, string literals and number literals, plus an
//! ordered list of non-fatal diagnostics.

pub mod char_codes;
pub mod scanner;
pub mod token;

pub use scanner::{ScanResult, Scanner};
pub use token::{format_number, Literal, Token, TokenKind};

use rayon::prelude::*;

/// Scan one source text.
pub fn scan(source: &str) -> ScanResult {
    Scanner::new(source).scan_tokens()
}

/// Scan independent sources in parallel, returning results in input order.
pub fn scan_many<S>(sources: &[S]) -> Vec<ScanResult>
where
    S: AsRef<str> + Sync,
{
    sources.par_iter().map(|source| scan(source.as_ref())).collect()
}
