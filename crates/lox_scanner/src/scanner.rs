//! The Lox scanner.
//!
//! Converts source text into a flat list of tokens in a single forward pass.
//! Recognition failures never stop the scan; they are recorded as
//! diagnostics and scanning resumes at the next unconsumed character.

use crate::char_codes::*;
use crate::token::{Literal, Token, TokenKind};
use lox_core::text::{to_text_pos, TextSpan};
use lox_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use serde::Serialize;

/// Everything one scan produces.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// Emitted tokens, always terminated by an `EOF` token.
    pub tokens: Vec<Token>,
    /// Diagnostics in the order the offending input was encountered.
    pub diagnostics: DiagnosticCollection,
}

impl ScanResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Diagnostics rendered in their one-line `[line N] Error: ...` form.
    pub fn error_messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

/// Cursor state for one pass over a source buffer.
pub struct Scanner<'src> {
    /// The source text being scanned.
    source: &'src str,
    /// Byte offset where the lexeme being recognized starts.
    start: usize,
    /// Byte offset of the next unread character.
    current: usize,
    /// Current 1-based line.
    line: u32,
    tokens: Vec<Token>,
    diagnostics: DiagnosticCollection,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Scan the whole source and return the tokens and diagnostics.
    pub fn scan_tokens(mut self) -> ScanResult {
        let _span = tracing::debug_span!("scan_tokens", bytes = self.source.len()).entered();

        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        let end = TextSpan::empty(to_text_pos(self.source.len()));
        self.tokens.push(Token::new(TokenKind::Eof, "", Literal::None, self.line, end));

        tracing::debug!(
            tokens = self.tokens.len(),
            diagnostics = self.diagnostics.len(),
            lines = self.line,
            "scan finished"
        );

        ScanResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Recognize one token, or skip one whitespace/comment unit.
    fn scan_token(&mut self) {
        let ch = self.advance();
        match ch {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),

            '!' => self.scan_with_equals(TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.scan_with_equals(TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.scan_with_equals(TokenKind::LessEqual, TokenKind::Less),
            '>' => self.scan_with_equals(TokenKind::GreaterEqual, TokenKind::Greater),

            '/' => {
                if self.match_char(SLASH) {
                    self.skip_line_comment();
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            LINE_FEED => self.line = self.line.saturating_add(1),
            c if is_white_space(c) => {}

            DOUBLE_QUOTE => self.scan_string(),
            c if is_digit(c) => self.scan_number(),

            c => {
                let text = c.to_string();
                self.error(&messages::UNEXPECTED_CHARACTER, &[&text]);
            }
        }
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    /// Prefer the two-character `<op>=` form; fall back without consuming.
    fn scan_with_equals(&mut self, with_equals: TokenKind, alone: TokenKind) {
        let kind = if self.match_char(EQUALS) { with_equals } else { alone };
        self.add_token(kind);
    }

    /// Skip up to, not including, the next newline so it still bumps `line`.
    fn skip_line_comment(&mut self) {
        let rest = &self.source.as_bytes()[self.current..];
        self.current = match memchr::memchr(b'\n', rest) {
            Some(offset) => self.current + offset,
            None => self.source.len(),
        };
    }

    /// Scan a string literal; the opening quote is already consumed.
    ///
    /// No escapes: the literal is everything up to the next `"`, newlines
    /// included. An unterminated string stays consumed and yields no token.
    fn scan_string(&mut self) {
        let body_start = self.current;
        let rest = &self.source.as_bytes()[body_start..];

        match memchr::memchr(b'"', rest) {
            Some(offset) => {
                let close = body_start + offset;
                self.line = self.line.saturating_add(count_newlines(&rest[..offset]));
                self.current = close + 1;
                let value = self.source[body_start..close].to_string();
                self.add_token_with_literal(TokenKind::String, Literal::String(value));
            }
            None => {
                self.line = self.line.saturating_add(count_newlines(rest));
                self.current = self.source.len();
                self.error(&messages::UNTERMINATED_STRING, &[]);
            }
        }
    }

    /// Scan `digits[.digits]`; the first digit is already consumed.
    ///
    /// A `.` is only part of the number when a digit follows it, so `123.`
    /// scans as `NUMBER` then `DOT`.
    fn scan_number(&mut self) {
        self.scan_digits();

        if self.peek() == DOT && is_digit(self.peek_next()) {
            self.advance();
            self.scan_digits();
        }

        let text = &self.source[self.start..self.current];
        // `digits[.digits]` is always valid float syntax.
        let value = text.parse::<f64>().unwrap_or(f64::NAN);
        self.add_token_with_literal(TokenKind::Number, Literal::Number(value));
    }

    fn scan_digits(&mut self) {
        while is_digit(self.peek()) {
            self.advance();
        }
    }

    // ========================================================================
    // Cursor helpers
    // ========================================================================

    #[inline]
    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    /// Consume and return the character at `current`. Must not be called at end of input.
    #[inline]
    fn advance(&mut self) -> char {
        debug_assert!(!self.is_at_end(), "advance past end of input");
        let ch = self.peek();
        self.current += ch.len_utf8();
        ch
    }

    /// Look at the character at `current` without advancing.
    #[inline]
    fn peek(&self) -> char {
        self.source[self.current..].chars().next().unwrap_or(NULL_CHARACTER)
    }

    /// Look one character past `current` without advancing.
    #[inline]
    fn peek_next(&self) -> char {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next().unwrap_or(NULL_CHARACTER)
    }

    /// Consume the next character only if it is `expected`.
    #[inline]
    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            return false;
        }
        self.current += expected.len_utf8();
        true
    }

    #[inline]
    fn lexeme_span(&self) -> TextSpan {
        TextSpan::from_offsets(self.start, self.current)
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_token_with_literal(kind, Literal::None);
    }

    fn add_token_with_literal(&mut self, kind: TokenKind, literal: Literal) {
        let lexeme = &self.source[self.start..self.current];
        self.tokens.push(Token::new(kind, lexeme, literal, self.line, self.lexeme_span()));
    }

    fn error(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let diagnostic = Diagnostic::new(message, args, self.line, self.lexeme_span());
        tracing::trace!(line = self.line, code = message.code, "{}", diagnostic.message_text);
        self.diagnostics.add(diagnostic);
    }
}

/// Newlines in `bytes`, saturating at `u32::MAX`.
fn count_newlines(bytes: &[u8]) -> u32 {
    u32::try_from(memchr::memchr_iter(b'\n', bytes).count()).unwrap_or(u32::MAX)
}
