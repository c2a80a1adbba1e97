//! lox_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Lexical errors are never fatal. The scanner records them here and keeps
//! going; the caller decides what a non-empty collection means.

use lox_core::text::TextSpan;
use serde::Serialize;
use thiserror::Error;

/// A diagnostic message template with a code.
///
/// The template may contain `{0}`, `{1}`, etc. placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub message: &'static str,
}

/// A realized diagnostic tied to a source line.
///
/// `Display` renders the canonical one-line form,
/// `[line <N>] Error: <message>`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("[line {line}] Error: {message_text}")]
pub struct Diagnostic {
    /// 1-based line the scanner was on when the error was recorded.
    pub line: u32,
    /// Source text consumed by the failed recognition.
    #[serde(skip)]
    pub span: TextSpan,
    pub code: u32,
    #[serde(rename = "message")]
    pub message_text: String,
}

impl Diagnostic {
    pub fn new(message: &DiagnosticMessage, args: &[&str], line: u32, span: TextSpan) -> Self {
        Self {
            line,
            span,
            code: message.code,
            message_text: format_message(message.message, args),
        }
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// An ordered, append-only collection of diagnostics from one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Every lexical diagnostic is an error, so this is `!is_empty()`.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

impl<'a> IntoIterator for &'a DiagnosticCollection {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $msg:expr) => {
            DiagnosticMessage { code: $code, message: $msg }
        };
    }

    pub const UNEXPECTED_CHARACTER: DiagnosticMessage = diag!(1001, "Unexpected character: {0}");
    pub const UNTERMINATED_STRING: DiagnosticMessage = diag!(1002, "Unterminated string.");
}
