//! Character constants and classes used by the scanner.

/// Returned by lookahead past the end of input.
pub const NULL_CHARACTER: char = '\0';
pub const LINE_FEED: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
pub const TAB: char = '\t';
pub const SPACE: char = ' ';
pub const DOUBLE_QUOTE: char = '"';
pub const DOT: char = '.';
pub const EQUALS: char = '=';
pub const SLASH: char = '/';

/// Whitespace that is skipped without affecting the line counter.
#[inline]
pub fn is_white_space(ch: char) -> bool {
    matches!(ch, SPACE | CARRIAGE_RETURN | TAB)
}

/// Check if a character is an ASCII decimal digit.
#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_space_excludes_newline() {
        assert!(is_white_space(' '));
        assert!(is_white_space('\t'));
        assert!(is_white_space('\r'));
        assert!(!is_white_space('\n'));
        assert!(!is_white_space('\u{00A0}'));
    }

    #[test]
    fn test_digit_is_ascii_only() {
        assert!(is_digit('0'));
        assert!(is_digit('9'));
        assert!(!is_digit('a'));
        assert!(!is_digit('٣')); // Arabic-Indic three
        assert!(!is_digit(NULL_CHARACTER));
    }
}
