//! Character classification for the rulelang lexer.
//!
//! The grammar's identifier production is ASCII-only
//! (`[_A-Za-z][_A-Za-z0-9]*`), unlike a general-purpose language's
//! Unicode-aware identifiers, so these helpers stay ASCII rather than
//! delegating to `char::is_alphabetic`.

/// Checks if a character can start an identifier or keyword.
///
/// # Example
///
/// ```
/// use rulelang_lex::unicode::is_ident_start;
///
/// assert!(is_ident_start('a'));
/// assert!(is_ident_start('_'));
/// assert!(!is_ident_start('1'));
/// assert!(!is_ident_start('α'));
/// ```
pub fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

/// Checks if a character can continue an identifier or keyword.
///
/// # Example
///
/// ```
/// use rulelang_lex::unicode::is_ident_continue;
///
/// assert!(is_ident_continue('a'));
/// assert!(is_ident_continue('1'));
/// assert!(!is_ident_continue('-'));
/// ```
pub fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Checks if a character is printable source text: everything except
/// control characters, but excluding the [`EOT`](crate::stream::EOT)
/// sentinel itself.
pub fn is_printable(c: char) -> bool {
    c != crate::stream::EOT && (!c.is_control() || is_line_whitespace(c))
}

/// Checks if a character is a digit in the given radix (2, 10, or 16).
///
/// # Example
///
/// ```
/// use rulelang_lex::unicode::is_digit_in_base;
///
/// assert!(is_digit_in_base('1', 2));
/// assert!(!is_digit_in_base('2', 2));
/// assert!(is_digit_in_base('f', 16));
/// assert!(!is_digit_in_base('g', 16));
/// ```
pub fn is_digit_in_base(c: char, base: u32) -> bool {
    c.to_digit(base).is_some()
}

/// Checks if a character is horizontal line whitespace: space or tab.
///
/// Distinct from "any newline", since indentation and line-comment
/// bodies only ever absorb space/tab, never a line terminator.
pub fn is_line_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Checks if a character is one of the three newline forms the
/// tokenizer recognizes (`\n`, `\r`, or the first half of `\r\n`).
pub fn is_newline(c: char) -> bool {
    c == '\n' || c == '\r'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_ascii_only() {
        assert!(is_ident_start('_'));
        assert!(!is_ident_start('α'));
        assert!(is_ident_continue('9'));
        assert!(!is_ident_continue('.'));
    }

    #[test]
    fn digit_in_base_respects_radix() {
        assert!(is_digit_in_base('7', 10));
        assert!(!is_digit_in_base('8', 8));
        assert!(is_digit_in_base('F', 16));
    }

    #[test]
    fn line_whitespace_excludes_newlines() {
        assert!(is_line_whitespace(' '));
        assert!(is_line_whitespace('\t'));
        assert!(!is_line_whitespace('\n'));
    }
}
