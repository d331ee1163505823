use crate::stream::{RuneStream, StrRuneStream, EOT};
use crate::token::Token;
use crate::unicode::{is_ident_start, is_line_whitespace, is_newline};
use rulelang_util::Error;

/// The tokenizer: a memoizing, n-token-lookahead wrapper over a
/// [`StrRuneStream`].
///
/// `head`/`advance` operate on a position into the memoized `tokens`
/// list; `save_position`/`restore_position`/`discard_position` push and
/// pop indices into that same list, which is exactly what makes
/// backtracking over already-seen tokens free (re-lexing never
/// happens).
pub struct Lexer<'src> {
    pub(super) stream: StrRuneStream<'src>,
    tokens: Vec<Token<'src>>,
    index: usize,
    save_stack: Vec<usize>,
    pending_indentation: bool,
}

impl<'src> Lexer<'src> {
    /// Build a tokenizer over `source`. The very first token produced
    /// is always an `Indentation`, per the tokenizer's contract.
    pub fn new(source: &'src str) -> Self {
        Self {
            stream: StrRuneStream::new(source),
            tokens: Vec::new(),
            index: 0,
            save_stack: Vec::new(),
            pending_indentation: true,
        }
    }

    /// Whether the head token is not `Eof`.
    pub fn has(&mut self) -> Result<bool, Error> {
        Ok(!matches!(self.head()?, Token::Eof))
    }

    /// The token at the current lookahead position.
    pub fn head(&mut self) -> Result<&Token<'src>, Error> {
        self.fill_through(self.index)?;
        Ok(&self.tokens[self.index])
    }

    /// Move the lookahead position forward by one token. A no-op once
    /// the head token is `Eof`.
    pub fn advance(&mut self) -> Result<(), Error> {
        self.fill_through(self.index)?;
        if !matches!(self.tokens[self.index], Token::Eof) {
            self.index += 1;
        }
        Ok(())
    }

    /// Push the current lookahead position so it can be restored later.
    pub fn save_position(&mut self) {
        self.save_stack.push(self.index);
    }

    /// Pop the most recent saved position and rewind to it.
    pub fn restore_position(&mut self) {
        self.index = self
            .save_stack
            .pop()
            .expect("restore_position called without a matching save_position");
    }

    /// Pop the most recent saved position without rewinding — commits
    /// to everything consumed since the matching `save_position`.
    pub fn discard_position(&mut self) {
        self.save_stack
            .pop()
            .expect("discard_position called without a matching save_position");
    }

    /// Rune count at the current point in the underlying stream —
    /// threaded through into every [`Error`] this crate raises.
    pub fn rune_count(&self) -> u64 {
        self.stream.count()
    }

    fn fill_through(&mut self, idx: usize) -> Result<(), Error> {
        while self.tokens.len() <= idx {
            if matches!(self.tokens.last(), Some(Token::Eof)) {
                break;
            }
            let token = self.scan_token()?;
            self.tokens.push(token);
        }
        Ok(())
    }

    /// Produce the next token, consuming whitespace and comments as
    /// needed first. Called at most once per distinct lookahead slot —
    /// the result is memoized by `fill_through`.
    fn scan_token(&mut self) -> Result<Token<'src>, Error> {
        loop {
            if self.pending_indentation {
                return self.lex_indentation();
            }
            match self.stream.head() {
                EOT => return Ok(Token::Eof),
                ';' => {
                    self.stream.advance();
                    return Ok(Token::Terminator);
                }
                '\\' => {
                    self.stream.advance();
                    if is_newline(self.stream.head()) {
                        self.consume_newline_run();
                        continue;
                    }
                    return Err(Error::Lexical {
                        message: "expected a newline after an escaping backslash".into(),
                        count: self.stream.count(),
                    });
                }
                c if is_newline(c) => {
                    self.consume_one_newline();
                    self.pending_indentation = true;
                    continue;
                }
                c if is_line_whitespace(c) => {
                    self.stream.advance();
                    continue;
                }
                '#' => {
                    self.lex_comment()?;
                    continue;
                }
                '"' => return self.lex_string(),
                c if c.is_ascii_digit() => return self.lex_number(),
                '.' if self.peek_next().is_some_and(|c| c.is_ascii_digit()) => {
                    return self.lex_number()
                }
                c if is_ident_start(c) => return self.lex_identifier(),
                _ => return self.lex_operator(),
            }
        }
    }

    fn lex_indentation(&mut self) -> Result<Token<'src>, Error> {
        let start = self.stream.position();
        while is_line_whitespace(self.stream.head()) {
            self.stream.advance();
        }
        self.pending_indentation = false;
        Ok(Token::Indentation(self.slice_from(start)))
    }

    fn consume_one_newline(&mut self) {
        if self.stream.head() == '\r' {
            self.stream.advance();
            if self.stream.head() == '\n' {
                self.stream.advance();
            }
        } else if self.stream.head() == '\n' {
            self.stream.advance();
        }
    }

    fn consume_newline_run(&mut self) {
        while is_newline(self.stream.head()) {
            self.consume_one_newline();
        }
    }

    /// The rune immediately after the current head, without consuming
    /// anything. Used for two-rune lookahead decisions (`0b`/`0x`
    /// prefixes, `..` vs. a trailing-dot float, exponent signs).
    pub(super) fn peek_next(&self) -> Option<char> {
        let after_head = self.stream.position() + self.stream.head().len_utf8();
        self.stream.source()[after_head..].chars().next()
    }

    pub(super) fn slice_from(&self, start: usize) -> &'src str {
        &self.stream.source()[start..self.stream.position()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<String> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let tok = lexer.head().unwrap().to_string();
            let is_eof = matches!(lexer.head().unwrap(), Token::Eof);
            out.push(tok);
            if is_eof {
                break;
            }
            lexer.advance().unwrap();
        }
        out
    }

    #[test]
    fn first_token_is_always_indentation() {
        let toks = tokens("test");
        assert_eq!(toks, vec!["Indentation()", "Identifier(test)", "EOF()"]);
    }

    #[test]
    fn terminator_does_not_start_a_new_line() {
        let toks = tokens("a;b");
        assert_eq!(
            toks,
            vec![
                "Indentation()",
                "Identifier(a)",
                "Terminator()",
                "Identifier(b)",
                "EOF()"
            ]
        );
    }

    #[test]
    fn newline_emits_a_fresh_indentation_token() {
        let toks = tokens("a\n  b");
        assert_eq!(
            toks,
            vec![
                "Indentation()",
                "Identifier(a)",
                "Indentation(  )",
                "Identifier(b)",
                "EOF()"
            ]
        );
    }

    #[test]
    fn escaped_newline_suppresses_indentation() {
        let toks = tokens("a\\\nb");
        assert_eq!(
            toks,
            vec!["Indentation()", "Identifier(a)", "Identifier(b)", "EOF()"]
        );
    }

    #[test]
    fn save_restore_returns_to_the_same_head_token() {
        let mut lexer = Lexer::new("a b c");
        lexer.advance().unwrap();
        let before = lexer.head().unwrap().to_string();
        lexer.save_position();
        lexer.advance().unwrap();
        lexer.advance().unwrap();
        lexer.restore_position();
        assert_eq!(lexer.head().unwrap().to_string(), before);
    }

    #[test]
    fn line_comment_does_not_consume_the_newline() {
        let toks = tokens("a # comment\nb");
        assert_eq!(
            toks,
            vec![
                "Indentation()",
                "Identifier(a)",
                "Indentation()",
                "Identifier(b)",
                "EOF()"
            ]
        );
    }

    #[test]
    fn block_comment_closes_on_matching_run_length() {
        let toks = tokens("a ## inside # still inside ## b");
        assert_eq!(
            toks,
            vec!["Indentation()", "Identifier(a)", "Identifier(b)", "EOF()"]
        );
    }
}
