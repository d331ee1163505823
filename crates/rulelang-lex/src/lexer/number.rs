use super::core::Lexer;
use crate::stream::RuneStream;
use crate::token::{FloatLiteral, IntegerLiteral, Token};
use crate::unicode::is_digit_in_base;
use rulelang_util::Error;

impl<'src> Lexer<'src> {
    /// Lex a binary/hex/decimal integer or a float literal.
    ///
    /// Entered when the head is an ASCII digit, or a `.` immediately
    /// followed by one (the leading-dot float form).
    pub(super) fn lex_number(&mut self) -> Result<Token<'src>, Error> {
        let start = self.stream.position();

        if self.stream.head() == '0' && matches!(self.peek_next(), Some('b' | 'B')) {
            self.stream.advance();
            self.stream.advance();
            self.scan_digit_run(2)?;
            return Ok(Token::IntegerLiteral(IntegerLiteral::new(
                self.slice_from(start),
            )));
        }
        if self.stream.head() == '0' && matches!(self.peek_next(), Some('x' | 'X')) {
            self.stream.advance();
            self.stream.advance();
            self.scan_digit_run(16)?;
            return Ok(Token::IntegerLiteral(IntegerLiteral::new(
                self.slice_from(start),
            )));
        }

        let mut is_float = false;
        if self.stream.head() == '.' {
            // Leading-dot float: `.` digits exponent?
            self.stream.advance();
            is_float = true;
            self.scan_digit_run(10)?;
        } else {
            self.scan_digit_run(10)?;
            // `..` is the Range operator, not a trailing-dot float —
            // only consume a single, non-doubled `.` here.
            if self.stream.head() == '.' && !matches!(self.peek_next(), Some('.')) {
                self.stream.advance();
                is_float = true;
                if self.stream.head().is_ascii_digit() {
                    self.scan_digit_run(10)?;
                }
            }
        }

        if matches!(self.stream.head(), 'e' | 'E') && self.exponent_follows() {
            is_float = true;
            self.stream.advance();
            if matches!(self.stream.head(), '+' | '-') {
                self.stream.advance();
            }
            self.scan_digit_run(10)?;
        }

        let lexeme = self.slice_from(start);
        Ok(if is_float {
            Token::FloatLiteral(FloatLiteral::new(lexeme))
        } else {
            Token::IntegerLiteral(IntegerLiteral::new(lexeme))
        })
    }

    /// Consume a run of digits (in `radix`) and underscores. The run
    /// may start already positioned on its first digit; underscores may
    /// repeat freely but the run must end on a digit.
    fn scan_digit_run(&mut self, radix: u32) -> Result<(), Error> {
        let mut ended_on_digit = false;
        loop {
            let c = self.stream.head();
            if is_digit_in_base(c, radix) {
                self.stream.advance();
                ended_on_digit = true;
            } else if c == '_' {
                self.stream.advance();
                ended_on_digit = false;
            } else {
                break;
            }
        }
        if !ended_on_digit {
            return Err(Error::Lexical {
                message: "digit sequence missing after separator".into(),
                count: self.stream.count(),
            });
        }
        Ok(())
    }

    /// Whether the rune at the head, which must be `e`/`E`, is followed
    /// by a valid exponent body (`[+-]?digit`).
    fn exponent_follows(&self) -> bool {
        let after_e = &self.stream.source()[self.stream.position() + 1..];
        let after_sign = after_e.strip_prefix(['+', '-']).unwrap_or(after_e);
        after_sign.chars().next().is_some_and(|c| c.is_ascii_digit())
    }
}
