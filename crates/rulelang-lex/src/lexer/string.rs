use super::core::Lexer;
use crate::stream::{RuneStream, EOT};
use crate::token::{StringLiteral, Token};
use crate::unicode::{is_line_whitespace, is_newline, is_printable};
use rulelang_util::Error;

impl<'src> Lexer<'src> {
    /// Scan a string literal's raw lexeme, quotes included. Escapes are
    /// validated here (shape only); decoding them into the actual
    /// string value is deferred to [`StringLiteral::value`].
    pub(super) fn lex_string(&mut self) -> Result<Token<'src>, Error> {
        let start = self.stream.position();
        self.stream.advance(); // opening quote

        loop {
            match self.stream.head() {
                EOT => {
                    return Err(Error::Lexical {
                        message: "unterminated string literal".into(),
                        count: self.stream.count(),
                    })
                }
                c if is_newline(c) => {
                    return Err(Error::Lexical {
                        message: "unterminated string literal".into(),
                        count: self.stream.count(),
                    })
                }
                '"' => {
                    self.stream.advance();
                    break;
                }
                '\\' => {
                    self.stream.advance();
                    self.lex_escape()?;
                }
                c if is_printable(c) || is_line_whitespace(c) => {
                    self.stream.advance();
                }
                c => {
                    return Err(Error::Lexical {
                        message: format!("unexpected rune {c:?} in string literal"),
                        count: self.stream.count(),
                    })
                }
            }
        }

        Ok(Token::StringLiteral(StringLiteral::new(
            self.slice_from(start),
        )))
    }

    /// Validate (and consume) one escape body, head positioned just
    /// past the backslash.
    fn lex_escape(&mut self) -> Result<(), Error> {
        match self.stream.head() {
            'a' | 'b' | 't' | 'n' | 'v' | 'f' | 'r' | '"' | '\\' => {
                self.stream.advance();
                Ok(())
            }
            'u' => {
                self.stream.advance();
                let mut digits = 0;
                while digits < 8 && self.stream.head().is_ascii_hexdigit() {
                    self.stream.advance();
                    digits += 1;
                }
                if digits == 0 {
                    return Err(Error::Lexical {
                        message: "malformed unicode escape: expected at least one hex digit"
                            .into(),
                        count: self.stream.count(),
                    });
                }
                Ok(())
            }
            other => Err(Error::Lexical {
                message: format!("malformed escape \\{other}"),
                count: self.stream.count(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_one(source: &str) -> Result<Token<'_>, Error> {
        let mut lexer = Lexer::new(source);
        lexer.advance()?;
        Ok(lexer.head()?.clone())
    }

    #[test]
    fn plain_string_preserves_its_raw_lexeme() {
        let tok = lex_one("\"hello\"").unwrap();
        assert!(matches!(tok, Token::StringLiteral(l) if l.lexeme == "\"hello\""));
    }

    #[test]
    fn newline_escape_is_kept_raw_until_decoded() {
        let tok = lex_one("\"te\\nst\"").unwrap();
        assert!(matches!(tok, Token::StringLiteral(l) if l.lexeme == "\"te\\nst\""));
    }

    #[test]
    fn unicode_escape_consumes_up_to_eight_hex_digits() {
        let tok = lex_one("\"\\u0001F600x\"").unwrap();
        assert!(matches!(tok, Token::StringLiteral(l) if l.lexeme == "\"\\u0001F600x\""));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(lex_one("\"abc").is_err());
    }

    #[test]
    fn unknown_escape_is_an_error() {
        assert!(lex_one("\"\\q\"").is_err());
    }
}
