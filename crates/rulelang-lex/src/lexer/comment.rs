use super::core::Lexer;
use crate::stream::{RuneStream, EOT};
use crate::unicode::{is_line_whitespace, is_newline, is_printable};
use rulelang_util::Error;

impl<'src> Lexer<'src> {
    /// Consume a comment starting at the head `#`. Produces no token —
    /// callers loop back into `scan_token` afterward.
    ///
    /// A single `#` opens a line comment (runs to end of line, newline
    /// not consumed). Two or more consecutive `#`s open a block
    /// comment, closed by exactly that many consecutive `#`s; a run of
    /// a *different* length inside is just content. This means nesting
    /// works only by the author picking an opening run longer than any
    /// `#` run that appears inside — there is no real recursive depth
    /// tracking.
    pub(super) fn lex_comment(&mut self) -> Result<(), Error> {
        let mut opener_len = 0usize;
        while self.stream.head() == '#' {
            self.stream.advance();
            opener_len += 1;
        }

        if opener_len == 1 {
            while self.stream.head() != EOT && !is_newline(self.stream.head()) {
                let c = self.stream.head();
                if !(is_printable(c) || is_line_whitespace(c)) {
                    return Err(Error::Lexical {
                        message: format!("invalid rune {c:?} in line comment"),
                        count: self.stream.count(),
                    });
                }
                self.stream.advance();
            }
            return Ok(());
        }

        loop {
            if self.stream.head() == EOT {
                return Err(Error::Lexical {
                    message: "block comment not closed".into(),
                    count: self.stream.count(),
                });
            }
            if self.stream.head() == '#' {
                let rest = &self.stream.source()[self.stream.position()..];
                let run_len = rest.chars().take_while(|&c| c == '#').count();
                for _ in 0..run_len {
                    self.stream.advance();
                }
                if run_len == opener_len {
                    return Ok(());
                }
                continue;
            }
            let c = self.stream.head();
            if !(is_printable(c) || c.is_whitespace()) {
                return Err(Error::Lexical {
                    message: format!("invalid rune {c:?} in block comment"),
                    count: self.stream.count(),
                });
            }
            self.stream.advance();
        }
    }
}
