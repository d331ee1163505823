use super::core::Lexer;
use crate::stream::RuneStream;
use crate::token::Token;
use crate::unicode::is_ident_continue;
use rulelang_util::Error;

/// The closed keyword set (§6.3): anything else matching the
/// identifier production is either `true`/`false` or a plain
/// identifier. Primitive type names (`bool`, `int`, ...) are
/// deliberately absent — they are ordinary identifiers to the
/// tokenizer and only become type leaves in the parser.
const KEYWORDS: &[&str] = &[
    "when", "with", "then", "match", "if", "else", "for", "for_rev", "while", "do", "try",
    "catch", "finally", "let", "var", "class", "void", "break", "continue", "throw", "static",
    "import", "package", "new", "throws", "public", "return", "this", "super",
];

impl<'src> Lexer<'src> {
    pub(super) fn lex_identifier(&mut self) -> Result<Token<'src>, Error> {
        let start = self.stream.position();
        while is_ident_continue(self.stream.head()) {
            self.stream.advance();
        }
        let lexeme = self.slice_from(start);
        Ok(if KEYWORDS.contains(&lexeme) {
            Token::Keyword(lexeme)
        } else if lexeme == "true" || lexeme == "false" {
            Token::BooleanLiteral(lexeme)
        } else {
            Token::Identifier(lexeme)
        })
    }
}
