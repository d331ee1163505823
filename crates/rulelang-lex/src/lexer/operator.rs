use super::core::Lexer;
use crate::stream::RuneStream;
use crate::token::{SymbolKind, Token};
use rulelang_util::Error;

/// The closed operator vocabulary (§6.3), each lexeme mapped to its
/// `SymbolKind`. Longest-match is computed over this table rather than
/// incrementally, since every lexeme here is plain ASCII and `starts_with`
/// on the remaining source is always a safe (non-panicking) byte check
/// regardless of what non-ASCII text might follow.
const OPERATORS: &[(&str, SymbolKind)] = &[
    ("**=", SymbolKind::Assignment),
    ("**", SymbolKind::Other),
    (">>>=", SymbolKind::Assignment),
    ("<<:", SymbolKind::TypeCompare),
    (">>:", SymbolKind::TypeCompare),
    ("<:>", SymbolKind::TypeCompare),
    (">>>", SymbolKind::Shift),
    ("===", SymbolKind::ValueCompare),
    ("!==", SymbolKind::ValueCompare),
    ("&&=", SymbolKind::Assignment),
    ("^^=", SymbolKind::Assignment),
    ("||=", SymbolKind::Assignment),
    ("<<=", SymbolKind::Assignment),
    (">>=", SymbolKind::Assignment),
    ("==", SymbolKind::ValueCompare),
    ("!=", SymbolKind::ValueCompare),
    ("<=", SymbolKind::ValueCompare),
    (">=", SymbolKind::ValueCompare),
    ("<<", SymbolKind::Shift),
    (">>", SymbolKind::Shift),
    ("&&", SymbolKind::LogicalAnd),
    ("^^", SymbolKind::LogicalXor),
    ("||", SymbolKind::LogicalOr),
    ("..", SymbolKind::Range),
    ("::", SymbolKind::TypeCompare),
    ("!:", SymbolKind::TypeCompare),
    ("<:", SymbolKind::TypeCompare),
    (">:", SymbolKind::TypeCompare),
    ("*=", SymbolKind::Assignment),
    ("/=", SymbolKind::Assignment),
    ("%=", SymbolKind::Assignment),
    ("+=", SymbolKind::Assignment),
    ("-=", SymbolKind::Assignment),
    ("&=", SymbolKind::Assignment),
    ("^=", SymbolKind::Assignment),
    ("|=", SymbolKind::Assignment),
    ("~=", SymbolKind::Assignment),
    ("*", SymbolKind::Multiply),
    ("/", SymbolKind::Multiply),
    ("%", SymbolKind::Multiply),
    ("+", SymbolKind::Add),
    ("-", SymbolKind::Add),
    ("=", SymbolKind::Assignment),
    ("<", SymbolKind::ValueCompare),
    (">", SymbolKind::ValueCompare),
    ("!", SymbolKind::Other),
    ("@", SymbolKind::Other),
    ("?", SymbolKind::Other),
    ("(", SymbolKind::Other),
    (")", SymbolKind::Other),
    ("[", SymbolKind::Other),
    ("]", SymbolKind::Other),
    ("{", SymbolKind::Other),
    ("}", SymbolKind::Other),
    (".", SymbolKind::Other),
    (",", SymbolKind::Other),
    ("~", SymbolKind::Other),
    ("&", SymbolKind::Other),
    ("|", SymbolKind::Other),
    ("^", SymbolKind::Other),
    (":", SymbolKind::Other),
];

impl<'src> Lexer<'src> {
    pub(super) fn lex_operator(&mut self) -> Result<Token<'src>, Error> {
        let remaining = &self.stream.source()[self.stream.position()..];
        let best = OPERATORS
            .iter()
            .filter(|(op, _)| remaining.starts_with(op))
            .max_by_key(|(op, _)| op.len());

        match best {
            Some(&(op, kind)) => {
                let start = self.stream.position();
                for _ in 0..op.len() {
                    self.stream.advance();
                }
                Ok(Token::Symbol(self.slice_from(start), kind))
            }
            None => Err(Error::Lexical {
                message: format!("unexpected rune {:?}", self.stream.head()),
                count: self.stream.count(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_one(source: &str) -> Token<'_> {
        let mut lexer = Lexer::new(source);
        lexer.advance().unwrap();
        lexer.head().unwrap().clone()
    }

    #[test]
    fn longest_match_prefers_the_longer_operator() {
        assert!(matches!(lex_one(">>>="), Token::Symbol(">>>=", SymbolKind::Assignment)));
        assert!(matches!(lex_one(">>>"), Token::Symbol(">>>", SymbolKind::Shift)));
        assert!(matches!(lex_one(">>"), Token::Symbol(">>", SymbolKind::Shift)));
        assert!(matches!(lex_one(">"), Token::Symbol(">", SymbolKind::ValueCompare)));
    }

    #[test]
    fn exponent_operator_is_not_split_into_two_multiplies() {
        assert!(matches!(lex_one("**"), Token::Symbol("**", SymbolKind::Other)));
        assert!(matches!(lex_one("**="), Token::Symbol("**=", SymbolKind::Assignment)));
    }

    #[test]
    fn type_compare_operators() {
        assert!(matches!(lex_one("<:>"), Token::Symbol("<:>", SymbolKind::TypeCompare)));
        assert!(matches!(lex_one("::"), Token::Symbol("::", SymbolKind::TypeCompare)));
    }

    #[test]
    fn single_char_punctuation_is_other() {
        assert!(matches!(lex_one("@"), Token::Symbol("@", SymbolKind::Other)));
        assert!(matches!(lex_one("~"), Token::Symbol("~", SymbolKind::Other)));
    }

    #[test]
    fn unrecognized_rune_is_a_lexical_error() {
        let mut lexer = Lexer::new("`");
        lexer.advance().unwrap();
        assert!(lexer.head().is_err());
    }
}
