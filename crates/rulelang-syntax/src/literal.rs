//! AST-owned literal values.
//!
//! `rulelang-lex::token`'s literal structs borrow their lexeme straight
//! out of the source text, which is exactly right for a token that
//! never outlives the tokenizer's lookahead buffer. Once a literal
//! becomes part of the AST it can outlive the lexer, and — per §4.6's
//! literal reducer — it can also be *synthesized* (the negated form of
//! a literal has no lexeme anywhere in the source). So the AST keeps
//! its own copies of these structs, `Cow`-backed instead of borrow-only,
//! reusing the lexer's decoding routines rather than duplicating them.

use num_bigint::BigInt;
use num_rational::BigRational;
use once_cell::unsync::OnceCell;
use rulelang_lex::token;
use rulelang_util::Error;
use std::borrow::Cow;
use std::fmt;

/// A string literal node, decoded lazily and cached like its token
/// counterpart.
#[derive(Debug, Clone)]
pub struct StringLiteral<'src> {
    pub lexeme: Cow<'src, str>,
    decoded: OnceCell<String>,
}

impl<'src> StringLiteral<'src> {
    pub fn from_token(tok: token::StringLiteral<'src>) -> Self {
        Self {
            lexeme: Cow::Borrowed(tok.lexeme),
            decoded: OnceCell::new(),
        }
    }

    /// The decoded string, computing and caching it on first call.
    pub fn value(&self) -> Result<&String, Error> {
        self.decoded.get_or_try_init(|| token::decode_string(&self.lexeme))
    }
}

impl fmt::Display for StringLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

/// An integer literal node. See module docs for why this isn't just a
/// re-export of `token::IntegerLiteral`.
#[derive(Debug, Clone)]
pub struct IntegerLiteral<'src> {
    pub lexeme: Cow<'src, str>,
    decoded: OnceCell<BigInt>,
}

impl<'src> IntegerLiteral<'src> {
    pub fn from_token(tok: token::IntegerLiteral<'src>) -> Self {
        Self {
            lexeme: Cow::Borrowed(tok.lexeme),
            decoded: OnceCell::new(),
        }
    }

    /// Build a literal carrying a value that has no corresponding
    /// source lexeme (e.g. the literal reducer's constant-folded
    /// negation). `lexeme` is a synthesized display form, not a
    /// location in any source text.
    pub fn with_value(lexeme: String, value: BigInt) -> Self {
        let decoded = OnceCell::new();
        let _ = decoded.set(value);
        Self {
            lexeme: Cow::Owned(lexeme),
            decoded,
        }
    }

    pub fn value(&self) -> Result<&BigInt, Error> {
        self.decoded
            .get_or_try_init(|| token::decode_integer(&self.lexeme))
    }

    /// The radix-qualified AST node name used by the canonical textual
    /// form (`DecimalIntegerLiteral`, `BinaryIntegerLiteral`,
    /// `HexIntegerLiteral`).
    pub fn variant_name(&self) -> &'static str {
        if self.lexeme.starts_with("0b") || self.lexeme.starts_with("0B") {
            "BinaryIntegerLiteral"
        } else if self.lexeme.starts_with("0x") || self.lexeme.starts_with("0X") {
            "HexIntegerLiteral"
        } else {
            "DecimalIntegerLiteral"
        }
    }
}

impl fmt::Display for IntegerLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.variant_name(), self.lexeme)
    }
}

/// A float literal node.
#[derive(Debug, Clone)]
pub struct FloatLiteral<'src> {
    pub lexeme: Cow<'src, str>,
    decoded: OnceCell<BigRational>,
}

impl<'src> FloatLiteral<'src> {
    pub fn from_token(tok: token::FloatLiteral<'src>) -> Self {
        Self {
            lexeme: Cow::Borrowed(tok.lexeme),
            decoded: OnceCell::new(),
        }
    }

    pub fn with_value(lexeme: String, value: BigRational) -> Self {
        let decoded = OnceCell::new();
        let _ = decoded.set(value);
        Self {
            lexeme: Cow::Owned(lexeme),
            decoded,
        }
    }

    pub fn value(&self) -> Result<&BigRational, Error> {
        self.decoded.get_or_try_init(|| token::decode_float(&self.lexeme))
    }
}

impl fmt::Display for FloatLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FloatLiteral({})", self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesized_negative_integer_has_no_source_lexeme_but_decodes() {
        let lit = IntegerLiteral::with_value("-5".to_string(), BigInt::from(-5));
        assert_eq!(*lit.value().unwrap(), BigInt::from(-5));
        assert_eq!(lit.to_string(), "DecimalIntegerLiteral(-5)");
    }

    #[test]
    fn decimal_display_names_match_the_radix() {
        let lit = IntegerLiteral::from_token(token::IntegerLiteral::new("0xFF"));
        assert_eq!(lit.variant_name(), "HexIntegerLiteral");
    }
}
