//! Token variants and lazy literal decoding.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Num;
use once_cell::unsync::OnceCell;
use rulelang_util::Error;
use std::fmt;

/// The sub-kind carried by every [`Token::Symbol`], from the closed set
/// in the external-interface vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Multiply,
    Add,
    Shift,
    ValueCompare,
    TypeCompare,
    LogicalAnd,
    LogicalXor,
    LogicalOr,
    Range,
    Assignment,
    Other,
}

/// One lexical token, still carrying its original source lexeme.
///
/// `'src` ties every borrowed lexeme to the source text the tokenizer
/// was built over; nothing here outlives that borrow.
#[derive(Debug, Clone)]
pub enum Token<'src> {
    Indentation(&'src str),
    Terminator,
    Identifier(&'src str),
    Keyword(&'src str),
    Symbol(&'src str, SymbolKind),
    BooleanLiteral(&'src str),
    StringLiteral(StringLiteral<'src>),
    IntegerLiteral(IntegerLiteral<'src>),
    FloatLiteral(FloatLiteral<'src>),
    Eof,
}

impl<'src> Token<'src> {
    /// The exact source substring this token was produced from. `Eof`
    /// and `Terminator` have no lexeme of their own.
    pub fn lexeme(&self) -> &'src str {
        match self {
            Token::Indentation(s) => s,
            Token::Terminator => "",
            Token::Identifier(s) => s,
            Token::Keyword(s) => s,
            Token::Symbol(s, _) => s,
            Token::BooleanLiteral(s) => s,
            Token::StringLiteral(l) => l.lexeme,
            Token::IntegerLiteral(l) => l.lexeme,
            Token::FloatLiteral(l) => l.lexeme,
            Token::Eof => "",
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Indentation(s) => write!(f, "Indentation({s})"),
            Token::Terminator => write!(f, "Terminator()"),
            Token::Identifier(s) => write!(f, "Identifier({s})"),
            Token::Keyword(s) => write!(f, "Keyword({s})"),
            Token::Symbol(s, _) => write!(f, "Symbol({s})"),
            Token::BooleanLiteral(s) => write!(f, "BooleanLiteral({s})"),
            Token::StringLiteral(l) => write!(f, "StringLiteral({})", l.lexeme),
            Token::IntegerLiteral(l) => write!(f, "IntegerLiteral({})", l.lexeme),
            Token::FloatLiteral(l) => write!(f, "FloatLiteral({})", l.lexeme),
            Token::Eof => write!(f, "EOF()"),
        }
    }
}

/// Decode a `BooleanLiteral`'s lexeme directly; trivial enough that it
/// needs no caching.
pub fn decode_boolean(lexeme: &str) -> bool {
    lexeme == "true"
}

/// A string literal: raw lexeme plus its lazily-decoded, cached value.
#[derive(Debug, Clone)]
pub struct StringLiteral<'src> {
    pub lexeme: &'src str,
    decoded: OnceCell<String>,
}

impl<'src> StringLiteral<'src> {
    pub fn new(lexeme: &'src str) -> Self {
        Self {
            lexeme,
            decoded: OnceCell::new(),
        }
    }

    /// The decoded string value, computing and caching it on first call.
    pub fn value(&self) -> Result<&String, Error> {
        self.decoded.get_or_try_init(|| decode_string(self.lexeme))
    }
}

/// An integer literal: raw lexeme plus its lazily-decoded, cached
/// arbitrary-precision value.
#[derive(Debug, Clone)]
pub struct IntegerLiteral<'src> {
    pub lexeme: &'src str,
    decoded: OnceCell<BigInt>,
}

impl<'src> IntegerLiteral<'src> {
    pub fn new(lexeme: &'src str) -> Self {
        Self {
            lexeme,
            decoded: OnceCell::new(),
        }
    }

    pub fn value(&self) -> Result<&BigInt, Error> {
        self.decoded
            .get_or_try_init(|| decode_integer(self.lexeme))
    }
}

/// A float literal: raw lexeme plus its lazily-decoded, cached exact
/// rational value.
#[derive(Debug, Clone)]
pub struct FloatLiteral<'src> {
    pub lexeme: &'src str,
    decoded: OnceCell<BigRational>,
}

impl<'src> FloatLiteral<'src> {
    pub fn new(lexeme: &'src str) -> Self {
        Self {
            lexeme,
            decoded: OnceCell::new(),
        }
    }

    pub fn value(&self) -> Result<&BigRational, Error> {
        self.decoded.get_or_try_init(|| decode_float(self.lexeme))
    }
}

/// Strip digit-group underscores from a numeric lexeme body.
fn strip_underscores(text: &str) -> String {
    text.chars().filter(|&c| c != '_').collect()
}

pub fn decode_integer(lexeme: &str) -> Result<BigInt, Error> {
    let (radix, digits) = if let Some(rest) = lexeme.strip_prefix("0b").or(lexeme.strip_prefix("0B")) {
        (2, rest)
    } else if let Some(rest) = lexeme.strip_prefix("0x").or(lexeme.strip_prefix("0X")) {
        (16, rest)
    } else {
        (10, lexeme)
    };
    let cleaned = strip_underscores(digits);
    BigInt::from_str_radix(&cleaned, radix).map_err(|e| Error::Internal {
        message: format!("malformed integer lexeme {lexeme:?}: {e}"),
    })
}

pub fn decode_float(lexeme: &str) -> Result<BigRational, Error> {
    let cleaned = strip_underscores(lexeme);
    let (mantissa_part, exponent) = match cleaned.find(['e', 'E']) {
        Some(idx) => {
            let exp_str = &cleaned[idx + 1..];
            let exp: i64 = exp_str.parse().map_err(|e| Error::Internal {
                message: format!("malformed exponent in float lexeme {lexeme:?}: {e}"),
            })?;
            (&cleaned[..idx], exp)
        }
        None => (cleaned.as_str(), 0),
    };

    let (int_part, frac_part) = match mantissa_part.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa_part, ""),
    };

    let digits: String = format!("{int_part}{frac_part}");
    let digits = if digits.is_empty() { "0".to_string() } else { digits };
    let mantissa = BigInt::from_str_radix(&digits, 10).map_err(|e| Error::Internal {
        message: format!("malformed mantissa in float lexeme {lexeme:?}: {e}"),
    })?;

    let scale = exponent - frac_part.len() as i64;
    let value = if scale >= 0 {
        BigRational::from_integer(mantissa * BigInt::from(10).pow(scale as u32))
    } else {
        BigRational::new(mantissa, BigInt::from(10).pow((-scale) as u32))
    };
    Ok(value)
}

pub fn decode_string(lexeme: &str) -> Result<String, Error> {
    let body = lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| Error::Internal {
            message: format!("string lexeme {lexeme:?} is missing its quotes"),
        })?;

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escape = chars.next().ok_or_else(|| Error::Internal {
            message: format!("string lexeme {lexeme:?} ends with a dangling backslash"),
        })?;
        let decoded = match escape {
            'a' => '\u{7}',
            'b' => '\u{8}',
            't' => '\t',
            'n' => '\n',
            'v' => '\u{b}',
            'f' => '\u{c}',
            'r' => '\r',
            '"' => '"',
            '\\' => '\\',
            'u' => {
                let mut hex = String::new();
                while hex.len() < 8 && chars.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                    hex.push(chars.next().unwrap());
                }
                if hex.is_empty() {
                    return Err(Error::Internal {
                        message: format!(
                            "string lexeme {lexeme:?} has a \\u escape with no hex digits"
                        ),
                    });
                }
                let codepoint = u32::from_str_radix(&hex, 16).map_err(|e| Error::Internal {
                    message: format!("malformed \\u escape in {lexeme:?}: {e}"),
                })?;
                char::from_u32(codepoint).ok_or_else(|| Error::Internal {
                    message: format!(
                        "\\u{hex} in {lexeme:?} is not a valid Unicode scalar value"
                    ),
                })?
            }
            other => {
                return Err(Error::Internal {
                    message: format!("unknown escape \\{other} in string lexeme {lexeme:?}"),
                })
            }
        };
        out.push(decoded);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_binary_integer() {
        let lit = IntegerLiteral::new("0b1101_0001");
        assert_eq!(*lit.value().unwrap(), BigInt::from(209));
    }

    #[test]
    fn decodes_hex_integer_beyond_64_bits() {
        let lit = IntegerLiteral::new("0xDEAD_BEEF_DEAD_BEEF_01");
        let expected = BigInt::from_str_radix("DEADBEEFDEADBEEF01", 16).unwrap();
        assert_eq!(*lit.value().unwrap(), expected);
    }

    #[test]
    fn decode_is_idempotent() {
        let lit = IntegerLiteral::new("42");
        let first = lit.value().unwrap().clone();
        let second = lit.value().unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(lit.lexeme, "42");
    }

    #[test]
    fn decodes_float_with_trailing_dot_exponent() {
        let lit = FloatLiteral::new("1.e2");
        assert_eq!(*lit.value().unwrap(), BigRational::from_integer(BigInt::from(100)));
    }

    #[test]
    fn decodes_float_fraction_exactly() {
        let lit = FloatLiteral::new("0.1");
        assert_eq!(
            *lit.value().unwrap(),
            BigRational::new(BigInt::from(1), BigInt::from(10))
        );
    }

    #[test]
    fn decodes_string_escapes() {
        let lit = StringLiteral::new("\"te\\nst\"");
        assert_eq!(lit.value().unwrap(), "te\nst");
    }

    #[test]
    fn decodes_unicode_escape() {
        let lit = StringLiteral::new("\"\\u48\"");
        assert_eq!(lit.value().unwrap(), "H");
    }

    #[test]
    fn display_forms_match_the_documented_examples() {
        assert_eq!(Token::Identifier("foo").to_string(), "Identifier(foo)");
        assert_eq!(Token::Eof.to_string(), "EOF()");
        assert_eq!(
            Token::Indentation("    ").to_string(),
            "Indentation(    )"
        );
    }
}
