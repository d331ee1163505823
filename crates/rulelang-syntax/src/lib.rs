//! AST, recursive-descent parser, and visitor/transformer framework for
//! the rule/expression language's front-end.
//!
//! Two entry points cover everything downstream collaborators need:
//! [`parse_expression`] parses one standalone expression to end of
//! input, and [`parse_program`] parses a statement stream to end of
//! input (the shape the REPL and any batch driver both want). Neither
//! attempts error recovery — the first lexical, syntactic, or
//! indentation error aborts the parse and is returned to the caller.
//!
//! ```
//! use rulelang_syntax::parse_expression;
//!
//! let expr = parse_expression("a if b else c").unwrap();
//! assert_eq!(expr.to_string(), "Conditional(a if b else c)");
//! ```

pub mod ast;
mod expr;
pub mod literal;
pub mod reduce;
mod stmt;
mod types;
pub mod visit;

pub use ast::{BinaryOp, Expr, NamedType, SignOp, Stmt};
pub use reduce::LiteralReducer;
pub use visit::{accept_expr, accept_stmt, accept_type, Transformer};

use rulelang_lex::{Lexer, Token};
use rulelang_util::{Error, Result, Symbol};

/// Parse `source` as one expression; trailing indentation/terminator
/// tokens are allowed but anything else left over is a syntax error.
pub fn parse_expression(source: &str) -> Result<Expr<'_>> {
    let mut parser = Parser::new(source);
    let result = expr::parse_expr(&mut parser)?;
    parser.expect_end()?;
    Ok(result)
}

/// Parse `source` as a statement stream to end of input.
pub fn parse_program(source: &str) -> Result<Vec<Stmt<'_>>> {
    let mut parser = Parser::new(source);
    stmt::parse_program(&mut parser)
}

/// Thin wrapper over a [`Lexer`] adding the shared token-matching
/// helpers every grammar-level function in [`expr`], [`stmt`], and
/// [`types`] builds on.
pub(crate) struct Parser<'src> {
    lexer: Lexer<'src>,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexer::new(source),
        }
    }

    fn has(&mut self) -> Result<bool> {
        self.lexer.has()
    }

    /// The head token, cloned out from under the lexer's borrow so
    /// callers can inspect it and still call `advance` afterward.
    fn head(&mut self) -> Result<Token<'src>> {
        Ok(self.lexer.head()?.clone())
    }

    fn advance(&mut self) -> Result<()> {
        self.lexer.advance()
    }

    fn save_position(&mut self) {
        self.lexer.save_position();
    }

    fn restore_position(&mut self) {
        self.lexer.restore_position();
    }

    fn discard_position(&mut self) {
        self.lexer.discard_position();
    }

    fn rune_count(&self) -> u64 {
        self.lexer.rune_count()
    }

    fn expect_identifier(&mut self) -> Result<Symbol> {
        match self.head()? {
            Token::Identifier(name) => {
                self.advance()?;
                Ok(Symbol::intern(name))
            }
            _ => Err(Error::Syntax {
                expected: "identifier".into(),
                count: self.rune_count(),
            }),
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        match self.head()? {
            Token::Keyword(k) if k == keyword => {
                self.advance()?;
                Ok(())
            }
            _ => Err(Error::Syntax {
                expected: format!("`{keyword}`"),
                count: self.rune_count(),
            }),
        }
    }

    fn at_keyword(&mut self, keyword: &str) -> Result<bool> {
        Ok(matches!(self.head()?, Token::Keyword(k) if k == keyword))
    }

    fn expect_symbol(&mut self, text: &str) -> Result<()> {
        match self.head()? {
            Token::Symbol(s, _) if s == text => {
                self.advance()?;
                Ok(())
            }
            _ => Err(Error::Syntax {
                expected: format!("`{text}`"),
                count: self.rune_count(),
            }),
        }
    }

    fn eat_symbol(&mut self, text: &str) -> Result<bool> {
        match self.head()? {
            Token::Symbol(s, _) if s == text => {
                self.advance()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Skip any trailing `Indentation`/`Terminator` tokens and require
    /// the stream end there — used after a single-expression parse.
    fn expect_end(&mut self) -> Result<()> {
        loop {
            match self.head()? {
                Token::Indentation(_) | Token::Terminator => self.advance()?,
                Token::Eof => return Ok(()),
                _ => {
                    return Err(Error::Syntax {
                        expected: "end of input".into(),
                        count: self.rune_count(),
                    })
                }
            }
        }
    }
}
