//! Rune stream, tokenizer, and literal decoding for the rulelang
//! front-end.
//!
//! This crate has no parsing in it — it turns source text into a
//! lookahead-able sequence of [`Token`]s and nothing more. See
//! `rulelang-syntax` for the AST and recursive-descent parser built on
//! top of it.
//!
//! ```
//! use rulelang_lex::Lexer;
//!
//! let mut lexer = Lexer::new("let x = 1");
//! let mut seen = Vec::new();
//! while lexer.has().unwrap() {
//!     seen.push(lexer.head().unwrap().to_string());
//!     lexer.advance().unwrap();
//! }
//! assert_eq!(
//!     seen,
//!     vec!["Indentation()", "Keyword(let)", "Identifier(x)", "Symbol(=)", "IntegerLiteral(1)"]
//! );
//! ```

pub mod lexer;
pub mod stream;
pub mod token;
pub mod unicode;

pub use lexer::Lexer;
pub use rulelang_util::{Error, Result};
pub use stream::{LineRuneStream, RuneStream, StrRuneStream, EOT};
pub use token::{FloatLiteral, IntegerLiteral, StringLiteral, SymbolKind, Token};
