//! The error taxonomy shared by the tokenizer and parser.
//!
//! There is no `Handler`/`DiagnosticBuilder` here: the front-end does
//! not attempt error recovery, so one error ends the walk and is
//! propagated with `?`. Every variant carries a rune count rather than
//! a byte span — callers that want a line/column need to re-scan the
//! source up to `count`, which is cheap and keeps this type independent
//! of any particular `RuneStream` implementation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The tokenizer could not form a valid token at the current position.
    #[error("lexical error at rune {count}: {message}")]
    Lexical { message: String, count: u64 },

    /// The parser found a token it could not fit into the grammar.
    #[error("syntax error at rune {count}: expected {expected}")]
    Syntax { expected: String, count: u64 },

    /// A block's indentation did not match any enclosing indent level.
    #[error("indentation error at rune {count}: {message}")]
    Indentation { message: String, count: u64 },

    /// A front-end invariant was violated; always a bug, never user input.
    #[error("internal error: {message}")]
    Internal { message: String },
}

/// Result type used throughout the front-end.
pub type Result<T> = std::result::Result<T, Error>;
