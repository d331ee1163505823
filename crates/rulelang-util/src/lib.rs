//! rulelang-util - shared interning and error types.
//!
//! The front-end is deliberately single-threaded (every `Lexer` /
//! `Parser` owns its own source text and lookahead buffer; distinct
//! instances never share state), so most of what a compiler's "util"
//! crate usually carries — typed index vectors, a source map, a
//! diagnostic-collecting `Handler` for whole-file error recovery — has
//! no counterpart here: the front-end propagates the first error with
//! `?` and stops (see [`Error`]). What remains is string interning for
//! identifiers and keywords, and the error taxonomy.

mod error;
mod symbol;

pub use error::{Error, Result};
pub use symbol::Symbol;
