//! Shared primitive types used by the tokenizer, the parser and the CLI.

pub mod span;

pub use span::{format_excerpt, Position, Span, Spanned};
