//! Token system for lipid shorthand names
//!
//! Converts raw text into a stream of [`Token`]s carrying source spans. The
//! [`TokenStream`] hides invalid characters from the parser (the lexer has
//! already reported them) while keeping every token's original location.

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenClass};
pub use token_stream::{SpannedToken, TokenStream, TokenStreamBuilder};

pub use crate::utils::{Position, Span, Spanned};
