//! Grammar definitions for the supported shorthand dialects

pub mod ast;
pub mod builders;
pub mod dialect;

// Re-export AST types
pub use ast::nodes::*;

pub use dialect::{Dialect, DialectRules, HeadGroupLayout};

// Re-export builders
pub use builders::*;
