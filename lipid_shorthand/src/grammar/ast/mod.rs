//! Parse tree for lipid shorthand names

pub mod nodes;

pub use nodes::*;
