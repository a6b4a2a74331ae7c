//! Shorthand lipid name parser
//!
//! Parses names written in the Goslin, GoslinFragments, LIPID MAPS,
//! SwissLipids and HMDB notations into one typed model and renders them back
//! as canonical text at any level of detail the name supports.

// Internal modules
pub mod batch;
pub mod config;
pub mod domain;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod resolution;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use batch::{BatchConfig, BatchError, BatchResults};
pub use domain::{
    lookup_class, Adduct, FattyAcid, LipidAdduct, LipidCategory, LipidClass, LipidFaBondType,
    LipidLevel, LipidSpecies, LipidSpeciesInfo,
};
pub use grammar::Dialect;
pub use normalize::{normalize_abbreviation, ExternalDatabaseReference};
pub use pipeline::{parse, PipelineError, PipelineOutput, PipelineResult};
pub use render::{render, render_normalized, RenderError};
