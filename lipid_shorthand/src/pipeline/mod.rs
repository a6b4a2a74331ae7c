//! Name processing pipeline
//!
//! name -> tokens -> parse tree -> lipid model. A name either passes every
//! stage or fails with the first stage's error; there are no partial results.

mod error;
mod info;
pub mod output;
mod result;
mod validation;

pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use output::PipelineOutput;
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::config::compile_time::input::MAX_NAME_LENGTH;
use crate::config::runtime::{LexicalPreferences, ParserPreferences};
use crate::domain::LipidAdduct;
use crate::grammar::dialect::Dialect;
use crate::logging::codes;
use std::time::Instant;

/// Parse one shorthand name in the given dialect
pub fn parse(dialect: Dialect, text: &str) -> Result<LipidAdduct, PipelineError> {
    process_name(dialect, text).map(|result| result.lipid)
}

/// Parse with default preferences, keeping the processing details
pub fn process_name(dialect: Dialect, text: &str) -> Result<PipelineResult, PipelineError> {
    process_name_with_preferences(
        dialect,
        text,
        LexicalPreferences::default(),
        ParserPreferences::default(),
    )
}

pub fn process_name_with_preferences(
    dialect: Dialect,
    text: &str,
    lexical: LexicalPreferences,
    parser: ParserPreferences,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    let name = validate_name(text)?;

    crate::log_debug!("Processing lipid name",
        "name" => name,
        "dialect" => dialect.as_str()
    );

    let tree = crate::syntax::parse_lipid_name_with_preferences(name, dialect, lexical, parser)?;
    let lipid = crate::resolution::resolve(&tree, dialect)?;

    let result = PipelineResult::new(name, dialect, lipid, start_time.elapsed());
    result.log_success();
    Ok(result)
}

/// Dialect selector as accepted on the command line
pub fn parse_dialect_name(name: &str) -> Result<Dialect, PipelineError> {
    Dialect::from_name(name).ok_or_else(|| {
        crate::log_error!(codes::dialect::UNSUPPORTED_DIALECT, "Unknown dialect selector",
            "dialect" => name
        );
        PipelineError::UnsupportedDialect {
            name: name.to_string(),
        }
    })
}

fn validate_name(text: &str) -> Result<&str, PipelineError> {
    let name = text.trim();
    if name.is_empty() {
        crate::log_error!(codes::input::EMPTY_NAME, "Empty lipid name");
        return Err(PipelineError::EmptyName);
    }
    let length = name.chars().count();
    if length > MAX_NAME_LENGTH {
        crate::log_error!(codes::input::NAME_TOO_LONG, "Lipid name exceeds length limit",
            "length" => length,
            "limit" => MAX_NAME_LENGTH
        );
        return Err(PipelineError::NameTooLong {
            length,
            limit: MAX_NAME_LENGTH,
        });
    }
    Ok(name)
}
