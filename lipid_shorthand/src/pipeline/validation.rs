use crate::logging::codes;

/// Validate that the pipeline is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::lexical::init_lexical_analysis_logging()?;
    crate::syntax::init_syntax_logging()?;

    let downstream = [
        codes::input::EMPTY_NAME,
        codes::input::NAME_TOO_LONG,
        codes::resolution::UNSUPPORTED_FEATURE,
        codes::resolution::CONSTRAINT_VIOLATION,
        codes::resolution::NUMBER_FORMAT,
        codes::resolution::MALFORMED_TREE,
        codes::render::INSUFFICIENT_DETAIL,
        codes::dialect::UNSUPPORTED_DIALECT,
    ];
    for code in downstream {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Error code {} missing from registry", code.as_str()));
        }
    }

    if crate::domain::LipidClass::ALL.is_empty() {
        return Err("Lipid class table is empty".to_string());
    }

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "classes" => crate::domain::LipidClass::ALL.len(),
        "dialects" => crate::grammar::dialect::Dialect::ALL.len()
    );

    Ok(())
}
