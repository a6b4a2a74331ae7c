//! Syntax analysis: lipid name to parse tree
//!
//! Lexical errors do not stop the parser; they are merged with the syntax
//! errors into one [`ParsingFailure`].

mod error;
mod parser;

pub use error::{ParsingFailure, SyntaxError, SyntaxResult};
pub use parser::LipidParser;

use crate::config::runtime::{LexicalPreferences, ParserPreferences};
use crate::grammar::ast::nodes::LipidTree;
use crate::grammar::dialect::Dialect;
use crate::lexical::tokenize_with_preferences;
use crate::logging::codes;
use crate::{log_debug, log_error};

/// Tokenize and parse one name with default preferences
pub fn parse_lipid_name(source: &str, dialect: Dialect) -> Result<LipidTree, ParsingFailure> {
    parse_lipid_name_with_preferences(
        source,
        dialect,
        LexicalPreferences::default(),
        ParserPreferences::default(),
    )
}

pub fn parse_lipid_name_with_preferences(
    source: &str,
    dialect: Dialect,
    lexical: LexicalPreferences,
    preferences: ParserPreferences,
) -> Result<LipidTree, ParsingFailure> {
    log_debug!("Starting syntax analysis",
        "dialect" => dialect.as_str(),
        "length" => source.len()
    );

    let tokenized = tokenize_with_preferences(source, lexical)
        .map_err(|error| ParsingFailure::new(source, dialect, vec![error.into()]))?;

    let mut errors: Vec<SyntaxError> = tokenized.errors.into_iter().map(SyntaxError::from).collect();
    let collect_all = preferences.collect_all_errors;

    match LipidParser::with_preferences(source, tokenized.stream, dialect, preferences).parse() {
        Ok(tree) if errors.is_empty() => Ok(tree),
        Ok(_) => Err(ParsingFailure::new(source, dialect, errors)),
        Err(syntax_errors) => {
            if collect_all || errors.is_empty() {
                errors.extend(syntax_errors);
            }
            let failure = ParsingFailure::new(source, dialect, errors);
            log_error!(failure.error_code(), "Syntax analysis failed",
                "dialect" => dialect.as_str(),
                "errors" => failure.errors.len()
            );
            Err(failure)
        }
    }
}

/// Initialize syntax logging by checking the error registry
pub fn init_syntax_logging() -> Result<(), String> {
    let required = [
        codes::syntax::UNEXPECTED_TOKEN,
        codes::syntax::UNEXPECTED_END_OF_INPUT,
        codes::syntax::GRAMMAR_VIOLATION,
        codes::syntax::TOO_MANY_ERRORS,
        codes::syntax::TOO_MANY_CHAINS,
        codes::syntax::INTERNAL_PARSER_ERROR,
    ];

    for code in required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Syntax error code {} missing from registry", code.as_str()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_lexical_and_syntax_errors_are_merged() {
        let failure = parse_lipid_name("PE 18:0#/1x", Dialect::Goslin).unwrap_err();
        assert!(failure.errors.iter().any(SyntaxError::is_lexical));
        assert!(failure.errors.iter().any(|e| !e.is_lexical()));
        assert!(failure
            .errors
            .windows(2)
            .all(|pair| pair[0].offset() <= pair[1].offset()));
    }

    #[test]
    fn test_report_contains_excerpt() {
        let failure = parse_lipid_name("PE(18:0/16:1", Dialect::LipidMaps).unwrap_err();
        assert_matches!(failure.first_error(), Some(SyntaxError::UnexpectedEndOfInput { .. }));
        let report = failure.format_report();
        assert!(report.contains("PE(18:0/16:1"));
        assert!(report.contains('^'));
    }

    #[test]
    fn test_init_syntax_logging() {
        assert!(init_syntax_logging().is_ok());
    }
}
