//! Lexical analysis of lipid names
//!
//! Provides tokenization with compile-time limits and integration with the
//! global logging system.

pub mod analyzer;

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::tokens::{Token, TokenStream};

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics, Tokenized};

// ============================================================================
// MODULE API
// ============================================================================

/// Tokenize a lipid name with default preferences
pub fn tokenize(source: &str) -> Result<Tokenized, LexerError> {
    LexicalAnalyzer::new().tokenize(source)
}

/// Tokenize with custom runtime preferences (limits remain compile-time)
pub fn tokenize_with_preferences(
    source: &str,
    preferences: LexicalPreferences,
) -> Result<Tokenized, LexerError> {
    LexicalAnalyzer::with_preferences(preferences).tokenize(source)
}

// ============================================================================
// MODULE INITIALIZATION AND VALIDATION
// ============================================================================

/// Check that every lexical error code is registered (for system startup)
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let lexical_codes = [
        crate::logging::codes::lexical::INVALID_CHARACTER,
        crate::logging::codes::lexical::WORD_TOO_LONG,
        crate::logging::codes::lexical::NUMBER_TOO_LONG,
        crate::logging::codes::lexical::TOKEN_LIMIT_EXCEEDED,
    ];

    for code in &lexical_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_debug!("Lexical limits initialized",
        "max_token_count" => MAX_TOKEN_COUNT,
        "max_word_length" => MAX_WORD_LENGTH,
        "max_number_length" => MAX_NUMBER_LENGTH
    );

    Ok(())
}

/// Get the compile-time lexical limits (for reporting)
pub fn get_lexical_limits() -> LexicalLimits {
    LexicalLimits {
        max_token_count: MAX_TOKEN_COUNT,
        max_word_length: MAX_WORD_LENGTH,
        max_number_length: MAX_NUMBER_LENGTH,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalLimits {
    pub max_token_count: usize,
    pub max_word_length: usize,
    pub max_number_length: usize,
}

// ============================================================================
// ANALYSIS HELPERS
// ============================================================================

/// Token distribution of a stream, including non-significant tokens
pub fn get_token_counts(token_stream: &TokenStream) -> TokenCounts {
    let mut counts = TokenCounts::default();

    for token in token_stream.all_tokens() {
        counts.total += 1;
        match &token.value {
            Token::Letters(_) => counts.words += 1,
            Token::Digits(_) => counts.numbers += 1,
            Token::Space => counts.spaces += 1,
            Token::Invalid(_) => counts.invalid += 1,
            Token::Eof => {}
            _ => counts.symbols += 1,
        }
    }

    counts
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenCounts {
    pub total: usize,
    pub words: usize,
    pub numbers: usize,
    pub symbols: usize,
    pub spaces: usize,
    pub invalid: usize,
}

impl TokenCounts {
    pub fn has_content(&self) -> bool {
        self.words > 0 || self.numbers > 0
    }

    pub fn is_within_limits(&self) -> bool {
        self.total <= MAX_TOKEN_COUNT + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging() {
        assert!(init_lexical_analysis_logging().is_ok());
    }

    #[test]
    fn test_limits_are_positive() {
        let limits = get_lexical_limits();
        assert!(limits.max_token_count > 0);
        assert!(limits.max_word_length > 0);
        assert!(limits.max_number_length > 0);
    }

    #[test]
    fn test_token_counts() {
        let tokenized = tokenize("Cer(d18:1/24:0)").unwrap();
        let counts = get_token_counts(&tokenized.stream);
        assert_eq!(counts.words, 2);
        assert_eq!(counts.numbers, 4);
        assert_eq!(counts.symbols, 5);
        assert_eq!(counts.total, 12);
        assert!(counts.has_content());
        assert!(counts.is_within_limits());
    }

    #[test]
    fn test_tokenize_with_preferences() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: true,
            trim_input: false,
        };
        let tokenized = tokenize_with_preferences("FA 18:4", preferences).unwrap();
        assert!(!tokenized.has_errors());
    }
}
