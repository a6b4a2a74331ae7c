//! Syntax errors and the aggregate parse failure
//!
//! Every error carries the grammar rule it was raised in, the offending
//! token and its span. A [`ParsingFailure`] bundles all errors of one name,
//! lexical ones included, ordered by position.

use crate::config::compile_time::syntax::MAX_SYNTAX_ERRORS;
use crate::grammar::dialect::Dialect;
use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::tokens::TokenClass;
use crate::utils::{format_excerpt, Span};

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Invalid character '{character}' at column {}", .span.start.column)]
    InvalidCharacter { character: char, span: Span },

    #[error("{} too long: {length} characters (max {max}) at {span}", .class.as_str())]
    TokenTooLong {
        class: TokenClass,
        length: usize,
        max: usize,
        span: Span,
    },

    #[error("Too many tokens: {count} at {span}")]
    TokenLimitExceeded { count: usize, span: Span },

    #[error("In {rule}: expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        rule: String,
        expected: String,
        found: String,
        span: Span,
    },

    #[error("In {rule}: unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput {
        rule: String,
        expected: String,
        span: Span,
    },

    #[error("In {rule}: {message} at {span}")]
    GrammarViolation {
        rule: String,
        message: String,
        span: Span,
    },

    #[error("Too many chains: {count} (max {max}) at {span}")]
    TooManyChains { count: usize, max: usize, span: Span },

    #[error("Too many syntax errors (max {MAX_SYNTAX_ERRORS}), stopped at {span}")]
    TooManyErrors { span: Span },

    #[error("Internal parser error: {message}")]
    InternalParserError { message: String },
}

impl SyntaxError {
    pub fn unexpected_token(rule: &str, expected: &str, found: &str, span: Span) -> Self {
        Self::UnexpectedToken {
            rule: rule.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
            span,
        }
    }

    pub fn unexpected_end_of_input(rule: &str, expected: &str, span: Span) -> Self {
        Self::UnexpectedEndOfInput {
            rule: rule.to_string(),
            expected: expected.to_string(),
            span,
        }
    }

    pub fn grammar_violation(rule: &str, message: &str, span: Span) -> Self {
        Self::GrammarViolation {
            rule: rule.to_string(),
            message: message.to_string(),
            span,
        }
    }

    pub fn internal_parser_error(message: &str) -> Self {
        Self::InternalParserError {
            message: message.to_string(),
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::InvalidCharacter { .. } => codes::lexical::INVALID_CHARACTER,
            Self::TokenTooLong {
                class: TokenClass::Number,
                ..
            } => codes::lexical::NUMBER_TOO_LONG,
            Self::TokenTooLong { .. } => codes::lexical::WORD_TOO_LONG,
            Self::TokenLimitExceeded { .. } => codes::lexical::TOKEN_LIMIT_EXCEEDED,
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::UnexpectedEndOfInput { .. } => codes::syntax::UNEXPECTED_END_OF_INPUT,
            Self::GrammarViolation { .. } => codes::syntax::GRAMMAR_VIOLATION,
            Self::TooManyChains { .. } => codes::syntax::TOO_MANY_CHAINS,
            Self::TooManyErrors { .. } => codes::syntax::TOO_MANY_ERRORS,
            Self::InternalParserError { .. } => codes::syntax::INTERNAL_PARSER_ERROR,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::InvalidCharacter { span, .. }
            | Self::TokenTooLong { span, .. }
            | Self::TokenLimitExceeded { span, .. }
            | Self::UnexpectedToken { span, .. }
            | Self::UnexpectedEndOfInput { span, .. }
            | Self::GrammarViolation { span, .. }
            | Self::TooManyChains { span, .. }
            | Self::TooManyErrors { span } => Some(*span),
            Self::InternalParserError { .. } => None,
        }
    }

    /// Byte offset used to order errors; errors without a span sort last
    pub fn offset(&self) -> usize {
        self.span().map(|span| span.start.offset).unwrap_or(usize::MAX)
    }

    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            Self::InvalidCharacter { .. } | Self::TokenTooLong { .. } | Self::TokenLimitExceeded { .. }
        )
    }

    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::InternalParserError { .. } | Self::TokenLimitExceeded { .. } | Self::TooManyErrors { .. }
        )
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}

impl From<LexerError> for SyntaxError {
    fn from(error: LexerError) -> Self {
        match error {
            LexerError::InvalidCharacter { character, span } => {
                Self::InvalidCharacter { character, span }
            }
            LexerError::WordTooLong { length, span } => Self::TokenTooLong {
                class: TokenClass::Word,
                length,
                max: crate::config::compile_time::lexical::MAX_WORD_LENGTH,
                span,
            },
            LexerError::NumberTooLong { length, span } => Self::TokenTooLong {
                class: TokenClass::Number,
                length,
                max: crate::config::compile_time::lexical::MAX_NUMBER_LENGTH,
                span,
            },
            LexerError::TokenLimitExceeded { count, span } => {
                Self::TokenLimitExceeded { count, span }
            }
        }
    }
}

/// All lexical and syntax errors found in one name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} syntax error(s) in {dialect} name '{input}'", .errors.len())]
pub struct ParsingFailure {
    pub input: String,
    pub dialect: Dialect,
    pub errors: Vec<SyntaxError>,
}

impl ParsingFailure {
    /// Errors are stored in source order regardless of the order they were found
    pub fn new(input: impl Into<String>, dialect: Dialect, mut errors: Vec<SyntaxError>) -> Self {
        errors.sort_by_key(SyntaxError::offset);
        Self {
            input: input.into(),
            dialect,
            errors,
        }
    }

    pub fn first_error(&self) -> Option<&SyntaxError> {
        self.errors.first()
    }

    pub fn error_code(&self) -> Code {
        self.first_error()
            .map(SyntaxError::error_code)
            .unwrap_or(codes::syntax::INTERNAL_PARSER_ERROR)
    }

    /// Every error with a caret excerpt of the name
    pub fn format_report(&self) -> String {
        let mut report = format!("{}\n", self);
        for error in &self.errors {
            match error.span() {
                Some(span) => {
                    report.push_str(&format_excerpt(&self.input, &span, &error.to_string()))
                }
                None => report.push_str(&format!("Error: {}", error)),
            }
            report.push('\n');
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    fn span_at(offset: usize) -> Span {
        let start = Position::new(offset, offset as u32 + 1);
        Span::new(start, start.advance('x'))
    }

    #[test]
    fn test_error_code_mapping() {
        let unexpected = SyntaxError::unexpected_token("chain", "':'", "'/'", span_at(0));
        assert_eq!(unexpected.error_code(), codes::syntax::UNEXPECTED_TOKEN);

        let grammar = SyntaxError::grammar_violation("chain_list", "mixed separators", span_at(0));
        assert_eq!(grammar.error_code(), codes::syntax::GRAMMAR_VIOLATION);

        let number = SyntaxError::from(LexerError::NumberTooLong {
            length: 40,
            span: span_at(3),
        });
        assert_eq!(number.error_code(), codes::lexical::NUMBER_TOO_LONG);
        assert!(number.is_lexical());
    }

    #[test]
    fn test_error_properties() {
        let internal = SyntaxError::internal_parser_error("unbalanced context stack");
        assert!(!internal.is_recoverable());
        assert_eq!(internal.span(), None);

        let unexpected = SyntaxError::unexpected_token("chain", "number", "'x'", span_at(2));
        assert!(unexpected.is_recoverable());
        assert_eq!(unexpected.span().map(|s| s.start.column), Some(3));
    }

    #[test]
    fn test_message_names_rule() {
        let error = SyntaxError::unexpected_token("double_bond_position", "'Z' or 'E'", "'X'", span_at(9));
        let message = error.to_string();
        assert!(message.contains("double_bond_position"));
        assert!(message.contains("'Z' or 'E'"));
    }

    #[test]
    fn test_failure_sorts_by_position() {
        let failure = ParsingFailure::new(
            "PE 18:0*16:1&",
            Dialect::Goslin,
            vec![
                SyntaxError::InvalidCharacter {
                    character: '&',
                    span: span_at(12),
                },
                SyntaxError::InvalidCharacter {
                    character: '*',
                    span: span_at(7),
                },
            ],
        );
        assert_eq!(failure.errors[0].offset(), 7);
        assert_eq!(failure.errors[1].offset(), 12);
        assert!(failure.to_string().starts_with("2 syntax error(s)"));
    }

    #[test]
    fn test_report_contains_excerpt() {
        let failure = ParsingFailure::new(
            "PE 18:0*",
            Dialect::Goslin,
            vec![SyntaxError::InvalidCharacter {
                character: '*',
                span: span_at(7),
            }],
        );
        let report = failure.format_report();
        assert!(report.contains("PE 18:0*"));
        assert!(report.contains('^'));
    }
}
