//! Core lexical analyzer
//!
//! Scans a lipid name into maximal letter and digit runs plus single-symbol
//! tokens. Characters outside the shorthand alphabet do not stop the scan:
//! they are recorded as [`LexerError::InvalidCharacter`] and kept in the
//! stream as non-significant tokens so the parser can still report every
//! grammar problem in the same pass.

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{Token, TokenStream};
use crate::utils::{Position, Span, Spanned};
use crate::{log_debug, log_error, log_success};
use std::iter::Peekable;
use std::str::CharIndices;

/// Lexical analysis errors, bounded by compile-time limits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Invalid character '{character}' at column {}", .span.start.column)]
    InvalidCharacter { character: char, span: Span },

    #[error("Word too long: {length} characters (max {MAX_WORD_LENGTH})")]
    WordTooLong { length: usize, span: Span },

    #[error("Number too long: {length} digits (max {MAX_NUMBER_LENGTH})")]
    NumberTooLong { length: usize, span: Span },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TokenLimitExceeded { count: usize, span: Span },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::InvalidCharacter { .. } => codes::lexical::INVALID_CHARACTER,
            LexerError::WordTooLong { .. } => codes::lexical::WORD_TOO_LONG,
            LexerError::NumberTooLong { .. } => codes::lexical::NUMBER_TOO_LONG,
            LexerError::TokenLimitExceeded { .. } => codes::lexical::TOKEN_LIMIT_EXCEEDED,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            LexerError::InvalidCharacter { span, .. }
            | LexerError::WordTooLong { span, .. }
            | LexerError::NumberTooLong { span, .. }
            | LexerError::TokenLimitExceeded { span, .. } => *span,
        }
    }

    /// Only the token limit stops the scan
    pub fn is_fatal(&self) -> bool {
        matches!(self, LexerError::TokenLimitExceeded { .. })
    }
}

#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub word_tokens: usize,
    pub number_tokens: usize,
    pub symbol_tokens: usize,
    pub space_tokens: usize,
    pub invalid_chars: usize,
    pub max_word_length: usize,
    pub max_number_length: usize,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;
        if !preferences.collect_detailed_metrics {
            return;
        }
        match token {
            Token::Letters(word) => {
                self.word_tokens += 1;
                self.max_word_length = self.max_word_length.max(word.len());
            }
            Token::Digits(number) => {
                self.number_tokens += 1;
                self.max_number_length = self.max_number_length.max(number.len());
            }
            Token::Space => self.space_tokens += 1,
            Token::Invalid(_) => self.invalid_chars += 1,
            Token::Eof => {}
            _ => self.symbol_tokens += 1,
        }
    }
}

/// Tokens of one name plus the recoverable problems found while scanning
#[derive(Debug, Clone)]
pub struct Tokenized {
    pub stream: TokenStream,
    pub errors: Vec<LexerError>,
}

impl Tokenized {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences: LexicalPreferences::default(),
        }
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// Tokenize one lipid name
    ///
    /// Returns `Err` only when the token limit is hit; every other problem is
    /// collected in [`Tokenized::errors`].
    pub fn tokenize(&mut self, source: &str) -> Result<Tokenized, LexerError> {
        self.metrics = LexicalMetrics::default();

        log_debug!("Starting lexical analysis",
            "char_count" => source.chars().count(),
            "max_tokens_allowed" => MAX_TOKEN_COUNT
        );

        let mut tokens = Vec::new();
        let mut errors = Vec::new();
        let mut chars = source.char_indices().peekable();
        let mut current_pos = Position::start();

        while let Some(&(byte_offset, ch)) = chars.peek() {
            current_pos = Position::new(byte_offset, current_pos.column);

            if tokens.len() >= MAX_TOKEN_COUNT {
                let error = LexerError::TokenLimitExceeded {
                    count: tokens.len(),
                    span: Span::empty_at(current_pos),
                };
                log_error!(error.error_code(), "Token limit exceeded",
                    span = error.span(),
                    "token_count" => tokens.len(),
                    "limit" => MAX_TOKEN_COUNT
                );
                return Err(error);
            }

            let (token, end) = if ch.is_ascii_alphabetic() {
                let (word, end) = scan_run(&mut chars, current_pos, |c| c.is_ascii_alphabetic());
                if word.len() > MAX_WORD_LENGTH {
                    errors.push(LexerError::WordTooLong {
                        length: word.len(),
                        span: Span::new(current_pos, end),
                    });
                }
                (Token::Letters(word), end)
            } else if ch.is_ascii_digit() {
                let (number, end) = scan_run(&mut chars, current_pos, |c| c.is_ascii_digit());
                if number.len() > MAX_NUMBER_LENGTH {
                    errors.push(LexerError::NumberTooLong {
                        length: number.len(),
                        span: Span::new(current_pos, end),
                    });
                }
                (Token::Digits(number), end)
            } else {
                chars.next();
                let end = current_pos.advance(ch);
                match Token::from_symbol(ch) {
                    Some(token) => (token, end),
                    None => {
                        let error = LexerError::InvalidCharacter {
                            character: ch,
                            span: Span::new(current_pos, end),
                        };
                        log_error!(error.error_code(), "Invalid character in lipid name",
                            span = error.span(),
                            "character" => ch.escape_debug()
                        );
                        errors.push(error);
                        (Token::Invalid(ch), end)
                    }
                }
            };

            self.metrics.record_token(&token, &self.preferences);
            tokens.push(Spanned::new(token, Span::new(current_pos, end)));
            current_pos = end;
        }

        tokens.push(Spanned::new(Token::Eof, Span::empty_at(current_pos)));
        self.metrics.record_token(&Token::Eof, &self.preferences);

        log_success!(codes::success::TOKENIZATION_COMPLETE, "Lexical analysis completed",
            "total_tokens" => self.metrics.total_tokens,
            "errors" => errors.len()
        );

        Ok(Tokenized {
            stream: TokenStream::new(tokens),
            errors,
        })
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Consume a maximal run of characters accepted by `accept`
fn scan_run<F>(chars: &mut Peekable<CharIndices<'_>>, start: Position, accept: F) -> (String, Position)
where
    F: Fn(char) -> bool,
{
    let mut text = String::new();
    let mut end = start;
    while let Some(&(_, c)) = chars.peek() {
        if !accept(c) {
            break;
        }
        text.push(c);
        end = end.advance(c);
        chars.next();
    }
    (text, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(source: &str) -> Vec<Token> {
        let tokenized = LexicalAnalyzer::new().tokenize(source).unwrap();
        tokenized
            .stream
            .all_tokens()
            .iter()
            .map(|t| t.value.clone())
            .collect()
    }

    #[test]
    fn test_goslin_name() {
        assert_eq!(
            values("PE 18:0/16:1"),
            vec![
                Token::Letters("PE".into()),
                Token::Space,
                Token::Digits("18".into()),
                Token::Colon,
                Token::Digits("0".into()),
                Token::Slash,
                Token::Digits("16".into()),
                Token::Colon,
                Token::Digits("1".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_positions_and_prefixes() {
        let tokens = values("PC(O-16:0/18:2(9Z,12Z))");
        assert_eq!(tokens[1], Token::LParen);
        assert_eq!(tokens[2], Token::Letters("O".into()));
        assert_eq!(tokens[3], Token::Minus);
        assert!(tokens.contains(&Token::Letters("Z".into())));
        assert!(tokens.contains(&Token::Comma));
    }

    #[test]
    fn test_letters_split_from_digits() {
        assert_eq!(
            values("d18"),
            vec![Token::Letters("d".into()), Token::Digits("18".into()), Token::Eof]
        );
    }

    #[test]
    fn test_invalid_character_is_collected() {
        let tokenized = LexicalAnalyzer::new().tokenize("PE 18:0*").unwrap();
        assert_eq!(tokenized.errors.len(), 1);
        match &tokenized.errors[0] {
            LexerError::InvalidCharacter { character, span } => {
                assert_eq!(*character, '*');
                assert_eq!(span.start.column, 8);
            }
            other => panic!("unexpected error {:?}", other),
        }
        // still tokenized past the invalid character
        assert!(tokenized.stream.has_eof());
    }

    #[test]
    fn test_long_number_is_reported() {
        let digits = "9".repeat(MAX_NUMBER_LENGTH + 1);
        let tokenized = LexicalAnalyzer::new().tokenize(&digits).unwrap();
        assert!(matches!(
            tokenized.errors[0],
            LexerError::NumberTooLong { .. }
        ));
    }

    #[test]
    fn test_token_limit_is_fatal() {
        let source = ":".repeat(MAX_TOKEN_COUNT + 1);
        let error = LexicalAnalyzer::new().tokenize(&source).unwrap_err();
        assert!(error.is_fatal());
        assert_eq!(error.error_code(), codes::lexical::TOKEN_LIMIT_EXCEEDED);
    }

    #[test]
    fn test_metrics() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: true,
            ..Default::default()
        };
        let mut analyzer = LexicalAnalyzer::with_preferences(preferences);
        analyzer.tokenize("SM(d18:1/16:0)").unwrap();
        let metrics = analyzer.metrics();
        assert_eq!(metrics.word_tokens, 2);
        assert_eq!(metrics.number_tokens, 4);
        assert_eq!(metrics.max_word_length, 2);
    }
}
