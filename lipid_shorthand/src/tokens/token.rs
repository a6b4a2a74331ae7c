//! Tokens of lipid shorthand names
//!
//! The lexical layer is dialect independent: words and numbers are maximal
//! runs, every symbol the notations use is its own token, and the grammar
//! builders decide what a run means in context.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    // === RUNS ===
    /// Maximal run of ASCII letters
    Letters(String),
    /// Maximal run of ASCII digits, kept as text so overflow surfaces during resolution
    Digits(String),

    // === SEPARATORS ===
    Colon,      // :
    Semicolon,  // ;
    Slash,      // /
    Underscore, // _
    Comma,      // ,

    // === BRACKETS ===
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]

    // === SIGNS ===
    Minus,      // -
    Plus,       // +
    Apostrophe, // '

    /// Single space; significant, since head groups may contain spaces
    Space,

    /// Character outside the shorthand alphabet, reported by the lexer
    Invalid(char),
    /// End of input marker
    Eof,
}

impl Token {
    /// Single-character tokens
    pub fn from_symbol(ch: char) -> Option<Self> {
        let token = match ch {
            ':' => Self::Colon,
            ';' => Self::Semicolon,
            '/' => Self::Slash,
            '_' => Self::Underscore,
            ',' => Self::Comma,
            '(' => Self::LParen,
            ')' => Self::RParen,
            '[' => Self::LBracket,
            ']' => Self::RBracket,
            '-' => Self::Minus,
            '+' => Self::Plus,
            '\'' => Self::Apostrophe,
            ' ' => Self::Space,
            _ => return None,
        };
        Some(token)
    }

    pub fn as_letters(&self) -> Option<&str> {
        match self {
            Self::Letters(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_digits(&self) -> Option<&str> {
        match self {
            Self::Digits(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_letters(&self, text: &str) -> bool {
        matches!(self, Self::Letters(word) if word == text)
    }

    /// Separators between chains of one lipid
    pub fn is_chain_separator(&self) -> bool {
        matches!(self, Self::Slash | Self::Underscore)
    }

    /// Points where the parser resumes after a syntax error
    pub fn is_sync_point(&self) -> bool {
        matches!(
            self,
            Self::Slash | Self::Underscore | Self::RParen | Self::Eof
        )
    }

    /// Invalid characters are reported once by the lexer and hidden from the parser
    pub fn is_significant(&self) -> bool {
        !matches!(self, Self::Invalid(_))
    }

    /// Get the token as it appears in the source
    pub fn as_source_string(&self) -> String {
        match self {
            Self::Letters(text) | Self::Digits(text) => text.clone(),
            Self::Invalid(ch) => ch.to_string(),
            Self::Eof => "<EOF>".to_string(),
            other => other.symbol().to_string(),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Slash => "/",
            Self::Underscore => "_",
            Self::Comma => ",",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Minus => "-",
            Self::Plus => "+",
            Self::Apostrophe => "'",
            Self::Space => " ",
            Self::Letters(_) | Self::Digits(_) | Self::Invalid(_) | Self::Eof => "",
        }
    }

    /// Get the classification of this token
    pub fn token_class(&self) -> TokenClass {
        match self {
            Self::Letters(_) => TokenClass::Word,
            Self::Digits(_) => TokenClass::Number,
            Self::Colon | Self::Semicolon | Self::Slash | Self::Underscore | Self::Comma => {
                TokenClass::Separator
            }
            Self::LParen | Self::RParen | Self::LBracket | Self::RBracket => TokenClass::Bracket,
            Self::Minus | Self::Plus | Self::Apostrophe => TokenClass::Sign,
            Self::Space => TokenClass::Whitespace,
            Self::Invalid(_) | Self::Eof => TokenClass::Special,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space => f.write_str("' '"),
            other => f.write_str(&other.as_source_string()),
        }
    }
}

/// Token classification used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Word,
    Number,
    Separator,
    Bracket,
    Sign,
    Whitespace,
    /// End of input and invalid characters
    Special,
}

impl TokenClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Number => "number",
            Self::Separator => "separator",
            Self::Bracket => "bracket",
            Self::Sign => "sign",
            Self::Whitespace => "whitespace",
            Self::Special => "special",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_round_trip() {
        for ch in ":;/_,()[]-+' ".chars() {
            let token = Token::from_symbol(ch).unwrap();
            assert_eq!(token.as_source_string(), ch.to_string());
        }
        assert_eq!(Token::from_symbol('*'), None);
    }

    #[test]
    fn test_classification() {
        assert_eq!(Token::Letters("PE".into()).token_class(), TokenClass::Word);
        assert_eq!(Token::Digits("18".into()).token_class(), TokenClass::Number);
        assert_eq!(Token::Slash.token_class(), TokenClass::Separator);
        assert_eq!(Token::Eof.token_class(), TokenClass::Special);
    }

    #[test]
    fn test_significance() {
        assert!(Token::Space.is_significant());
        assert!(Token::Eof.is_significant());
        assert!(!Token::Invalid('*').is_significant());
    }

    #[test]
    fn test_sync_points() {
        assert!(Token::Slash.is_sync_point());
        assert!(Token::RParen.is_sync_point());
        assert!(!Token::Colon.is_sync_point());
    }
}
