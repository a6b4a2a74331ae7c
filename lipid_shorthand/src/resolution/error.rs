//! Resolution errors
//!
//! A tree that parsed cleanly can still fail here: the notation may be one
//! the model cannot represent, a number may not fit, or the counts may break
//! a domain invariant.

use crate::domain::ConstraintViolation;
use crate::logging::{codes, Code};
use crate::utils::Span;
use thiserror::Error;

pub type ResolutionResult<T> = Result<T, ResolutionError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Valid notation the model has no representation for
    #[error("Unsupported feature: {feature} at {span}")]
    UnsupportedFeature { feature: String, span: Span },

    #[error(transparent)]
    ConstraintViolation(#[from] ConstraintViolation),

    #[error("Number '{text}' does not fit into an integer at {span}")]
    NumberFormat { text: String, span: Span },

    #[error("Malformed parse tree: {message} at {span}")]
    MalformedTree { message: String, span: Span },
}

impl ResolutionError {
    pub fn unsupported_feature(feature: &str, span: Span) -> Self {
        Self::UnsupportedFeature {
            feature: feature.to_string(),
            span,
        }
    }

    pub fn number_format(text: &str, span: Span) -> Self {
        Self::NumberFormat {
            text: text.to_string(),
            span,
        }
    }

    pub fn malformed_tree(message: &str, span: Span) -> Self {
        Self::MalformedTree {
            message: message.to_string(),
            span,
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::UnsupportedFeature { .. } => codes::resolution::UNSUPPORTED_FEATURE,
            Self::ConstraintViolation(_) => codes::resolution::CONSTRAINT_VIOLATION,
            Self::NumberFormat { .. } => codes::resolution::NUMBER_FORMAT,
            Self::MalformedTree { .. } => codes::resolution::MALFORMED_TREE,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnsupportedFeature { span, .. }
            | Self::NumberFormat { span, .. }
            | Self::MalformedTree { span, .. } => Some(*span),
            Self::ConstraintViolation(_) => None,
        }
    }

    /// Fidelity gaps rather than invalid input
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedFeature { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    #[test]
    fn test_error_codes() {
        let span = Span::empty_at(Position::start());
        assert_eq!(
            ResolutionError::unsupported_feature("heavy label", span).error_code(),
            codes::resolution::UNSUPPORTED_FEATURE
        );
        assert_eq!(
            ResolutionError::number_format("99999999999", span).error_code(),
            codes::resolution::NUMBER_FORMAT
        );
        let violation: ResolutionError = ConstraintViolation::new("carbon < 2").into();
        assert_eq!(violation.error_code(), codes::resolution::CONSTRAINT_VIOLATION);
        assert!(violation.span().is_none());
        assert!(ResolutionError::unsupported_feature("i-", span).is_unsupported());
    }
}
