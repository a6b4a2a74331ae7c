use crate::logging::codes::{self, Code};
use crate::render::RenderError;
use crate::resolution::ResolutionError;
use crate::syntax::ParsingFailure;

/// Pipeline processing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("Lipid name is empty")]
    EmptyName,

    #[error("Lipid name is {length} characters long, limit is {limit}")]
    NameTooLong { length: usize, limit: usize },

    #[error("Unsupported dialect '{name}'")]
    UnsupportedDialect { name: String },

    #[error("Syntax analysis failed: {0}")]
    Parsing(#[from] ParsingFailure),

    #[error("Resolution failed: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),
}

impl PipelineError {
    pub fn error_code(&self) -> Code {
        match self {
            PipelineError::EmptyName => codes::input::EMPTY_NAME,
            PipelineError::NameTooLong { .. } => codes::input::NAME_TOO_LONG,
            PipelineError::UnsupportedDialect { .. } => codes::dialect::UNSUPPORTED_DIALECT,
            PipelineError::Parsing(failure) => failure.error_code(),
            PipelineError::Resolution(error) => error.error_code(),
            PipelineError::Render(error) => error.error_code(),
        }
    }

    /// The name does not match the dialect's grammar
    pub fn is_grammar_reject(&self) -> bool {
        matches!(
            self,
            PipelineError::Parsing(_) | PipelineError::EmptyName | PipelineError::NameTooLong { .. }
        )
    }

    /// Full report including the caret excerpt for syntax errors
    pub fn format_report(&self) -> String {
        match self {
            PipelineError::Parsing(failure) => failure.format_report(),
            other => format!("error[{}]: {}\n", other.error_code(), other),
        }
    }
}
