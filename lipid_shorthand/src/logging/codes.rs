//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.
//! Code ranges follow the processing stages: input (E00x), lexical (E02x), syntax (E04x),
//! resolution (E06x), rendering (E09x), dialect selection (E10x) and batch runs (E11x).

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Input error codes (names and name files)
pub mod input {
    use super::Code;

    pub const EMPTY_NAME: Code = Code::new("E005");
    pub const NAME_TOO_LONG: Code = Code::new("E006");
    pub const NAMES_FILE_NOT_FOUND: Code = Code::new("E007");
    pub const NAMES_FILE_TOO_LARGE: Code = Code::new("E008");
    pub const IO_ERROR: Code = Code::new("E009");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_CHARACTER: Code = Code::new("E020");
    pub const WORD_TOO_LONG: Code = Code::new("E021");
    pub const NUMBER_TOO_LONG: Code = Code::new("E022");
    pub const TOKEN_LIMIT_EXCEEDED: Code = Code::new("E023");
}

/// Syntax error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_TOKEN: Code = Code::new("E040");
    pub const UNEXPECTED_END_OF_INPUT: Code = Code::new("E041");
    pub const GRAMMAR_VIOLATION: Code = Code::new("E042");
    pub const TOO_MANY_ERRORS: Code = Code::new("E043");
    pub const TOO_MANY_CHAINS: Code = Code::new("E044");
    pub const INTERNAL_PARSER_ERROR: Code = Code::new("E045");
}

/// Resolution error codes (fatty acids, classes, species levels)
pub mod resolution {
    use super::Code;

    pub const UNSUPPORTED_FEATURE: Code = Code::new("E060");
    pub const CONSTRAINT_VIOLATION: Code = Code::new("E061");
    pub const NUMBER_FORMAT: Code = Code::new("E062");
    pub const MALFORMED_TREE: Code = Code::new("E063");
    pub const UNKNOWN_HEAD_GROUP: Code = Code::new("W064");
}

/// Rendering error codes
pub mod render {
    use super::Code;

    pub const INSUFFICIENT_DETAIL: Code = Code::new("E090");
}

/// Dialect selection error codes
pub mod dialect {
    use super::Code;

    pub const UNSUPPORTED_DIALECT: Code = Code::new("E100");
}

/// Batch processing error codes
pub mod batch {
    use super::Code;

    pub const BATCH_LIMIT_EXCEEDED: Code = Code::new("E110");
    pub const WORKER_FAILURE: Code = Code::new("E111");
    pub const NAME_FAILED: Code = Code::new("E112");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const PARSE_TREE_COMPLETE: Code = Code::new("I040");
    pub const RESOLUTION_COMPLETE: Code = Code::new("I060");
    pub const NAME_PARSED: Code = Code::new("I061");
    pub const RENDER_COMPLETE: Code = Code::new("I090");
    pub const BATCH_COMPLETE: Code = Code::new("I110");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn register(registry: &mut HashMap<&'static str, ErrorMetadata>, metadata: ErrorMetadata) {
    registry.insert(metadata.code, metadata);
}

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the offending lipid name",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check logging configuration and environment variables",
            ),
        );

        // Input errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E005",
                "Input",
                Severity::Medium,
                true,
                false,
                "Lipid name is empty",
                "Provide a non-empty shorthand name",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E006",
                "Input",
                Severity::High,
                true,
                false,
                "Lipid name exceeds the configured maximum length",
                "Shorten the name or raise input.max_name_length",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E007",
                "Input",
                Severity::High,
                false,
                true,
                "Names file not found",
                "Check the path passed with --file",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E008",
                "Input",
                Severity::High,
                false,
                true,
                "Names file exceeds the configured maximum size",
                "Split the file or raise input.max_names_file_size",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E009",
                "Input",
                Severity::High,
                false,
                true,
                "I/O error while reading names",
                "Check file permissions and encoding",
            ),
        );

        // Lexical errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E020",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "Character is not part of any lipid shorthand dialect",
                "Remove or replace the offending character",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "Word token exceeds the configured maximum length",
                "Check the head group spelling",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E022",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "Number token exceeds the configured maximum length",
                "Check carbon and double bond counts",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E023",
                "Lexical",
                Severity::High,
                false,
                true,
                "Token count exceeds the configured maximum",
                "Check that the input is a single lipid name",
            ),
        );

        // Syntax errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E040",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Unexpected token for the selected dialect",
                "Check the name against the dialect grammar",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E041",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Name ended before the grammar rule was complete",
                "Check for missing closing parentheses or chain fields",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E042",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Grammar rule violated",
                "Check separators and chain layout",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E043",
                "Syntax",
                Severity::High,
                false,
                true,
                "Too many syntax errors, giving up on this name",
                "Check that the correct dialect was selected",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E044",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Too many fatty acyl chains",
                "No lipid class carries more than four chains",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E045",
                "Syntax",
                Severity::Critical,
                false,
                true,
                "Internal parser error",
                "File a bug report with the offending lipid name",
            ),
        );

        // Resolution errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E060",
                "Resolution",
                Severity::Low,
                true,
                false,
                "Notation is recognized but not supported",
                "Rewrite the name without the unsupported feature",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E061",
                "Resolution",
                Severity::Medium,
                true,
                false,
                "Domain constraint violated",
                "Check carbon, hydroxyl and double bond counts",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E062",
                "Resolution",
                Severity::Medium,
                true,
                false,
                "Number does not fit an integer",
                "Check numeric fields",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E063",
                "Resolution",
                Severity::High,
                true,
                false,
                "Parse tree cannot be interpreted",
                "Check chain separators against the lipid class",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "W064",
                "Resolution",
                Severity::Low,
                true,
                false,
                "Head group does not match any known lipid class",
                "No action required",
            ),
        );

        // Rendering errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E090",
                "Render",
                Severity::Low,
                true,
                false,
                "Requested level is finer than the parsed lipid",
                "Render at the native level or a coarser one",
            ),
        );

        // Dialect errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E100",
                "Dialect",
                Severity::High,
                false,
                true,
                "Unsupported dialect",
                "Use one of goslin, goslin-fragments, lipidmaps, swisslipids, hmdb",
            ),
        );

        // Batch errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E110",
                "Batch",
                Severity::High,
                false,
                true,
                "Batch exceeds the configured name limit",
                "Split the batch or raise batch_processing.max_names_per_batch",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E111",
                "Batch",
                Severity::Critical,
                false,
                true,
                "Worker thread failed",
                "Re-run with --threads 1 to isolate the failing name",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E112",
                "Batch",
                Severity::Medium,
                true,
                false,
                "Name failed to parse during a batch run",
                "Inspect the per-name error",
            ),
        );

        // Success codes
        for (code, category, description) in [
            ("I001", "System", "Operation completed successfully"),
            ("I004", "System", "Logging initialized"),
            ("I020", "Lexical", "Tokenization complete"),
            ("I040", "Syntax", "Parse tree complete"),
            ("I060", "Resolution", "Resolution complete"),
            ("I061", "Resolution", "Lipid name parsed"),
            ("I090", "Render", "Rendering complete"),
            ("I110", "Batch", "Batch complete"),
        ] {
            register(
                &mut registry,
                ErrorMetadata::new(
                    code,
                    category,
                    Severity::Low,
                    true,
                    false,
                    description,
                    "No action required",
                ),
            );
        }

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_constant_is_registered() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            input::EMPTY_NAME,
            input::NAME_TOO_LONG,
            input::NAMES_FILE_NOT_FOUND,
            input::NAMES_FILE_TOO_LARGE,
            input::IO_ERROR,
            lexical::INVALID_CHARACTER,
            lexical::WORD_TOO_LONG,
            lexical::NUMBER_TOO_LONG,
            lexical::TOKEN_LIMIT_EXCEEDED,
            syntax::UNEXPECTED_TOKEN,
            syntax::UNEXPECTED_END_OF_INPUT,
            syntax::GRAMMAR_VIOLATION,
            syntax::TOO_MANY_ERRORS,
            syntax::TOO_MANY_CHAINS,
            syntax::INTERNAL_PARSER_ERROR,
            resolution::UNSUPPORTED_FEATURE,
            resolution::CONSTRAINT_VIOLATION,
            resolution::NUMBER_FORMAT,
            resolution::MALFORMED_TREE,
            resolution::UNKNOWN_HEAD_GROUP,
            render::INSUFFICIENT_DETAIL,
            dialect::UNSUPPORTED_DIALECT,
            batch::BATCH_LIMIT_EXCEEDED,
            batch::WORKER_FAILURE,
            batch::NAME_FAILED,
            success::NAME_PARSED,
            success::BATCH_COMPLETE,
        ];

        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "{} is not registered",
                code
            );
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(get_category("E060"), "Resolution");
        assert!(is_recoverable("E060"));
        assert!(requires_halt("E100"));
        assert_eq!(get_severity("ERR001"), Severity::Critical);
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_category("E999"), "Unknown");
    }
}
