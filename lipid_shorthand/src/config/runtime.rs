// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to collect per-kind token counts
    pub collect_detailed_metrics: bool,

    /// Whether to trim surrounding whitespace before tokenizing
    pub trim_input: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env_flag("LIPID_LEXICAL_DETAILED_METRICS", false),
            trim_input: env_flag("LIPID_LEXICAL_TRIM_INPUT", true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserPreferences {
    /// Whether to keep parsing after the first syntax error to report all of them
    pub collect_all_errors: bool,

    /// Whether to log the parse tree at debug level
    pub log_parse_tree: bool,
}

impl Default for ParserPreferences {
    fn default() -> Self {
        Self {
            collect_all_errors: env_flag("LIPID_PARSER_COLLECT_ALL_ERRORS", true),
            log_parse_tree: env_flag("LIPID_PARSER_LOG_TREE", false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderPreferences {
    /// Whether to render the class abbreviation instead of the native head group
    pub normalized_head_group: bool,

    /// Whether to append the adduct to rendered names
    pub include_adduct: bool,
}

impl Default for RenderPreferences {
    fn default() -> Self {
        Self {
            normalized_head_group: env_flag("LIPID_RENDER_NORMALIZED", false),
            include_adduct: env_flag("LIPID_RENDER_INCLUDE_ADDUCT", true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchPreferences {
    /// Worker threads; 0 means one per available core
    pub worker_threads: usize,

    /// Whether to stop at the first failing name
    pub fail_fast: bool,

    /// Whether to print progress while processing
    pub progress_reporting: bool,
}

impl Default for BatchPreferences {
    fn default() -> Self {
        Self {
            worker_threads: env::var("LIPID_BATCH_THREADS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            fail_fast: env_flag("LIPID_BATCH_FAIL_FAST", false),
            progress_reporting: env_flag("LIPID_BATCH_PROGRESS", false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output (stderr)
    pub enable_console_logging: bool,

    /// Preferred minimum log level (never quieter than the build's floor)
    pub min_log_level: LogLevel,

    /// Whether to tag events with the lipid name being processed
    pub include_item_context: bool,

    /// Optional log file; events are appended
    pub log_file: Option<String>,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag("LIPID_LOGGING_USE_STRUCTURED", false),
            enable_console_logging: env_flag("LIPID_LOGGING_ENABLE_CONSOLE", false),
            min_log_level: env::var("LIPID_LOGGING_MIN_LEVEL")
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
            include_item_context: env_flag("LIPID_LOGGING_INCLUDE_ITEM_CONTEXT", true),
            log_file: env::var("LIPID_LOGGING_FILE").ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables and the CLI)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// All runtime preferences; a TOML file may override any subset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub parser: ParserPreferences,
    pub render: RenderPreferences,
    pub batch: BatchPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Missing sections and fields keep their environment-derived defaults
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config file {}: {}", path.display(), e))?;
        Self::from_toml_str(&text).map_err(|e| format!("Invalid config file {}: {}", path.display(), e))
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    pub const LEXICAL_DETAILED_METRICS: &str = "LIPID_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_TRIM_INPUT: &str = "LIPID_LEXICAL_TRIM_INPUT";

    pub const PARSER_COLLECT_ALL_ERRORS: &str = "LIPID_PARSER_COLLECT_ALL_ERRORS";
    pub const PARSER_LOG_TREE: &str = "LIPID_PARSER_LOG_TREE";

    pub const RENDER_NORMALIZED: &str = "LIPID_RENDER_NORMALIZED";
    pub const RENDER_INCLUDE_ADDUCT: &str = "LIPID_RENDER_INCLUDE_ADDUCT";

    pub const BATCH_THREADS: &str = "LIPID_BATCH_THREADS";
    pub const BATCH_FAIL_FAST: &str = "LIPID_BATCH_FAIL_FAST";
    pub const BATCH_PROGRESS: &str = "LIPID_BATCH_PROGRESS";

    pub const LOGGING_USE_STRUCTURED: &str = "LIPID_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "LIPID_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "LIPID_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_ITEM_CONTEXT: &str = "LIPID_LOGGING_INCLUDE_ITEM_CONTEXT";
    pub const LOGGING_FILE: &str = "LIPID_LOGGING_FILE";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("2"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_runtime_config_serializes() {
        let config = RuntimeConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"collect_all_errors\""));
        assert!(json.contains("\"min_log_level\""));
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = RuntimeConfig::from_toml_str(
            "[batch]\nworker_threads = 3\n\n[render]\nnormalized_head_group = true\n",
        )
        .unwrap();
        assert_eq!(config.batch.worker_threads, 3);
        assert!(config.render.normalized_head_group);
        assert!(RuntimeConfig::from_toml_str("[batch]\nworker_threads = \"many\"\n").is_err());
    }
}
