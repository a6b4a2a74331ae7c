//! Configuration module for logging - using compile-time constants
//!
//! Compile-time limits come from the generated `compile_time::logging` module;
//! user preferences come from `config::runtime::LoggingPreferences`.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    validate_preferences(&preferences)?;

    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized")?;

    Ok(())
}

/// Get runtime preferences (with fallback to defaults)
fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

fn validate_preferences(preferences: &LoggingPreferences) -> Result<(), String> {
    if let Some(path) = &preferences.log_file {
        if path.trim().is_empty() {
            return Err("Log file path must not be empty".to_string());
        }
    }

    Ok(())
}

/// Get minimum log level (user preference, never quieter than the compile-time floor)
pub fn get_min_log_level() -> EventsLogLevel {
    let user_level = get_runtime_preferences().min_log_level.to_events_log_level();
    user_level.max(get_floor_log_level())
}

/// Least verbose level a build may be configured with
pub fn get_floor_log_level() -> EventsLogLevel {
    match SECURITY_MIN_LOG_LEVEL {
        0 => EventsLogLevel::Error,
        1 => EventsLogLevel::Warning,
        _ => EventsLogLevel::Info,
    }
}

pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

pub fn include_item_context() -> bool {
    get_runtime_preferences().include_item_context
}

pub fn log_file() -> Option<String> {
    get_runtime_preferences().log_file
}

/// Get error buffer size for in-memory loggers
pub fn get_error_buffer_size() -> usize {
    MAX_ERROR_COLLECTION
}

pub fn get_max_log_events_per_item() -> usize {
    MAX_LOG_EVENTS_PER_ITEM
}

pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

// ============================================================================
// CONFIGURATION VALIDATION
// ============================================================================

/// Validate the effective logging configuration
pub fn validate_config() -> Result<(), String> {
    if MAX_ERROR_COLLECTION == 0 {
        return Err("max_error_collection must be positive".to_string());
    }
    if MAX_LOG_MESSAGE_LENGTH < 16 {
        return Err("max_log_message_length too small".to_string());
    }
    validate_preferences(&get_runtime_preferences())
}

/// Human readable configuration summary
pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();
    format!(
        "logging: level={} structured={} console={} buffer={} ({})",
        get_min_log_level().as_str(),
        preferences.use_structured_logging,
        preferences.enable_console_logging,
        MAX_ERROR_COLLECTION,
        crate::config::build_info::source_info()
    )
}
