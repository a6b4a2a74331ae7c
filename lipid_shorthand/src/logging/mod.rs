//! Global logging module for the lipid shorthand parser
//!
//! Provides thread-safe global logging with per-name context for batch runs
//! and a small macro interface.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// Name currently being processed on this thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemContext {
    pub item: String,
    pub index: usize,
    pub dialect: String,
}

thread_local! {
    static ITEM_CONTEXT: RefCell<Option<ItemContext>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service()?);

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    for code in [
        codes::system::INTERNAL_ERROR,
        codes::lexical::INVALID_CHARACTER,
        codes::syntax::UNEXPECTED_TOKEN,
        codes::resolution::CONSTRAINT_VIOLATION,
    ] {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// ITEM CONTEXT MANAGEMENT
// ============================================================================

pub fn set_item_context(item: &str, index: usize, dialect: &str) {
    ITEM_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(ItemContext {
            item: item.to_string(),
            index,
            dialect: dialect.to_string(),
        });
    });
}

pub fn clear_item_context() {
    ITEM_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with the given name as logging context
pub fn with_item_context<F, R>(item: &str, index: usize, dialect: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = get_current_item_context();
    set_item_context(item, index, dialect);
    let result = f();
    ITEM_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = previous;
    });
    result
}

/// Get current item context (used by macros)
pub fn get_current_item_context() -> Option<ItemContext> {
    ITEM_CONTEXT.with(|ctx| ctx.borrow().clone())
}

fn attach_item_context(mut event: LogEvent) -> LogEvent {
    if !config::include_item_context() {
        return event;
    }
    if let Some(item_ctx) = get_current_item_context() {
        event = event
            .with_context("item", &item_ctx.item)
            .with_context("item_index", &item_ctx.index.to_string())
            .with_context("dialect", &item_ctx.dialect);
    }
    event
}

fn dispatch(mut event: LogEvent, context: Vec<(&str, &str)>) {
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    let event = attach_item_context(event);

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    let mut event = LogEvent::error(code, message);
    if let Some(s) = span {
        event = event.with_span(s);
    }
    dispatch(event, context);
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::success(code, message), context);
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::info(message), context);
}

/// Log warning with context (used by log_warning! macro)
pub fn log_warning_with_context(code: Option<Code>, message: &str, context: Vec<(&str, &str)>) {
    let event = match code {
        Some(code) => LogEvent::warning_with_code(code, message),
        None => LogEvent::warning(message),
    };
    dispatch(event, context);
}

/// Log debug with context (used by log_debug! macro)
pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::debug(message), context);
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Safe error logging (won't panic if uninitialized)
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(attach_item_context(LogEvent::error(code, message)));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

/// Get system diagnostics
pub fn get_system_diagnostics() -> String {
    let mut diagnostics = String::new();

    diagnostics.push_str("=== Logging System Diagnostics ===\n");
    diagnostics.push_str(&format!("Initialized: {}\n", is_initialized()));
    diagnostics.push_str(&config::get_config_summary());

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_context_management() {
        assert!(get_current_item_context().is_none());

        set_item_context("PE(18:0/16:1)", 3, "LipidMaps");
        let context = get_current_item_context().unwrap();
        assert_eq!(context.item, "PE(18:0/16:1)");
        assert_eq!(context.index, 3);

        clear_item_context();
        assert!(get_current_item_context().is_none());
    }

    #[test]
    fn test_with_item_context_restores_previous() {
        set_item_context("outer", 0, "Goslin");
        let result = with_item_context("inner", 1, "HMDB", || {
            assert_eq!(get_current_item_context().unwrap().item, "inner");
            42
        });

        assert_eq!(result, 42);
        assert_eq!(get_current_item_context().unwrap().item, "outer");
        clear_item_context();
    }

    #[test]
    fn test_safe_logging() {
        safe_log_error(codes::system::INTERNAL_ERROR, "Test error");
    }

    #[test]
    fn test_diagnostics() {
        let diagnostics = get_system_diagnostics();
        assert!(diagnostics.contains("Logging System Diagnostics"));
        assert!(diagnostics.contains("Initialized:"));
    }
}
