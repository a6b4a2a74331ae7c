//! Batch processing of lipid name lists
//!
//! Names come from the command line or from a names file (one per line,
//! `#` starts a comment line). Runs sequentially or on a fixed number of
//! worker threads; results are reported in input order either way.

use crate::config::compile_time::batch_processing::{MAX_NAMES_PER_BATCH, MAX_WORKER_THREADS};
use crate::config::compile_time::input::MAX_NAMES_FILE_SIZE;
use crate::config::runtime::BatchPreferences;
use crate::grammar::dialect::Dialect;
use crate::logging::{self, codes, Code};
use crate::pipeline::{self, PipelineError, PipelineResult};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

/// Batch processing configuration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub dialect: Dialect,
    pub max_threads: usize,
    pub max_names: Option<usize>,
    pub progress_reporting: bool,
    pub fail_fast: bool,
}

impl BatchConfig {
    pub fn from_preferences(dialect: Dialect, preferences: &BatchPreferences) -> Self {
        let max_threads = match preferences.worker_threads {
            0 => default_thread_count(),
            n => n.min(MAX_WORKER_THREADS),
        };
        Self {
            dialect,
            max_threads,
            max_names: None,
            progress_reporting: preferences.progress_reporting,
            fail_fast: preferences.fail_fast,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::from_preferences(Dialect::Goslin, &BatchPreferences::default())
    }
}

fn default_thread_count() -> usize {
    thread::available_parallelism()
        .map(|n| n.get().min(MAX_WORKER_THREADS))
        .unwrap_or(4)
}

/// One name that did not parse
#[derive(Debug, Clone)]
pub struct BatchFailure {
    pub index: usize,
    pub name: String,
    pub error: PipelineError,
}

/// Batch processing results
#[derive(Debug, Default)]
pub struct BatchResults {
    pub successes: Vec<(usize, PipelineResult)>,
    pub failures: Vec<BatchFailure>,
    pub processing_duration: Duration,
    pub names_processed: usize,
    pub names_submitted: usize,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn success_rate(&self) -> f64 {
        if self.names_processed == 0 {
            0.0
        } else {
            self.successes.len() as f64 / self.names_processed as f64
        }
    }

    pub fn add_success(&mut self, index: usize, result: PipelineResult) {
        self.successes.push((index, result));
        self.names_processed += 1;
    }

    pub fn add_failure(&mut self, index: usize, name: &str, error: PipelineError) {
        self.failures.push(BatchFailure {
            index,
            name: name.to_string(),
            error,
        });
        self.names_processed += 1;
    }

    pub fn merge(&mut self, other: BatchResults) {
        self.successes.extend(other.successes);
        self.failures.extend(other.failures);
        self.names_processed += other.names_processed;
    }

    /// Restore input order after a parallel run
    fn sort_by_index(&mut self) {
        self.successes.sort_by_key(|(index, _)| *index);
        self.failures.sort_by_key(|failure| failure.index);
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch processing completed: {} of {} names processed, {} parsed ({:.1}%), {} failed, {:.2}s total",
            self.names_processed,
            self.names_submitted,
            self.success_count(),
            self.success_rate() * 100.0,
            self.failure_count(),
            self.processing_duration.as_secs_f64()
        )
    }
}

/// Batch processing errors
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Names file not found: {path}")]
    NamesFileNotFound { path: String },

    #[error("Names file {path} is {size} bytes (max: {max})")]
    NamesFileTooLarge { path: String, size: u64, max: u64 },

    #[error("No lipid names found in {source_name}")]
    NoNamesFound { source_name: String },

    #[error("Too many names: {count} (max: {max})")]
    TooManyNames { count: usize, max: usize },

    #[error("IO error reading {path}: {error}")]
    IoError { path: String, error: String },

    #[error("Worker thread error: {message}")]
    ThreadError { message: String },
}

impl BatchError {
    pub fn error_code(&self) -> Code {
        match self {
            BatchError::NamesFileNotFound { .. } => codes::input::NAMES_FILE_NOT_FOUND,
            BatchError::NamesFileTooLarge { .. } => codes::input::NAMES_FILE_TOO_LARGE,
            BatchError::IoError { .. } => codes::input::IO_ERROR,
            BatchError::NoNamesFound { .. } | BatchError::TooManyNames { .. } => {
                codes::batch::BATCH_LIMIT_EXCEEDED
            }
            BatchError::ThreadError { .. } => codes::batch::WORKER_FAILURE,
        }
    }
}

// ============================================================================
// NAME SOURCES
// ============================================================================

/// Read one name per line; blank lines and `#` comments are skipped
pub fn read_names_file(path: &Path) -> Result<Vec<String>, BatchError> {
    crate::log_info!("Reading names file", "file" => path.display());

    if !path.is_file() {
        let error = BatchError::NamesFileNotFound {
            path: path.display().to_string(),
        };
        crate::log_error!(error.error_code(), "Names file not found", "file" => path.display());
        return Err(error);
    }

    let size = fs::metadata(path)
        .map_err(|e| BatchError::IoError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?
        .len();
    if size > MAX_NAMES_FILE_SIZE {
        let error = BatchError::NamesFileTooLarge {
            path: path.display().to_string(),
            size,
            max: MAX_NAMES_FILE_SIZE,
        };
        crate::log_error!(error.error_code(), "Names file exceeds size limit",
            "file" => path.display(),
            "size" => size
        );
        return Err(error);
    }

    let content = fs::read_to_string(path).map_err(|e| BatchError::IoError {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;

    let names = parse_names(&content);
    if names.is_empty() {
        return Err(BatchError::NoNamesFound {
            source_name: path.display().to_string(),
        });
    }

    crate::log_debug!("Names file read", "file" => path.display(), "names" => names.len());
    Ok(names)
}

fn parse_names(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn check_batch_size(names: &[String], config: &BatchConfig) -> Result<(), BatchError> {
    let max = config.max_names.unwrap_or(MAX_NAMES_PER_BATCH).min(MAX_NAMES_PER_BATCH);
    if names.len() > max {
        crate::log_error!(codes::batch::BATCH_LIMIT_EXCEEDED, "Batch exceeds name limit",
            "names" => names.len(),
            "limit" => max
        );
        return Err(BatchError::TooManyNames {
            count: names.len(),
            max,
        });
    }
    if names.is_empty() {
        return Err(BatchError::NoNamesFound {
            source_name: "input".to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

/// Parse one name inside its logging context; `true` if it parsed
fn process_one(index: usize, name: &str, dialect: Dialect, results: &mut BatchResults) -> bool {
    logging::with_item_context(name, index, dialect.as_str(), || {
        match pipeline::process_name(dialect, name) {
            Ok(result) => {
                results.add_success(index, result);
                true
            }
            Err(error) => {
                crate::log_error!(codes::batch::NAME_FAILED, "Lipid name failed",
                    "name" => name,
                    "index" => index,
                    "code" => error.error_code()
                );
                results.add_failure(index, name, error);
                false
            }
        }
    })
}

/// Process names one after another
pub fn process_names_sequential(names: &[String], config: &BatchConfig) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();
    check_batch_size(names, config)?;

    crate::log_info!("Starting sequential batch processing",
        "names" => names.len(),
        "dialect" => config.dialect.as_str()
    );

    let mut results = BatchResults::new();
    results.names_submitted = names.len();

    for (index, name) in names.iter().enumerate() {
        if config.progress_reporting {
            eprintln!("Processing name {} of {}: {}", index + 1, names.len(), name);
        }

        let parsed = process_one(index, name, config.dialect, &mut results);
        if !parsed && config.fail_fast {
            crate::log_warning!("Fail-fast mode enabled, stopping batch processing");
            break;
        }
    }

    results.processing_duration = start_time.elapsed();
    log_batch_complete(&results, 1);
    Ok(results)
}

/// Process names on worker threads, each taking a contiguous slice
pub fn process_names_parallel(names: &[String], config: &BatchConfig) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();
    check_batch_size(names, config)?;

    let threads = config.max_threads.clamp(1, MAX_WORKER_THREADS);
    crate::log_info!("Starting parallel batch processing",
        "names" => names.len(),
        "dialect" => config.dialect.as_str(),
        "max_threads" => threads
    );

    let names_per_thread = names.len().div_ceil(threads);
    let stop = Arc::new(AtomicBool::new(false));
    let mut handles = Vec::with_capacity(threads);

    for (thread_id, slice) in names.chunks(names_per_thread).enumerate() {
        let offset = thread_id * names_per_thread;
        let thread_names = slice.to_vec();
        let stop = Arc::clone(&stop);
        let dialect = config.dialect;
        let fail_fast = config.fail_fast;

        handles.push(thread::spawn(move || {
            let mut local = BatchResults::new();
            for (local_index, name) in thread_names.iter().enumerate() {
                if stop.load(Ordering::Relaxed) {
                    break;
                }
                let parsed = process_one(offset + local_index, name, dialect, &mut local);
                if !parsed && fail_fast {
                    stop.store(true, Ordering::Relaxed);
                }
            }
            local
        }));
    }

    let mut results = BatchResults::new();
    results.names_submitted = names.len();
    for handle in handles {
        let local = handle.join().map_err(|_| {
            crate::log_error!(codes::batch::WORKER_FAILURE, "Worker thread panicked");
            BatchError::ThreadError {
                message: "worker thread panicked during processing".to_string(),
            }
        })?;
        results.merge(local);
    }
    results.sort_by_index();

    if stop.load(Ordering::Relaxed) {
        crate::log_warning!("Fail-fast mode enabled, batch processing stopped early");
    }

    results.processing_duration = start_time.elapsed();
    log_batch_complete(&results, threads);
    Ok(results)
}

fn log_batch_complete(results: &BatchResults, threads: usize) {
    crate::log_success!(
        codes::success::BATCH_COMPLETE,
        "Batch processing completed",
        "names_processed" => results.names_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count(),
        "threads_used" => threads,
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Sequential for one thread or a single name, parallel otherwise
pub fn process_names(names: &[String], config: &BatchConfig) -> Result<BatchResults, BatchError> {
    if config.max_threads <= 1 || names.len() <= 1 {
        process_names_sequential(names, config)
    } else {
        process_names_parallel(names, config)
    }
}

pub fn process_names_file(path: &Path, config: &BatchConfig) -> Result<BatchResults, BatchError> {
    let names = read_names_file(path)?;
    process_names(&names, config)
}
