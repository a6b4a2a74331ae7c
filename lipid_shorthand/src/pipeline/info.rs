use crate::config::compile_time::{batch_processing, input};
use crate::domain::{LipidClass, LipidLevel};
use crate::grammar::dialect::Dialect;
use crate::lexical::{get_lexical_limits, LexicalLimits};

/// Information about pipeline capabilities
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub dialects: Vec<Dialect>,
    pub levels: Vec<LipidLevel>,
    pub known_classes: usize,
    pub max_name_length: usize,
    pub lexical_limits: LexicalLimits,
    pub max_names_per_batch: usize,
    pub max_worker_threads: usize,
    pub global_logging_enabled: bool,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        let dialects: Vec<&str> = self.dialects.iter().map(Dialect::as_str).collect();
        let levels: Vec<&str> = self.levels.iter().map(LipidLevel::as_str).collect();
        format!(
            "Lipid Shorthand Pipeline:\n\
             - Dialects: {}\n\
             - Levels: {}\n\
             - Known Classes: {}\n\
             - Max Name Length: {}\n\
             - Max Tokens Per Name: {}\n\
             - Max Names Per Batch: {}\n\
             - Max Worker Threads: {}\n\
             - Global Logging: {}",
            dialects.join(", "),
            levels.join(", "),
            self.known_classes,
            self.max_name_length,
            self.lexical_limits.max_token_count,
            self.max_names_per_batch,
            self.max_worker_threads,
            self.global_logging_enabled
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "{} dialects, {} lipid classes, {} levels of detail",
            self.dialects.len(),
            self.known_classes,
            self.levels.len()
        )
    }
}

/// Get pipeline capabilities information
pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        dialects: Dialect::ALL.to_vec(),
        levels: LipidLevel::ALL.to_vec(),
        known_classes: LipidClass::ALL.len(),
        max_name_length: input::MAX_NAME_LENGTH,
        lexical_limits: get_lexical_limits(),
        max_names_per_batch: batch_processing::MAX_NAMES_PER_BATCH,
        max_worker_threads: batch_processing::MAX_WORKER_THREADS,
        global_logging_enabled: crate::logging::is_initialized(),
    }
}
