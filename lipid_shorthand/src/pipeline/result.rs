use crate::domain::LipidAdduct;
use crate::grammar::dialect::Dialect;
use std::time::Duration;

/// One successfully parsed name with processing details
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub input: String,
    pub dialect: Dialect,
    pub lipid: LipidAdduct,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(input: &str, dialect: Dialect, lipid: LipidAdduct, processing_duration: Duration) -> Self {
        Self {
            input: input.to_string(),
            dialect,
            lipid,
            processing_duration,
        }
    }

    pub fn log_success(&self) {
        crate::log_success!(
            crate::logging::codes::success::NAME_PARSED,
            "Lipid name parsed",
            "name" => self.input.as_str(),
            "dialect" => self.dialect.as_str(),
            "level" => self.lipid.lipid().map(|l| l.level().as_str()).unwrap_or("NONE"),
            "duration_us" => self.processing_duration.as_micros()
        );
    }
}
