use super::result::PipelineResult;
use crate::domain::{LipidAdduct, LipidCategory, LipidLevel, LipidSpeciesInfo};
use crate::grammar::dialect::Dialect;
use crate::render::RenderError;
use serde::{Deserialize, Serialize};

/// Serializable view of a parsed name, used for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub input: String,
    pub dialect: Dialect,
    /// Rendered at the requested level
    pub name: String,
    pub normalized_name: String,
    pub level: Option<LipidLevel>,
    pub category: Option<LipidCategory>,
    pub lipid_class: Option<String>,
    pub info: Option<LipidSpeciesInfo>,
    pub lipid: LipidAdduct,
}

impl PipelineOutput {
    /// `level` falls back to the lipid's own level when absent
    pub fn from_result(result: &PipelineResult, level: Option<LipidLevel>) -> Result<Self, RenderError> {
        let lipid = result.lipid.lipid();
        let native = lipid.map(|l| l.level()).unwrap_or(LipidLevel::Species);
        let level = level.unwrap_or(native);

        Ok(Self {
            input: result.input.clone(),
            dialect: result.dialect,
            name: result.lipid.render(level, false)?,
            normalized_name: result.lipid.render(level, true)?,
            level: lipid.map(|l| l.level()),
            category: lipid.map(|l| l.lipid_category()),
            lipid_class: lipid.and_then(|l| l.lipid_class()).map(|c| c.to_string()),
            info: lipid.and_then(|l| l.info().copied()),
            lipid: result.lipid.clone(),
        })
    }
}
