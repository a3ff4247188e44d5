//! Template Service - template catalogue queries.
//!
//! Separated from GenerationService for single responsibility: listing
//! what can be generated never touches the compiler.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    application::ports::ScriptStore,
    domain::{TEMPLATE_REGISTRY, TemplateConfig, TemplateId},
    error::PlateResult,
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub id: String,
    pub label: String,
    pub code_rule: String,
    pub max_number_digits: usize,
    pub script: String,
    pub script_available: bool,
}

/// Service for template operations.
pub struct TemplateService {
    scripts: Box<dyn ScriptStore>,
}

impl TemplateService {
    pub fn new(scripts: Box<dyn ScriptStore>) -> Self {
        Self { scripts }
    }

    /// All templates in display order.
    pub fn list(&self) -> Vec<TemplateInfo> {
        TemplateId::ALL
            .iter()
            .map(|id| self.describe(id.config()))
            .collect()
    }

    /// Raw source of a template's script.
    pub fn source(&self, id: TemplateId) -> PlateResult<Arc<str>> {
        self.scripts.load(id.config().source_script)
    }

    /// Templates whose script cannot be found.
    pub fn missing(&self) -> Vec<&'static TemplateConfig> {
        TEMPLATE_REGISTRY
            .iter()
            .copied()
            .filter(|c| !self.scripts.contains(c.source_script))
            .collect()
    }

    fn describe(&self, config: &TemplateConfig) -> TemplateInfo {
        TemplateInfo {
            id: config.id.to_string(),
            label: config.label.to_string(),
            code_rule: config.code_rule.describe(),
            max_number_digits: config.max_number_digits,
            script: config.source_script.to_string(),
            script_available: self.scripts.contains(config.source_script),
        }
    }
}
