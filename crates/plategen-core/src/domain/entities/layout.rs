use crate::domain::{TemplateConfig, value_objects::Point};

/// Concrete geometry for one request.
///
/// A pure function of the template configuration and the code length;
/// computed once per request and never shared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLayout {
    pub code_size: f64,
    pub number_size: f64,
    pub code_position: Point,
    pub number_position: Point,
    pub baseline: f64,
}

impl ResolvedLayout {
    /// Resolve `config` for a code of `code_len` characters.
    ///
    /// Every length-dependent field goes through [`BranchRule::pick`], so
    /// size and position always switch at the same threshold.
    ///
    /// [`BranchRule::pick`]: crate::domain::BranchRule::pick
    pub fn resolve(config: &TemplateConfig, code_len: usize) -> Self {
        Self {
            code_size: config.code_size.pick(code_len),
            number_size: config.number_size,
            code_position: config.code_position.pick(code_len),
            number_position: config.number_position,
            baseline: config.baseline,
        }
    }
}
