use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{TemplateConfig, TemplateId, error::DomainError, validation::PlateValidator};

/// A plate request as it arrives from a transport, before validation.
///
/// The template is kept as a string so an unknown identifier is a
/// validation outcome rather than a deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlateRequest {
    #[serde(alias = "plateNum")]
    pub plate_number: String,
    pub plate_code: String,
    pub template: String,
}

impl RawPlateRequest {
    pub fn new(
        template: impl Into<String>,
        plate_code: impl Into<String>,
        plate_number: impl Into<String>,
    ) -> Self {
        Self {
            plate_number: plate_number.into(),
            plate_code: plate_code.into(),
            template: template.into(),
        }
    }
}

/// An upper-cased plate code that satisfied its template's [`CodeRule`].
///
/// [`CodeRule`]: crate::domain::CodeRule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlateCode(String);

impl PlateCode {
    pub(crate) fn new_unchecked(code: String) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of glyphs, which drives the layout branch.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PlateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A non-empty run of ASCII digits. Leading zeros are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlateNumber(String);

impl PlateNumber {
    pub(crate) fn new_unchecked(number: String) -> Self {
        Self(number)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlateNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated plate request. Immutable; only built by [`PlateValidator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateRequest {
    template: TemplateId,
    code: PlateCode,
    number: PlateNumber,
}

impl PlateRequest {
    pub(crate) fn from_parts(template: TemplateId, code: PlateCode, number: PlateNumber) -> Self {
        Self {
            template,
            code,
            number,
        }
    }

    /// Validate raw fields into a request.
    pub fn parse(
        template: &str,
        plate_code: &str,
        plate_number: &str,
    ) -> Result<Self, DomainError> {
        PlateValidator::validate(&RawPlateRequest::new(template, plate_code, plate_number))
    }

    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn config(&self) -> &'static TemplateConfig {
        self.template.config()
    }

    pub fn code(&self) -> &PlateCode {
        &self.code
    }

    pub fn number(&self) -> &PlateNumber {
        &self.number
    }
}

impl fmt::Display for PlateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.template, self.code, self.number)
    }
}
