// ============================================================================
// domain/error.rs - VALIDATION AND COMPOSITION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so a result can be reported and logged)
/// - Categorizable (validation vs. composition)
/// - Actionable (provides suggestions)
///
/// Messages never carry filesystem paths or compiler output. `Display`
/// may quote a rejected template or format name for operator logs;
/// `PlateError::public_message` drops it before anything reaches a caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid plate number: {reason}")]
    InvalidPlateNumber { reason: String },

    #[error("Invalid plate code for template '{template}': {reason}")]
    InvalidPlateCode { template: String, reason: String },

    #[error("Unknown template '{name}'")]
    UnknownTemplate { name: String },

    #[error("Unsupported output format '{format}'")]
    UnsupportedFormat { format: String },

    // ========================================================================
    // Composition Errors (template/config drift, server-side defects)
    // ========================================================================
    #[error("Template '{template}' script is missing placeholder {token}")]
    MissingPlaceholder { template: String, token: String },

    #[error("Composed script for '{template}' still contains token {token}")]
    UnresolvedPlaceholder { template: String, token: String },

    #[error("Value for placeholder {token} contains characters outside [A-Za-z0-9.]")]
    UnsafeValue { token: String },

    #[error("Layout value for placeholder {token} is not a finite number")]
    NonFiniteValue { token: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPlateNumber { .. } => vec![
                "Plate numbers contain digits only, e.g. 12345".into(),
                "Up to five digits are allowed".into(),
            ],
            Self::InvalidPlateCode { template, .. } => {
                let rule = template
                    .parse::<crate::domain::TemplateId>()
                    .map(|id| id.config().code_rule.describe())
                    .unwrap_or_else(|_| "see `plategen templates`".into());
                vec![
                    format!("Template '{template}' expects {rule}"),
                    "Codes are upper-cased automatically".into(),
                ]
            }
            Self::UnknownTemplate { .. } => vec![
                "Available templates:".into(),
                "  • dubai_new     - Dubai Plate - New".into(),
                "  • dubai_new_sm  - Dubai Plate - New Small".into(),
                "  • dubai_old     - Dubai Plate - Old".into(),
                "  • sharjah_old   - Sharjah Plate - Old".into(),
            ],
            Self::UnsupportedFormat { .. } => {
                vec!["Supported formats: stl, 3mf, off, amf".into()]
            }
            Self::MissingPlaceholder { template, .. }
            | Self::UnresolvedPlaceholder { template, .. } => vec![
                format!("The source script for '{template}' does not match its layout table"),
                "This is a server-side defect; please report it".into(),
            ],
            Self::UnsafeValue { .. } | Self::NonFiniteValue { .. } => {
                vec!["This is a server-side defect; please report it".into()]
            }
        }
    }

    /// Error category for display styling and transport mapping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPlateNumber { .. }
            | Self::InvalidPlateCode { .. }
            | Self::UnsupportedFormat { .. } => ErrorCategory::Validation,
            Self::UnknownTemplate { .. } => ErrorCategory::NotFound,
            Self::MissingPlaceholder { .. }
            | Self::UnresolvedPlaceholder { .. }
            | Self::UnsafeValue { .. }
            | Self::NonFiniteValue { .. } => ErrorCategory::Composition,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Composition,
}
