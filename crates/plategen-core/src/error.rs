//! Unified error handling for Plategen Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context, user-actionable suggestions, and a leak-free
//! message for callers on the other side of a transport.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{ArtifactStatus, DomainError};

/// Root error type for Plategen Core operations.
///
/// This enum wraps all possible errors that can occur when using
/// plategen-core, providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum PlateError {
    /// Errors from the domain layer (validation and composition).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (rendering, scripts, filesystem).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl PlateError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in Plategen".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Composition => ErrorCategory::Composition,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The transport-facing error kind.
    pub fn kind(&self) -> ErrorKind {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound => ErrorKind::ValidationError,
            ErrorCategory::Composition => ErrorKind::CompositionError,
            ErrorCategory::Render => ErrorKind::RenderError,
            ErrorCategory::Io => ErrorKind::IoError,
            ErrorCategory::Configuration => ErrorKind::ConfigurationError,
            ErrorCategory::Internal => ErrorKind::InternalError,
        }
    }

    /// Message safe to hand to an untrusted caller.
    ///
    /// Validation errors are specific so the caller can fix the input,
    /// but never repeat the caller's own text back. Everything else is
    /// generic: compiler output, exit codes and paths stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Domain(DomainError::UnknownTemplate { .. }) => "Unknown template".into(),
            Self::Domain(DomainError::UnsupportedFormat { .. }) => {
                "Unsupported output format".into()
            }
            Self::Domain(e) if e.category() != crate::domain::ErrorCategory::Composition => {
                e.to_string()
            }
            _ => match self.kind() {
                ErrorKind::ValidationError => "Invalid request".into(),
                ErrorKind::CompositionError => {
                    "Could not prepare the model for this template".into()
                }
                ErrorKind::RenderError => match self {
                    Self::Application(ApplicationError::RenderTimeout { .. }) => {
                        "Model generation timed out, please try again".into()
                    }
                    _ => "Model generation failed".into(),
                },
                ErrorKind::IoError => match self {
                    Self::Application(ApplicationError::ScriptLoadFailed { .. }) => {
                        "Could not load the template script".into()
                    }
                    _ => "Could not store the generated model".into(),
                },
                ErrorKind::ConfigurationError => "The generator is not configured correctly".into(),
                ErrorKind::InternalError => "Internal error".into(),
            },
        }
    }

    /// Classification for a [`GenerationArtifact`] status.
    ///
    /// [`GenerationArtifact`]: crate::domain::GenerationArtifact
    pub fn artifact_status(&self) -> ArtifactStatus {
        match self.kind() {
            ErrorKind::ValidationError => ArtifactStatus::ValidationFailed,
            ErrorKind::IoError => ArtifactStatus::IoFailed,
            _ => ArtifactStatus::RenderFailed,
        }
    }

    /// Check if the caller may retry the same request.
    ///
    /// Nothing is retried inside the core; a persistent misconfiguration
    /// would only be masked.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(
                ApplicationError::RenderFailed { .. }
                    | ApplicationError::RenderTimeout { .. }
                    | ApplicationError::RenderIncomplete
            )
        )
    }
}

/// Error categories for UI display and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Composition,
    Render,
    Io,
    Configuration,
    Internal,
}

/// Error kinds as reported across the transport boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    ValidationError,
    CompositionError,
    RenderError,
    IoError,
    ConfigurationError,
    InternalError,
}

/// Convenient result type alias.
pub type PlateResult<T> = Result<T, PlateError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;

    #[test]
    fn unknown_template_is_a_validation_error() {
        let err: PlateError = DomainError::UnknownTemplate {
            name: "unknown_tpl".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert_eq!(err.artifact_status(), ArtifactStatus::ValidationFailed);
        assert!(!err.is_retryable());
    }

    #[test]
    fn validation_message_is_specific() {
        let err: PlateError = DomainError::InvalidPlateNumber {
            reason: "only digits 0-9 are allowed".into(),
        }
        .into();
        assert!(err.public_message().contains("digits"));
    }

    #[test]
    fn composition_message_is_generic() {
        let err: PlateError = DomainError::MissingPlaceholder {
            template: "dubai_new".into(),
            token: "<plateNum>".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::CompositionError);
        assert!(!err.public_message().contains("plateNum"));
    }

    #[test]
    fn render_messages_never_leak_paths() {
        let errors: Vec<PlateError> = vec![
            ApplicationError::RenderFailed { exit_code: Some(1) }.into(),
            ApplicationError::RenderTimeout {
                after: Duration::from_secs(30),
            }
            .into(),
            ApplicationError::RenderIncomplete.into(),
            ApplicationError::CompilerUnavailable {
                reason: "/usr/bin/openscad: not found".into(),
            }
            .into(),
            ApplicationError::FilesystemError {
                path: PathBuf::from("/srv/plates/generated_files/A-1.stl"),
                reason: "permission denied".into(),
            }
            .into(),
        ];
        for err in errors {
            let msg = err.public_message();
            assert!(!msg.contains('/'), "leaked path in {msg:?}");
            assert!(!msg.contains("exit code"), "leaked exit code in {msg:?}");
        }
    }

    #[test]
    fn unknown_template_message_does_not_echo_input() {
        let err: PlateError = DomainError::UnknownTemplate {
            name: "x\"); import(\"/etc".into(),
        }
        .into();
        assert_eq!(err.public_message(), "Unknown template");
        // Operators still see the name in logs.
        assert!(err.to_string().contains("import"));
    }

    #[test]
    fn script_load_failure_has_its_own_message() {
        let err: PlateError = ApplicationError::ScriptLoadFailed {
            reference: "dubai_new.scad".into(),
            reason: "permission denied".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::IoError);
        assert_eq!(err.public_message(), "Could not load the template script");

        let store: PlateError = ApplicationError::FilesystemError {
            path: PathBuf::from("/srv/out/A-1.stl"),
            reason: "disk full".into(),
        }
        .into();
        assert_eq!(store.public_message(), "Could not store the generated model");
    }

    #[test]
    fn poisoned_lock_is_not_retryable() {
        let err: PlateError = ApplicationError::StoreLockError.into();
        assert!(!err.is_retryable());
        assert_eq!(err.kind(), ErrorKind::InternalError);
    }

    #[test]
    fn render_errors_are_retryable() {
        let err: PlateError = ApplicationError::RenderTimeout {
            after: Duration::from_secs(1),
        }
        .into();
        assert!(err.is_retryable());
        assert_eq!(err.kind(), ErrorKind::RenderError);
        assert_eq!(err.artifact_status(), ArtifactStatus::RenderFailed);
    }

    #[test]
    fn filesystem_errors_map_to_io() {
        let err: PlateError = ApplicationError::FilesystemError {
            path: PathBuf::from("x"),
            reason: "y".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::IoError);
        assert_eq!(err.artifact_status(), ArtifactStatus::IoFailed);
    }
}
