//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! logic. Validation and composition errors are `DomainError` from
//! `crate::domain`.
//!
//! Variants may carry paths and compiler exit codes for logs; the text sent
//! to callers comes from [`PlateError::public_message`] instead.
//!
//! [`PlateError::public_message`]: crate::error::PlateError::public_message

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while loading scripts or driving the compiler.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The compiler exited unsuccessfully.
    #[error("Geometry compiler failed (exit code {})", display_code(.exit_code))]
    RenderFailed { exit_code: Option<i32> },

    /// The compiler did not finish in time and was killed.
    #[error("Geometry compiler timed out after {after:?}")]
    RenderTimeout { after: Duration },

    /// The compiler reported success but produced no output file.
    #[error("Geometry compiler exited successfully but produced no output")]
    RenderIncomplete,

    /// The compiler process could not be started.
    #[error("Geometry compiler unavailable: {reason}")]
    CompilerUnavailable { reason: String },

    /// A registered template has no source script.
    #[error("Template '{template}' references missing script '{reference}'")]
    ScriptSourceMissing { template: String, reference: String },

    /// A source script exists but could not be read.
    #[error("Failed to load script '{reference}': {reason}")]
    ScriptLoadFailed { reference: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared adapter state was poisoned.
    #[error("Adapter lock poisoned")]
    StoreLockError,
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RenderFailed { .. } => vec![
                "The geometry compiler rejected the generated script".into(),
                "Run with -vv to see the compiler diagnostics".into(),
            ],
            Self::RenderTimeout { after } => vec![
                format!("Rendering took longer than {}s", after.as_secs()),
                "Increase compiler.timeout_secs or use --timeout".into(),
            ],
            Self::RenderIncomplete => vec![
                "The compiler produced no model file".into(),
                "Check that the output directory is writable".into(),
            ],
            Self::CompilerUnavailable { .. } => vec![
                "Install OpenSCAD and make sure `openscad` is on your PATH".into(),
                "Or point compiler.binary / --compiler at the executable".into(),
            ],
            Self::ScriptSourceMissing { reference, .. } => vec![
                format!("Provide '{reference}' in the configured scripts directory"),
                "Or unset paths.scripts_dir to use the bundled scripts".into(),
            ],
            Self::ScriptLoadFailed { .. } => vec!["Check permissions on the scripts directory".into()],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::StoreLockError => vec![
                "A previous operation panicked while holding adapter state".into(),
                "Restart the process".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RenderFailed { .. }
            | Self::RenderTimeout { .. }
            | Self::RenderIncomplete
            | Self::CompilerUnavailable { .. } => ErrorCategory::Render,
            Self::ScriptSourceMissing { .. } => ErrorCategory::Configuration,
            Self::ScriptLoadFailed { .. } | Self::FilesystemError { .. } => ErrorCategory::Io,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
