//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `plategen-adapters` crate provides implementations.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::error::PlateResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `plategen_adapters::filesystem::LocalFilesystem` (production)
/// - `plategen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> PlateResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> PlateResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> PlateResult<()>;

    /// Move a file onto `to`, replacing any existing file there.
    fn rename(&self, from: &Path, to: &Path) -> PlateResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for template source scripts.
///
/// Implemented by:
/// - `plategen_adapters::script_store::EmbeddedScriptStore` (bundled scripts)
/// - `plategen_adapters::script_store::DirectoryScriptStore` (scripts on disk)
#[cfg_attr(test, mockall::automock)]
pub trait ScriptStore: Send + Sync {
    /// Source text for a script reference such as `dubai_new.scad`.
    fn load(&self, reference: &str) -> PlateResult<Arc<str>>;

    /// Whether `reference` can be loaded.
    fn contains(&self, reference: &str) -> bool;
}

/// How a compiler run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileStatus {
    /// Exit code 0.
    Success,
    /// Non-zero exit, or terminated by a signal (`code` is `None`).
    Failed { code: Option<i32> },
    /// Killed after exceeding the timeout.
    TimedOut,
}

/// Result of one compiler invocation.
///
/// `diagnostics` is free text (the compiler's stderr); it is logged, never
/// parsed, never returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutcome {
    pub status: CompileStatus,
    pub diagnostics: String,
}

impl CompileOutcome {
    pub fn success() -> Self {
        Self {
            status: CompileStatus::Success,
            diagnostics: String::new(),
        }
    }
}

/// Port for the external geometry compiler.
///
/// Implemented by:
/// - `plategen_adapters::compiler::OpenScadCompiler` (child process)
#[cfg_attr(test, mockall::automock)]
pub trait GeometryCompiler: Send + Sync {
    /// Compile the script at `input` into a model at `output`.
    ///
    /// Must not block past `timeout`. Returns `Err` only when the compiler
    /// could not be run at all; a run that fails is an `Ok` outcome.
    fn compile(&self, input: &Path, output: &Path, timeout: Duration)
    -> PlateResult<CompileOutcome>;

    /// Check the compiler can be started and return a version line.
    fn probe(&self) -> PlateResult<String>;
}
