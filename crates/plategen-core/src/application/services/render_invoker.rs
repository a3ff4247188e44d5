//! Render Invoker - runs the geometry compiler for one composed script.
//!
//! Every run allocates its own scratch identifier, uses it, and releases it:
//! 1. Write the script to `<scratch_dir>/plate-<id>.scad`
//! 2. Compile into `<output_dir>/.<id>.partial.<name>`
//! 3. On confirmed success, rename the staging file onto `<output_dir>/<name>`
//! 4. Remove whatever scratch/staging files are left, on every path
//!
//! Concurrent runs never share a file name, and a half-written model never
//! appears under its final name.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{CompileStatus, Filesystem, GeometryCompiler},
    },
    domain::{ArtifactFormat, ArtifactName, ComposedScript, GenerationArtifact},
    error::PlateResult,
};

/// Default limit for one compiler run.
pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how renders happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    /// Directory for per-run scratch scripts.
    pub scratch_dir: PathBuf,
    /// Directory artifacts are published into.
    pub output_dir: PathBuf,
    /// Limit for one compiler run.
    pub timeout: Duration,
    /// Model format, which also picks the artifact extension.
    pub format: ArtifactFormat,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            scratch_dir: std::env::temp_dir().join("plategen"),
            output_dir: PathBuf::from("generated_files"),
            timeout: DEFAULT_RENDER_TIMEOUT,
            format: ArtifactFormat::default(),
        }
    }
}

/// File names owned by a single render run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchPaths {
    pub run_id: Uuid,
    pub script: PathBuf,
    pub staging: PathBuf,
}

impl ScratchPaths {
    pub fn allocate(settings: &RenderSettings, name: &ArtifactName) -> Self {
        let run_id = Uuid::new_v4();
        Self {
            run_id,
            script: settings.scratch_dir.join(format!("plate-{run_id}.scad")),
            staging: settings
                .output_dir
                .join(format!(".{run_id}.partial.{name}")),
        }
    }
}

/// Drives one compiler run per call. Holds no per-run state.
pub struct RenderInvoker {
    compiler: Box<dyn GeometryCompiler>,
    filesystem: Box<dyn Filesystem>,
    settings: RenderSettings,
}

impl RenderInvoker {
    pub fn new(
        compiler: Box<dyn GeometryCompiler>,
        filesystem: Box<dyn Filesystem>,
        settings: RenderSettings,
    ) -> Self {
        Self {
            compiler,
            filesystem,
            settings,
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn compiler(&self) -> &dyn GeometryCompiler {
        self.compiler.as_ref()
    }

    /// Render `script` and publish the model as `name`.
    #[instrument(skip_all, fields(template = %script.template(), artifact = %name))]
    pub fn render(
        &self,
        script: &ComposedScript,
        name: &ArtifactName,
    ) -> PlateResult<GenerationArtifact> {
        let scratch = ScratchPaths::allocate(&self.settings, name);
        debug!(run_id = %scratch.run_id, "allocated scratch files");

        let result = self.run(script, name, &scratch);
        self.release(&scratch);
        result
    }

    fn run(
        &self,
        script: &ComposedScript,
        name: &ArtifactName,
        scratch: &ScratchPaths,
    ) -> PlateResult<GenerationArtifact> {
        self.filesystem.create_dir_all(&self.settings.scratch_dir)?;
        self.filesystem.create_dir_all(&self.settings.output_dir)?;
        self.filesystem.write_file(&scratch.script, script.as_str())?;

        let outcome = self
            .compiler
            .compile(&scratch.script, &scratch.staging, self.settings.timeout)?;

        match outcome.status {
            CompileStatus::Success => {
                if !outcome.diagnostics.is_empty() {
                    debug!(diagnostics = %outcome.diagnostics, "compiler diagnostics");
                }
            }
            CompileStatus::Failed { code } => {
                error!(
                    exit_code = ?code,
                    diagnostics = %outcome.diagnostics,
                    "geometry compiler failed"
                );
                return Err(ApplicationError::RenderFailed { exit_code: code }.into());
            }
            CompileStatus::TimedOut => {
                warn!(timeout = ?self.settings.timeout, "geometry compiler timed out");
                return Err(ApplicationError::RenderTimeout {
                    after: self.settings.timeout,
                }
                .into());
            }
        }

        if !self.filesystem.exists(&scratch.staging) {
            warn!(diagnostics = %outcome.diagnostics, "compiler exited 0 without output");
            return Err(ApplicationError::RenderIncomplete.into());
        }

        let output_path = self.settings.output_dir.join(name);
        self.filesystem.rename(&scratch.staging, &output_path)?;

        info!(path = %output_path.display(), "artifact published");
        Ok(GenerationArtifact::success(name.clone(), output_path))
    }

    /// Best-effort removal of this run's scratch files.
    fn release(&self, scratch: &ScratchPaths) {
        for path in [&scratch.script, &scratch.staging] {
            self.remove_if_present(path);
        }
    }

    fn remove_if_present(&self, path: &Path) {
        if !self.filesystem.exists(path) {
            return;
        }
        if let Err(e) = self.filesystem.remove_file(path) {
            warn!(error = %e, path = %path.display(), "failed to remove scratch file");
        }
    }
}
