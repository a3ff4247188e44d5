//! Scripts read from a directory on disk.
//!
//! Every `*.scad` file is read once when the store is opened; later edits
//! need a restart. Loading never touches the disk, so concurrent requests
//! cannot observe a half-written script.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use plategen_core::{
    application::{ApplicationError, ports::ScriptStore},
    error::PlateResult,
};

#[derive(Debug, Clone)]
pub struct DirectoryScriptStore {
    root: PathBuf,
    scripts: HashMap<String, Arc<str>>,
}

impl DirectoryScriptStore {
    /// Read every `.scad` file directly under `root`.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn open(root: impl AsRef<Path>) -> PlateResult<Self> {
        let root = root.as_ref().to_path_buf();
        let entries = fs::read_dir(&root).map_err(|e| ApplicationError::ScriptLoadFailed {
            reference: root.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut scripts = HashMap::new();
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "scad") {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                warn!(path = %path.display(), "skipping script with non UTF-8 name");
                continue;
            };

            let source = fs::read_to_string(&path).map_err(|e| {
                ApplicationError::ScriptLoadFailed {
                    reference: name.to_string(),
                    reason: e.to_string(),
                }
            })?;
            debug!(script = name, bytes = source.len(), "script loaded");
            scripts.insert(name.to_string(), Arc::from(source));
        }

        Ok(Self { root, scripts })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

impl ScriptStore for DirectoryScriptStore {
    fn load(&self, reference: &str) -> PlateResult<Arc<str>> {
        self.scripts.get(reference).cloned().ok_or_else(|| {
            ApplicationError::ScriptLoadFailed {
                reference: reference.to_string(),
                reason: format!("not found in {}", self.root.display()),
            }
            .into()
        })
    }

    fn contains(&self, reference: &str) -> bool {
        self.scripts.contains_key(reference)
    }
}
