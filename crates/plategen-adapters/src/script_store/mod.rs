//! Script store adapters.
//!
//! The bundled scripts are compiled into the binary. A directory store lets
//! an operator swap in their own artwork without rebuilding.
//!
//! # Resolution order
//!
//! [`resolve`] picks the first of:
//!
//! 1. An explicitly configured directory (`paths.scripts_dir` / `--scripts-dir`)
//! 2. **`$PLATEGEN_SCRIPTS_DIR`**
//! 3. The scripts embedded at build time
//!
//! A configured directory that does not exist is an error, not a silent
//! fallback; operators who set it expect their scripts to be used.

mod directory;
mod embedded;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use plategen_core::{application::ports::ScriptStore, error::PlateResult};

pub use directory::DirectoryScriptStore;
pub use embedded::EmbeddedScriptStore;

/// Environment override for the scripts directory.
pub const SCRIPTS_DIR_ENV: &str = "PLATEGEN_SCRIPTS_DIR";

/// Where the active scripts came from, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    Configured(PathBuf),
    Environment(PathBuf),
    Embedded,
}

impl std::fmt::Display for ScriptSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configured(p) => write!(f, "{} (configured)", p.display()),
            Self::Environment(p) => write!(f, "{} (${SCRIPTS_DIR_ENV})", p.display()),
            Self::Embedded => f.write_str("bundled scripts"),
        }
    }
}

/// Decide which scripts to use without loading them.
pub fn locate(configured: Option<&Path>) -> ScriptSource {
    if let Some(dir) = configured {
        return ScriptSource::Configured(dir.to_path_buf());
    }
    match std::env::var_os(SCRIPTS_DIR_ENV) {
        Some(dir) if !dir.is_empty() => ScriptSource::Environment(PathBuf::from(dir)),
        _ => ScriptSource::Embedded,
    }
}

/// Build the store for a located source.
pub fn open(source: &ScriptSource) -> PlateResult<Box<dyn ScriptStore>> {
    match source {
        ScriptSource::Configured(dir) | ScriptSource::Environment(dir) => {
            let store = DirectoryScriptStore::open(dir)?;
            info!(path = %dir.display(), count = store.len(), "scripts loaded from directory");
            Ok(Box::new(store))
        }
        ScriptSource::Embedded => {
            debug!("using bundled scripts");
            Ok(Box::new(EmbeddedScriptStore::new()))
        }
    }
}

/// [`locate`] then [`open`].
pub fn resolve(configured: Option<&Path>) -> PlateResult<(ScriptSource, Box<dyn ScriptStore>)> {
    let source = locate(configured);
    let store = open(&source)?;
    Ok((source, store))
}
