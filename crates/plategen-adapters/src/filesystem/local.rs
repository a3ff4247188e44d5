//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use plategen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{PlateError, PlateResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> PlateResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> PlateResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn remove_file(&self, path: &Path) -> PlateResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn rename(&self, from: &Path, to: &Path) -> PlateResult<()> {
        // Windows refuses to rename onto an existing file.
        #[cfg(windows)]
        if to.exists() {
            std::fs::remove_file(to).map_err(|e| map_io_error(to, e, "replace file"))?;
        }
        std::fs::rename(from, to).map_err(|e| map_io_error(to, e, "publish file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> PlateError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
