use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{entities::PlateRequest, value_objects::ArtifactFormat};

/// Deterministic output file name: `UPPER(code)-number.ext`.
///
/// Two requests with the same code and number map to the same name, so
/// regenerating a plate overwrites the previous model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactName(String);

impl ArtifactName {
    pub fn for_request(request: &PlateRequest, format: ArtifactFormat) -> Self {
        Self(format!(
            "{}-{}.{}",
            request.code().as_str().to_ascii_uppercase(),
            request.number(),
            format.extension()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for ArtifactName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome classification of one generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArtifactStatus {
    Success,
    RenderFailed,
    ValidationFailed,
    IoFailed,
}

/// A model file the compiler produced.
///
/// The file belongs to the filesystem; the core never deletes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationArtifact {
    pub output_file_name: ArtifactName,
    pub output_path: PathBuf,
    pub status: ArtifactStatus,
}

impl GenerationArtifact {
    pub fn success(output_file_name: ArtifactName, output_path: PathBuf) -> Self {
        Self {
            output_file_name,
            output_path,
            status: ArtifactStatus::Success,
        }
    }
}
