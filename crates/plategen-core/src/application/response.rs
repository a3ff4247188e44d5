//! Transport-facing generation response.
//!
//! The JSON shape is what a web or CLI front end hands back to its caller:
//! `{"status":"ok","outputFileName":…,"outputPath":…}` or
//! `{"status":"error","kind":…,"message":…}`.

use serde::{Deserialize, Serialize};

use crate::{
    domain::GenerationArtifact,
    error::{ErrorKind, PlateError, PlateResult},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerationResponse {
    Ok {
        #[serde(rename = "outputFileName")]
        output_file_name: String,
        #[serde(rename = "outputPath")]
        output_path: String,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

impl GenerationResponse {
    pub fn success(artifact: &GenerationArtifact) -> Self {
        Self::Ok {
            output_file_name: artifact.output_file_name.to_string(),
            output_path: artifact.output_path.display().to_string(),
        }
    }

    /// Only the public message crosses the boundary.
    pub fn failure(error: &PlateError) -> Self {
        Self::Error {
            kind: error.kind(),
            message: error.public_message(),
        }
    }

    pub fn from_result(result: &PlateResult<GenerationArtifact>) -> Self {
        match result {
            Ok(artifact) => Self::success(artifact),
            Err(e) => Self::failure(e),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}
