//! `Contents.json` reading and writing.

use std::fs;
use std::path::{Path, PathBuf};

use appiconset_spec::{ContentsJson, CONTENTS_JSON};
use thiserror::Error;

/// Errors from manifest I/O.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to serialize Contents.json: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes `dir/Contents.json`, replacing any existing manifest.
pub fn write_contents_json(dir: &Path, contents: &ContentsJson) -> Result<PathBuf, ManifestError> {
    let path = dir.join(CONTENTS_JSON);
    let json = contents.to_json_pretty().map_err(ManifestError::Serialize)?;
    fs::write(&path, json).map_err(|e| ManifestError::Io {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

/// Reads `dir/Contents.json`.
pub fn read_contents_json(dir: &Path) -> Result<ContentsJson, ManifestError> {
    let path = dir.join(CONTENTS_JSON);
    let json = fs::read_to_string(&path).map_err(|e| ManifestError::Io {
        path: path.clone(),
        source: e,
    })?;
    ContentsJson::from_json(&json).map_err(|e| ManifestError::Parse { path, source: e })
}
