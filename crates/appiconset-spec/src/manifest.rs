//! Asset-catalog manifest (`Contents.json`) types.

use serde::{Deserialize, Serialize};

use crate::idiom::{Idiom, Platform};

/// Manifest filename inside an image set directory.
pub const CONTENTS_JSON: &str = "Contents.json";

/// Author recorded in the manifest `info` block.
pub const MANIFEST_AUTHOR: &str = "appiconset";

/// One image slot in `Contents.json`.
///
/// Fields are declared in Xcode's (alphabetical) key order so serialized output
/// matches what Xcode itself writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub filename: String,
    pub idiom: Idiom,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    /// Logical size as `"{W}x{H}"`.
    pub size: String,
}

/// The `info` block of `Contents.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentsInfo {
    pub author: String,
    pub version: u32,
}

impl Default for ContentsInfo {
    fn default() -> Self {
        Self {
            author: MANIFEST_AUTHOR.to_string(),
            version: 1,
        }
    }
}

/// Complete `Contents.json` document for an image set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentsJson {
    pub images: Vec<ManifestEntry>,
    #[serde(default)]
    pub info: ContentsInfo,
}

impl ContentsJson {
    pub fn new(images: Vec<ManifestEntry>) -> Self {
        Self {
            images,
            info: ContentsInfo::default(),
        }
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
