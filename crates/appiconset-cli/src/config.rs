//! Target configuration files.
//!
//! A targets file lists the extension targets to generate icons for:
//!
//! ```json
//! {
//!   "targets": [
//!     { "type": "widget", "cwd": "targets/widget", "icon": "assets/icon.png" },
//!     { "type": "imessage", "cwd": "targets/stickers", "icon": "assets/sticker.png", "isTransparent": true }
//!   ]
//! }
//! ```
//!
//! Targets are processed in file order.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use appiconset_spec::ExtensionType;

use crate::generate::IconJob;

/// Errors loading a targets file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid target #{index}: {message}")]
    Invalid { index: usize, message: String },
}

/// One extension target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TargetConfig {
    #[serde(rename = "type")]
    pub extension_type: ExtensionType,
    /// Target directory relative to the project root.
    pub cwd: String,
    /// Source icon, relative to the project root or absolute.
    pub icon: String,
    #[serde(default)]
    pub is_transparent: bool,
}

impl TargetConfig {
    pub fn to_job(&self, project_root: &Path) -> IconJob {
        IconJob::for_target(project_root, &self.cwd, &self.icon, self.is_transparent)
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::Invalid {
            index,
            message: message.to_string(),
        };
        if self.cwd.trim().is_empty() {
            return Err(invalid("cwd must not be empty"));
        }
        let cwd = Path::new(&self.cwd);
        if cwd.is_absolute() {
            return Err(invalid("cwd must be relative to the project root"));
        }
        if cwd.components().any(|c| c == Component::ParentDir) {
            return Err(invalid("cwd must stay inside the project root"));
        }
        if self.icon.trim().is_empty() {
            return Err(invalid("icon must not be empty"));
        }
        Ok(())
    }
}

/// Top-level targets file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetsFile {
    pub targets: Vec<TargetConfig>,
}

impl TargetsFile {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.targets
            .iter()
            .enumerate()
            .try_for_each(|(i, target)| target.validate(i))
    }
}

/// Loads and validates a targets file.
pub fn load_targets(path: &Path) -> Result<Vec<TargetConfig>, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let file = TargetsFile::from_json(&json).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    file.validate()?;
    Ok(file.targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_targets() {
        let file = TargetsFile::from_json(
            r#"{
                "targets": [
                    { "type": "widget", "cwd": "targets/widget", "icon": "icon.png" },
                    { "type": "imessage", "cwd": "targets/chat", "icon": "chat.png", "isTransparent": true }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            file.targets,
            vec![
                TargetConfig {
                    extension_type: ExtensionType::Widget,
                    cwd: "targets/widget".to_string(),
                    icon: "icon.png".to_string(),
                    is_transparent: false,
                },
                TargetConfig {
                    extension_type: ExtensionType::Imessage,
                    cwd: "targets/chat".to_string(),
                    icon: "chat.png".to_string(),
                    is_transparent: true,
                },
            ]
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = TargetsFile::from_json(
            r#"{ "targets": [ { "type": "toaster", "cwd": "t", "icon": "i.png" } ] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("toaster"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(TargetsFile::from_json(
            r#"{ "targets": [ { "type": "clip", "cwd": "t", "icon": "i.png", "colour": 1 } ] }"#,
        )
        .is_err());
    }

    #[test]
    fn test_validation() {
        let file = TargetsFile::from_json(
            r#"{ "targets": [
                { "type": "clip", "cwd": "ok", "icon": "i.png" },
                { "type": "clip", "cwd": " ", "icon": "i.png" }
            ] }"#,
        )
        .unwrap();
        let err = file.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { index: 1, .. }));
    }

    #[test]
    fn test_cwd_must_stay_inside_project() {
        for cwd in ["../sibling", "targets/../../outside", ".."] {
            let target = TargetConfig {
                extension_type: ExtensionType::Widget,
                cwd: cwd.to_string(),
                icon: "icon.png".to_string(),
                is_transparent: false,
            };
            let err = target.validate(0).unwrap_err();
            assert!(
                matches!(&err, ConfigError::Invalid { message, .. } if message.contains("inside")),
                "{}: {}",
                cwd,
                err
            );
        }

        let file = TargetsFile::from_json(
            r#"{ "targets": [ { "type": "clip", "cwd": "./targets/clip", "icon": "../shared/icon.png" } ] }"#,
        )
        .unwrap();
        assert!(file.validate().is_ok());
    }

    #[test]
    fn test_to_job() {
        let target = TargetConfig {
            extension_type: ExtensionType::Watch,
            cwd: "targets/watch".to_string(),
            icon: "assets/watch.png".to_string(),
            is_transparent: true,
        };
        let job = target.to_job(Path::new("/app"));
        assert_eq!(job.named_project_root, PathBuf::from("/app/targets/watch"));
        assert_eq!(job.source_path(), PathBuf::from("/app/assets/watch.png"));
        assert_eq!(job.cache_component, "targets/watch");
        assert!(job.is_transparent);
    }

    #[test]
    fn test_load_targets_errors() {
        let tmp = TempDir::new().unwrap();
        let missing = load_targets(&tmp.path().join("targets.json")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));

        let path = tmp.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            load_targets(&path).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }
}
