//! Icon-set generation and orchestration.
//!
//! Generation is two-phase: every image is rendered and written first, then
//! `Contents.json` is written once with the full entry list. A failure in the
//! first phase leaves the manifest untouched, though images already written in
//! that call stay on disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use appiconset_backend_raster::{
    hash_png, CachedRasterizer, ImageRasterizer, RasterError, RenderRequest, Rasterizer,
};
use appiconset_spec::{
    icon_slots, ContentsJson, ExtensionType, IconSetKind, IconSlot, ManifestEntry,
    IMAGE_CACHE_NAME,
};
use serde::Serialize;
use thiserror::Error;

use crate::cache::cache_root;
use crate::manifest::{write_contents_json, ManifestError};

/// Errors that abort a generation call.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to render {filename}: {source}")]
    Render {
        filename: String,
        #[source]
        source: RasterError,
    },

    #[error("failed to create asset catalog directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Inputs for one target's icon generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconJob {
    /// Source image; relative paths resolve against `project_root`.
    pub source: PathBuf,
    pub project_root: PathBuf,
    /// Target directory the asset catalog lives under.
    pub named_project_root: PathBuf,
    /// Appended to the cache namespace so targets do not share cache entries.
    pub cache_component: String,
    pub is_transparent: bool,
}

impl IconJob {
    /// Job for a target at `project_root/cwd`, cached under the `cwd` component.
    pub fn for_target(
        project_root: impl Into<PathBuf>,
        cwd: &str,
        source: impl Into<PathBuf>,
        is_transparent: bool,
    ) -> Self {
        let project_root = project_root.into();
        Self {
            source: source.into(),
            named_project_root: project_root.join(cwd),
            project_root,
            cache_component: cwd.to_string(),
            is_transparent,
        }
    }

    pub fn source_path(&self) -> PathBuf {
        self.project_root.join(&self.source)
    }

    pub fn cache_namespace(&self) -> String {
        format!("{}{}", IMAGE_CACHE_NAME, self.cache_component)
    }

    /// `Assets.xcassets/AppIcon.appiconset` under the named project root.
    pub fn asset_catalog_dir(&self, kind: IconSetKind) -> PathBuf {
        self.named_project_root.join(kind.asset_catalog_path())
    }
}

/// Whether a file was rasterized for an entry or shared with an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Rendered,
    Reused,
}

/// One manifest entry's backing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub status: FileStatus,
    /// BLAKE3 hash of the PNG bytes.
    pub hash: String,
}

/// Outcome of one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedIconSet {
    pub kind: IconSetKind,
    pub directory: PathBuf,
    /// Manifest entries in table order.
    pub entries: Vec<ManifestEntry>,
    /// One record per entry, in the same order.
    pub files: Vec<GeneratedFile>,
    /// Set once `Contents.json` has been written.
    pub manifest_path: Option<PathBuf>,
}

impl GeneratedIconSet {
    pub fn rendered_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.status == FileStatus::Rendered)
            .count()
    }

    pub fn reused_count(&self) -> usize {
        self.files.len() - self.rendered_count()
    }
}

/// Renders and writes every image for `kind`, returning the manifest entries.
///
/// The asset catalog directory must already exist. Each filename is rasterized at
/// most once per call; later entries naming the same file reuse it.
pub fn generate_icons_internal<R: Rasterizer + ?Sized>(
    kind: IconSetKind,
    rasterizer: &R,
    job: &IconJob,
) -> Result<GeneratedIconSet, GenerateError> {
    let directory = job.asset_catalog_dir(kind);
    let source = job.source_path();
    let namespace = job.cache_namespace();

    // filename -> hash of what was written this run
    let mut generated: HashMap<String, String> = HashMap::new();
    let mut entries = Vec::new();
    let mut files = Vec::new();

    for IconSlot { entry, task } in icon_slots(kind, job.is_transparent) {
        let (status, hash) = match generated.get(&task.filename) {
            Some(hash) => (FileStatus::Reused, hash.clone()),
            None => {
                let request = RenderRequest::from_task(&task, &namespace);
                let bytes = rasterizer
                    .render(&source, &request)
                    .map_err(|e| GenerateError::Render {
                        filename: task.filename.clone(),
                        source: e,
                    })?;

                let path = directory.join(&task.filename);
                fs::write(&path, &bytes).map_err(|e| GenerateError::WriteImage {
                    path: path.clone(),
                    source: e,
                })?;

                let hash = hash_png(&bytes);
                generated.insert(task.filename.clone(), hash.clone());
                (FileStatus::Rendered, hash)
            }
        };

        files.push(GeneratedFile {
            filename: task.filename,
            width: task.pixel_width,
            height: task.pixel_height,
            status,
            hash,
        });
        entries.push(entry);
    }

    Ok(GeneratedIconSet {
        kind,
        directory,
        entries,
        files,
        manifest_path: None,
    })
}

/// Creates the asset catalog directory, generates every image, then writes
/// `Contents.json` once.
pub fn set_icons<R: Rasterizer + ?Sized>(
    kind: IconSetKind,
    rasterizer: &R,
    job: &IconJob,
) -> Result<GeneratedIconSet, GenerateError> {
    let directory = job.asset_catalog_dir(kind);
    fs::create_dir_all(&directory).map_err(|e| GenerateError::CreateDir {
        path: directory.clone(),
        source: e,
    })?;

    let mut generated = generate_icons_internal(kind, rasterizer, job)?;
    let contents = ContentsJson::new(generated.entries.clone());
    generated.manifest_path = Some(write_contents_json(&directory, &contents)?);
    Ok(generated)
}

/// Standard app icon (widgets, clips, and every other non-iMessage, non-watch target).
pub fn set_standard_icons<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    job: &IconJob,
) -> Result<GeneratedIconSet, GenerateError> {
    set_icons(IconSetKind::Standard, rasterizer, job)
}

/// iMessage extension icon.
pub fn set_imessage_icons<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    job: &IconJob,
) -> Result<GeneratedIconSet, GenerateError> {
    set_icons(IconSetKind::Imessage, rasterizer, job)
}

/// watchOS app icon.
pub fn set_watch_icons<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    job: &IconJob,
) -> Result<GeneratedIconSet, GenerateError> {
    set_icons(IconSetKind::Watch, rasterizer, job)
}

/// Picks the generator for the extension type and runs it through `rasterizer`.
pub fn set_icons_for_extension<R: Rasterizer + ?Sized>(
    extension_type: ExtensionType,
    rasterizer: &R,
    job: &IconJob,
) -> Result<GeneratedIconSet, GenerateError> {
    match extension_type.icon_set_kind() {
        IconSetKind::Watch => set_watch_icons(rasterizer, job),
        IconSetKind::Imessage => set_imessage_icons(rasterizer, job),
        IconSetKind::Standard => set_standard_icons(rasterizer, job),
    }
}

/// The default rasterizer stack: `image` rendering memoized under the project's cache.
pub fn default_rasterizer(project_root: &Path) -> CachedRasterizer<ImageRasterizer> {
    CachedRasterizer::new(ImageRasterizer::new(), cache_root(project_root))
}

/// Generates the icon set for one target with the default rasterizer.
pub fn with_ios_icon(
    extension_type: ExtensionType,
    job: &IconJob,
) -> Result<GeneratedIconSet, GenerateError> {
    let rasterizer = default_rasterizer(&job.project_root);
    set_icons_for_extension(extension_type, &rasterizer, job)
}
