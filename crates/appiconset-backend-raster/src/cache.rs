//! Content-addressed render cache.
//!
//! Entries are keyed by:
//! - BLAKE3 hash of the source image bytes
//! - Every render parameter (name, size, resize mode, transparency, background)
//! - The cache format version
//!
//! and stored under `{cache_root}/{namespace}/{key}.png`.
//!
//! Entries are written to a temporary file in the namespace directory and
//! renamed into place, so a reader never sees a partial write. An entry that is
//! not a complete PNG (left by an older interrupted run) counts as a miss and is
//! overwritten.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::png::is_complete_png;
use crate::rasterizer::{RasterError, RenderRequest, Rasterizer};

/// Bumped whenever rendering output changes for identical inputs.
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// Cache key components for deterministic lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    /// BLAKE3 hash of the source image bytes
    pub source_hash: String,
    /// Render request the output was produced for
    pub request: RenderRequest,
}

impl CacheKey {
    /// Compute the cache entry hash (deterministic file stem).
    pub fn compute_hash(&self) -> String {
        let r = &self.request;
        let canonical = format!(
            "version:{},source:{},name:{},width:{},height:{},resize:{},remove_transparency:{},background:{}",
            CACHE_FORMAT_VERSION,
            self.source_hash,
            r.name,
            r.width,
            r.height,
            r.resize_mode,
            r.remove_transparency,
            r.background_color.to_hex()
        );
        blake3::hash(canonical.as_bytes()).to_hex().to_string()
    }
}

/// Makes a namespace safe to use as a single directory name.
pub fn sanitize_namespace(namespace: &str) -> String {
    let cleaned: String = namespace
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        "default".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Memoizing wrapper around another rasterizer.
pub struct CachedRasterizer<R> {
    inner: R,
    cache_root: PathBuf,
    source_hashes: RefCell<HashMap<PathBuf, String>>,
}

impl<R: Rasterizer> CachedRasterizer<R> {
    pub fn new(inner: R, cache_root: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            cache_root: cache_root.into(),
            source_hashes: RefCell::new(HashMap::new()),
        }
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Path of the entry for a key.
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_root
            .join(sanitize_namespace(&key.request.cache_namespace))
            .join(format!("{}.png", key.compute_hash()))
    }

    fn source_hash(&self, source: &Path) -> Result<String, RasterError> {
        if let Some(hash) = self.source_hashes.borrow().get(source) {
            return Ok(hash.clone());
        }
        let bytes = fs::read(source).map_err(|e| RasterError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
        let hash = blake3::hash(&bytes).to_hex().to_string();
        self.source_hashes
            .borrow_mut()
            .insert(source.to_path_buf(), hash.clone());
        Ok(hash)
    }
}

impl<R: Rasterizer> Rasterizer for CachedRasterizer<R> {
    fn render(&self, source: &Path, request: &RenderRequest) -> Result<Vec<u8>, RasterError> {
        let key = CacheKey {
            source_hash: self.source_hash(source)?,
            request: request.clone(),
        };
        let entry_path = self.entry_path(&key);

        match fs::read(&entry_path) {
            Ok(bytes) if is_complete_png(&bytes) => return Ok(bytes),
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(RasterError::Cache {
                    path: entry_path,
                    source: e,
                })
            }
        }

        let bytes = self.inner.render(source, request)?;
        store_entry(&entry_path, &bytes)?;
        Ok(bytes)
    }
}

/// Writes `bytes` to a temp file beside `entry_path`, then renames it over the entry.
fn store_entry(entry_path: &Path, bytes: &[u8]) -> Result<(), RasterError> {
    let cache_err = |path: &Path, e: std::io::Error| RasterError::Cache {
        path: path.to_path_buf(),
        source: e,
    };
    let dir = entry_path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| cache_err(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| cache_err(dir, e))?;
    tmp.write_all(bytes).map_err(|e| cache_err(tmp.path(), e))?;
    tmp.persist(entry_path)
        .map_err(|e| cache_err(entry_path, e.error))?;
    Ok(())
}
