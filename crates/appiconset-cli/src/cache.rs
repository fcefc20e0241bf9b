//! Render cache location and housekeeping.
//!
//! The cache lives inside the project at `.appiconset/cache/{namespace}/`, one
//! directory per target, each holding `{key}.png` entries written by
//! `CachedRasterizer`.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Cache directory relative to the project root.
pub const CACHE_DIR: &str = ".appiconset/cache";

/// Get the cache root for a project.
pub fn cache_root(project_root: &Path) -> PathBuf {
    project_root.join(CACHE_DIR)
}

/// Usage of one target's namespace directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceInfo {
    pub name: String,
    pub entry_count: u64,
    pub size_bytes: u64,
}

/// Cache usage for a project, totals plus a per-namespace breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct CacheInfo {
    pub cache_dir: PathBuf,
    pub namespace_count: u64,
    pub entry_count: u64,
    pub total_size_bytes: u64,
    /// Sorted by name.
    pub namespaces: Vec<NamespaceInfo>,
}

/// Walks the cache and tallies `.png` entries per namespace.
pub fn info(project_root: &Path) -> Result<CacheInfo> {
    let cache_dir = cache_root(project_root);
    let mut namespaces: BTreeMap<String, NamespaceInfo> = BTreeMap::new();

    if cache_dir.exists() {
        for entry in walkdir::WalkDir::new(&cache_dir).min_depth(1).max_depth(2) {
            let entry = entry.context("Failed to walk cache directory")?;
            let name = match entry.depth() {
                1 if entry.file_type().is_dir() => entry.file_name(),
                2 if entry.file_type().is_file()
                    && entry.path().extension().and_then(|s| s.to_str()) == Some("png") =>
                {
                    match entry.path().parent().and_then(|p| p.file_name()) {
                        Some(parent) => parent,
                        None => continue,
                    }
                }
                _ => continue,
            };

            let ns = namespaces
                .entry(name.to_string_lossy().into_owned())
                .or_insert_with_key(|name| NamespaceInfo {
                    name: name.clone(),
                    entry_count: 0,
                    size_bytes: 0,
                });
            if entry.depth() == 2 {
                ns.entry_count += 1;
                ns.size_bytes += entry
                    .metadata()
                    .context("Failed to read cache entry metadata")?
                    .len();
            }
        }
    }

    let namespaces: Vec<NamespaceInfo> = namespaces.into_values().collect();
    Ok(CacheInfo {
        cache_dir,
        namespace_count: namespaces.len() as u64,
        entry_count: namespaces.iter().map(|n| n.entry_count).sum(),
        total_size_bytes: namespaces.iter().map(|n| n.size_bytes).sum(),
        namespaces,
    })
}

/// Removes every namespace directory and returns the removed names, sorted.
pub fn clear(project_root: &Path) -> Result<Vec<String>> {
    let cache_dir = cache_root(project_root);
    if !cache_dir.exists() {
        return Ok(Vec::new());
    }

    let mut removed = Vec::new();
    for entry in fs::read_dir(&cache_dir).context("Failed to read cache directory")? {
        let path = entry.context("Failed to read directory entry")?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to remove cache namespace: {}", path.display()))?;
            if let Some(name) = path.file_name() {
                removed.push(name.to_string_lossy().into_owned());
            }
        }
    }
    removed.sort();
    Ok(removed)
}
