//! Rasterizer seam: source image + target geometry in, encoded PNG out.

use std::path::{Path, PathBuf};

use appiconset_spec::{RenderTask, ResizeMode, Rgba8};
use thiserror::Error;

use crate::png::PngError;

/// Errors from rasterization.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The source image could not be read.
    #[error("failed to read source image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source image could not be decoded.
    #[error("failed to decode source image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Output encoding failed.
    #[error(transparent)]
    Png(#[from] PngError),

    /// A zero-sized target was requested.
    #[error("invalid render size {width}x{height} for '{name}'")]
    InvalidSize { name: String, width: u32, height: u32 },

    /// The render cache could not be read or written.
    #[error("render cache error at {path}: {source}")]
    Cache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parameters for one render.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderRequest {
    /// Output filename, also part of the cache key.
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub resize_mode: ResizeMode,
    pub remove_transparency: bool,
    pub background_color: Rgba8,
    /// Cache partition the result is memoized under.
    pub cache_namespace: String,
}

impl RenderRequest {
    /// Builds the request for a planned render task.
    pub fn from_task(task: &RenderTask, cache_namespace: &str) -> Self {
        Self {
            name: task.filename.clone(),
            width: task.pixel_width,
            height: task.pixel_height,
            resize_mode: task.options.resize_mode,
            remove_transparency: task.options.remove_transparency,
            background_color: task.options.background_color,
            cache_namespace: cache_namespace.to_string(),
        }
    }
}

/// Renders a source image to encoded PNG bytes.
///
/// Implementations must be deterministic: identical source and request yield
/// identical bytes.
pub trait Rasterizer {
    fn render(&self, source: &Path, request: &RenderRequest) -> Result<Vec<u8>, RasterError>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for &R {
    fn render(&self, source: &Path, request: &RenderRequest) -> Result<Vec<u8>, RasterError> {
        (**self).render(source, request)
    }
}

impl<R: Rasterizer + ?Sized> Rasterizer for Box<R> {
    fn render(&self, source: &Path, request: &RenderRequest) -> Result<Vec<u8>, RasterError> {
        (**self).render(source, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appiconset_spec::{plan_icon_set, IconSetKind};

    #[test]
    fn test_request_from_task() {
        let plan = plan_icon_set(IconSetKind::Imessage, true);
        let task = &plan.renders[1];
        let request = RenderRequest::from_task(task, "widget-icons-targets-chat");

        assert_eq!(request.name, "icon-60x45@3x.png");
        assert_eq!((request.width, request.height), (180, 135));
        assert_eq!(request.resize_mode, ResizeMode::Contain);
        assert!(!request.remove_transparency);
        assert_eq!(request.background_color, Rgba8::TRANSPARENT_WHITE);
        assert_eq!(request.cache_namespace, "widget-icons-targets-chat");
    }

    #[test]
    fn test_error_messages_name_the_path() {
        let err = RasterError::Io {
            path: PathBuf::from("assets/icon.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("assets/icon.png"));
    }
}
