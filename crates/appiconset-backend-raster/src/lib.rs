//! appiconset rasterizer backend
//!
//! Turns one source image into the pixel-exact PNGs an asset catalog needs.
//! All output is byte-identical for the same source and parameters.
//!
//! # Components
//!
//! - [`Rasterizer`]: the seam the icon-set generator renders through
//! - [`ImageRasterizer`]: Lanczos3 resize with cover/contain fitting, optional
//!   flattening onto a background color
//! - [`CachedRasterizer`]: memoizes renders on disk, keyed by source hash and
//!   render parameters
//! - [`png`]: deterministic PNG encoding
//!
//! # Example
//!
//! ```no_run
//! use appiconset_backend_raster::{CachedRasterizer, ImageRasterizer, Rasterizer, RenderRequest};
//! use appiconset_spec::{plan_icon_set, IconSetKind};
//! use std::path::Path;
//!
//! let rasterizer = CachedRasterizer::new(ImageRasterizer::new(), ".appiconset/cache");
//! let plan = plan_icon_set(IconSetKind::Watch, false);
//! let request = RenderRequest::from_task(&plan.renders[0], "widget-icons-watch");
//! let png = rasterizer.render(Path::new("assets/icon.png"), &request).unwrap();
//! ```

pub mod cache;
pub mod image_rasterizer;
pub mod png;
pub mod rasterizer;

pub use cache::{sanitize_namespace, CacheKey, CachedRasterizer, CACHE_FORMAT_VERSION};
pub use image_rasterizer::ImageRasterizer;
pub use crate::png::{hash_png, is_complete_png, PngConfig, PngError, PNG_SIGNATURE};
pub use rasterizer::{RasterError, RenderRequest, Rasterizer};
