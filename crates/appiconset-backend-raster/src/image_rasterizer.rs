//! `image`-crate rasterizer.
//!
//! Resizes with Lanczos3, then either crops to fill (`cover`) or letterboxes
//! onto the background color (`contain`). When transparency is removed the
//! result is flattened over the background and encoded as RGB; otherwise RGBA.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use appiconset_spec::{ResizeMode, Rgba8};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::png::{encode_rgb, encode_rgba, PngConfig};
use crate::rasterizer::{RasterError, RenderRequest, Rasterizer};

/// Resampling filter for all resizes.
const FILTER: FilterType = FilterType::Lanczos3;

/// Production rasterizer backed by the `image` crate.
///
/// The most recently decoded source is kept so a run over one icon decodes it once.
#[derive(Debug, Default)]
pub struct ImageRasterizer {
    png: PngConfig,
    decoded: RefCell<Option<(PathBuf, Rc<RgbaImage>)>>,
}

impl ImageRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn load(&self, source: &Path) -> Result<Rc<RgbaImage>, RasterError> {
        if let Some((path, image)) = self.decoded.borrow().as_ref() {
            if path == source {
                return Ok(Rc::clone(image));
            }
        }

        let bytes = std::fs::read(source).map_err(|e| RasterError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
        let image = image::load_from_memory(&bytes)
            .map_err(|e| RasterError::Decode {
                path: source.to_path_buf(),
                source: e,
            })?
            .to_rgba8();

        let image = Rc::new(image);
        *self.decoded.borrow_mut() = Some((source.to_path_buf(), Rc::clone(&image)));
        Ok(image)
    }
}

impl Rasterizer for ImageRasterizer {
    fn render(&self, source: &Path, request: &RenderRequest) -> Result<Vec<u8>, RasterError> {
        if request.width == 0 || request.height == 0 {
            return Err(RasterError::InvalidSize {
                name: request.name.clone(),
                width: request.width,
                height: request.height,
            });
        }

        let image = self.load(source)?;
        let mut canvas = match request.resize_mode {
            ResizeMode::Cover => cover(&image, request.width, request.height),
            ResizeMode::Contain => contain(
                &image,
                request.width,
                request.height,
                request.background_color,
            ),
        };

        if request.remove_transparency {
            flatten(&mut canvas, request.background_color);
            let rgb: Vec<u8> = canvas
                .pixels()
                .flat_map(|p| [p[0], p[1], p[2]])
                .collect();
            Ok(encode_rgb(&rgb, canvas.width(), canvas.height(), &self.png)?)
        } else {
            Ok(encode_rgba(
                canvas.as_raw(),
                canvas.width(),
                canvas.height(),
                &self.png,
            )?)
        }
    }
}

/// Center-crops the source to the target's aspect ratio, then scales to fill.
///
/// Cropping first keeps memory bounded by the source size however extreme its
/// aspect ratio is.
pub fn cover(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (src_w, src_h) = image.dimensions();
    let (crop_w, crop_h) = cover_window(src_w, src_h, width, height);
    let x = (src_w - crop_w) / 2;
    let y = (src_h - crop_h) / 2;

    let window = imageops::crop_imm(image, x, y, crop_w, crop_h).to_image();
    imageops::resize(&window, width, height, FILTER)
}

/// Largest `width:height` window that fits in the source, at least 1x1.
fn cover_window(src_w: u32, src_h: u32, width: u32, height: u32) -> (u32, u32) {
    let (src_w64, src_h64) = (src_w as u64, src_h as u64);
    let (w64, h64) = (width as u64, height as u64);
    if src_w64 * h64 > src_h64 * w64 {
        // Wider than the target: trim the sides.
        let crop_w = (src_h64 * w64 + h64 / 2) / h64;
        (crop_w.clamp(1, src_w64) as u32, src_h)
    } else {
        // Taller (or equal): trim top and bottom.
        let crop_h = (src_w64 * h64 + w64 / 2) / w64;
        (src_w, crop_h.clamp(1, src_h64) as u32)
    }
}

/// Scales so the image fits inside the target and centers it on the background.
pub fn contain(image: &RgbaImage, width: u32, height: u32, background: Rgba8) -> RgbaImage {
    let (src_w, src_h) = image.dimensions();
    let ratio = f64::min(
        width as f64 / src_w as f64,
        height as f64 / src_h as f64,
    );
    let scaled_w = ((src_w as f64 * ratio).round() as u32).clamp(1, width);
    let scaled_h = ((src_h as f64 * ratio).round() as u32).clamp(1, height);

    let resized = imageops::resize(image, scaled_w, scaled_h, FILTER);
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba(background.to_array()));
    let x = ((width - scaled_w) / 2) as i64;
    let y = ((height - scaled_h) / 2) as i64;
    imageops::replace(&mut canvas, &resized, x, y);
    canvas
}

/// Composites every pixel over an opaque version of `background`.
pub fn flatten(image: &mut RgbaImage, background: Rgba8) {
    let bg = [background.r, background.g, background.b];
    for pixel in image.pixels_mut() {
        let alpha = pixel[3] as u32;
        for c in 0..3 {
            let blended = (pixel[c] as u32 * alpha + bg[c] as u32 * (255 - alpha) + 127) / 255;
            pixel[c] = blended as u8;
        }
        pixel[3] = 255;
    }
}
