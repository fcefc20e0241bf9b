//! Integration tests for the `image`-backed rasterizer.

use std::path::{Path, PathBuf};

use appiconset_backend_raster::png::encode_rgba;
use appiconset_backend_raster::{
    CachedRasterizer, ImageRasterizer, PngConfig, RasterError, RenderRequest, Rasterizer,
};
use appiconset_spec::{ResizeMode, Rgba8};
use image::{ColorType, GenericImageView};
use tempfile::TempDir;

/// Writes a `size`x`size` source: opaque red with a fully transparent top-left quadrant.
fn write_source(dir: &Path, size: u32) -> PathBuf {
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            if x < size / 2 && y < size / 2 {
                data.extend_from_slice(&[0, 0, 0, 0]);
            } else {
                data.extend_from_slice(&[255, 0, 0, 255]);
            }
        }
    }
    let png = encode_rgba(&data, size, size, &PngConfig::default()).unwrap();
    let path = dir.join("icon.png");
    std::fs::write(&path, png).unwrap();
    path
}

fn request(width: u32, height: u32, mode: ResizeMode, remove_transparency: bool) -> RenderRequest {
    RenderRequest {
        name: format!("test-{}x{}.png", width, height),
        width,
        height,
        resize_mode: mode,
        remove_transparency,
        background_color: if remove_transparency {
            Rgba8::WHITE
        } else {
            Rgba8::TRANSPARENT_WHITE
        },
        cache_namespace: "test".to_string(),
    }
}

#[test]
fn test_cover_output_dimensions_and_opaque_rgb() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(tmp.path(), 128);
    let rasterizer = ImageRasterizer::new();

    let bytes = rasterizer
        .render(&source, &request(40, 40, ResizeMode::Cover, true))
        .unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();

    assert_eq!(decoded.dimensions(), (40, 40));
    assert_eq!(decoded.color(), ColorType::Rgb8);
    // The transparent quadrant is flattened onto white.
    let corner = decoded.to_rgb8().get_pixel(2, 2).0;
    assert_eq!(corner, [255, 255, 255]);
}

#[test]
fn test_transparency_preserved_when_requested() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(tmp.path(), 128);
    let rasterizer = ImageRasterizer::new();

    let bytes = rasterizer
        .render(&source, &request(58, 58, ResizeMode::Cover, false))
        .unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();

    assert_eq!(decoded.color(), ColorType::Rgba8);
    let rgba = decoded.to_rgba8();
    assert_eq!(rgba.get_pixel(2, 2).0[3], 0);
    assert_eq!(rgba.get_pixel(55, 55).0[3], 255);
}

#[test]
fn test_contain_keeps_aspect_for_landscape_glyph() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(tmp.path(), 128);
    let rasterizer = ImageRasterizer::new();

    let bytes = rasterizer
        .render(&source, &request(180, 135, ResizeMode::Contain, true))
        .unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();

    assert_eq!(decoded.dimensions(), (180, 135));
    // Letterbox bars on the left and right edges are background white.
    assert_eq!(decoded.get_pixel(0, 100).0, [255, 255, 255]);
    assert_eq!(decoded.get_pixel(179, 100).0, [255, 255, 255]);
    // Bottom-right of the glyph is red.
    let red = decoded.get_pixel(140, 120).0;
    assert!(red[0] > 250 && red[1] < 5 && red[2] < 5, "{:?}", red);
}

#[test]
fn test_render_is_deterministic() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(tmp.path(), 64);
    let req = request(87, 87, ResizeMode::Cover, true);

    let a = ImageRasterizer::new().render(&source, &req).unwrap();
    let b = ImageRasterizer::new().render(&source, &req).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_missing_source() {
    let tmp = TempDir::new().unwrap();
    let err = ImageRasterizer::new()
        .render(
            &tmp.path().join("nope.png"),
            &request(40, 40, ResizeMode::Cover, true),
        )
        .unwrap_err();
    assert!(matches!(err, RasterError::Io { .. }));
}

#[test]
fn test_undecodable_source() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("icon.png");
    std::fs::write(&source, b"definitely not a png").unwrap();

    let err = ImageRasterizer::new()
        .render(&source, &request(40, 40, ResizeMode::Cover, true))
        .unwrap_err();
    assert!(matches!(err, RasterError::Decode { .. }));
}

#[test]
fn test_zero_size_request() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(tmp.path(), 16);
    let err = ImageRasterizer::new()
        .render(&source, &request(0, 10, ResizeMode::Cover, true))
        .unwrap_err();
    assert!(matches!(err, RasterError::InvalidSize { .. }));
}

#[test]
fn test_cached_rasterizer_matches_uncached_output() {
    let tmp = TempDir::new().unwrap();
    let source = write_source(tmp.path(), 64);
    let req = request(120, 120, ResizeMode::Cover, false);

    let direct = ImageRasterizer::new().render(&source, &req).unwrap();
    let cached = CachedRasterizer::new(ImageRasterizer::new(), tmp.path().join("cache"));
    let first = cached.render(&source, &req).unwrap();
    let second = cached.render(&source, &req).unwrap();

    assert_eq!(direct, first);
    assert_eq!(first, second);
    assert!(tmp.path().join("cache").join("test").is_dir());
}
