//! appiconset CLI library.
//!
//! Writes iOS app icon sets into Xcode asset catalogs: renders every size an
//! extension target needs from one source icon, then writes `Contents.json`.
//! The [`generate`] module is usable without the binary, with any
//! [`Rasterizer`](appiconset_backend_raster::Rasterizer).

pub mod cache;
pub mod commands;
pub mod config;
pub mod generate;
pub mod manifest;
