//! appiconset catalog library
//!
//! This crate holds the pure, I/O-free half of icon-set generation: Apple's
//! required idiom/size/scale matrix for each icon-set kind, the filename rules
//! that double as the dedup key, the render parameter policy, and the
//! `Contents.json` manifest types.
//!
//! # Example
//!
//! ```
//! use appiconset_spec::{plan_icon_set, ExtensionType};
//!
//! let kind = "widget".parse::<ExtensionType>().unwrap().icon_set_kind();
//! let plan = plan_icon_set(kind, false);
//!
//! // 19 manifest entries backed by 15 distinct files.
//! assert_eq!(plan.entries.len(), 19);
//! assert_eq!(plan.renders.len(), 15);
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: static requirement tables, icon-set kinds, extension types
//! - [`idiom`]: idioms, platform tags, scale factors
//! - [`size`]: logical sizes in points
//! - [`naming`]: filename derivation
//! - [`render`]: resize mode, transparency, and background policy
//! - [`manifest`]: `Contents.json` document types
//! - [`plan`]: expansion of tables into render tasks and manifest entries

pub mod catalog;
pub mod error;
pub mod idiom;
pub mod manifest;
pub mod naming;
pub mod plan;
pub mod render;
pub mod size;

pub use catalog::{
    ExtensionType, IconRequirement, IconSetKind, APP_ICON_SET_PATH, IMAGE_CACHE_NAME,
    IMESSAGE_ICONS, STANDARD_ICONS, WATCH_ICONS,
};
pub use error::SpecError;
pub use idiom::{Idiom, Platform, Scale};
pub use manifest::{ContentsInfo, ContentsJson, ManifestEntry, CONTENTS_JSON};
pub use naming::{apple_icon_name, icon_filename, imessage_icon_name, MARKETING_ARTWORK_NAME};
pub use plan::{icon_slots, plan_icon_set, IconSetPlan, IconSlot, RenderTask};
pub use render::{render_options, requires_opaque, RenderOptions, ResizeMode, Rgba8};
pub use size::IconSize;
