//! Render parameter policy: resize strategy, transparency, and background color.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::catalog::{IconRequirement, IconSetKind};
use crate::error::SpecError;
use crate::size::IconSize;

/// How the source is fitted into the target dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Scale to fill, cropping whatever overflows.
    Cover,
    /// Scale to fit, letterboxing with the background color.
    Contain,
}

impl ResizeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeMode::Cover => "cover",
            ResizeMode::Contain => "contain",
        }
    }
}

impl std::fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 8-bit RGBA color, serialized as `#rrggbb` (opaque) or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white, `#ffffff`.
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);
    /// Zero-alpha white, `#ffffff00`.
    pub const TRANSPARENT_WHITE: Rgba8 = Rgba8::new(255, 255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Hex form; the alpha byte is only written when the color is not opaque.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl std::fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba8 {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SpecError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Rgba8::new(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl From<Rgba8> for String {
    fn from(color: Rgba8) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = SpecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Rendering options for one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderOptions {
    pub resize_mode: ResizeMode,
    /// Flatten onto the background and drop the alpha channel.
    pub remove_transparency: bool,
    pub background_color: Rgba8,
}

impl RenderOptions {
    /// Caller-controlled transparency: opaque white unless transparency is requested.
    pub fn with_transparency(resize_mode: ResizeMode, is_transparent: bool) -> Self {
        Self {
            resize_mode,
            remove_transparency: !is_transparent,
            background_color: if is_transparent {
                Rgba8::TRANSPARENT_WHITE
            } else {
                Rgba8::WHITE
            },
        }
    }

    /// Always opaque white, ignoring the caller's preference.
    pub fn opaque(resize_mode: ResizeMode) -> Self {
        Self {
            resize_mode,
            remove_transparency: true,
            background_color: Rgba8::WHITE,
        }
    }
}

const IMESSAGE_APP_STORE_SIZE: IconSize = IconSize::new(1024.0, 768.0);

/// Whether Apple rejects transparency for this requirement.
///
/// Only iMessage enforces this here: its 1024x768 artwork (both idioms) and its
/// marketing entries must be fully opaque.
pub fn requires_opaque(kind: IconSetKind, requirement: &IconRequirement) -> bool {
    match kind {
        IconSetKind::Imessage => {
            requirement.size == IMESSAGE_APP_STORE_SIZE || requirement.idiom.is_marketing()
        }
        IconSetKind::Standard | IconSetKind::Watch => false,
    }
}

/// Render options for a requirement of the given kind.
pub fn render_options(
    kind: IconSetKind,
    requirement: &IconRequirement,
    is_transparent: bool,
) -> RenderOptions {
    let resize_mode = kind.resize_mode();
    if requires_opaque(kind, requirement) {
        RenderOptions::opaque(resize_mode)
    } else {
        RenderOptions::with_transparency(resize_mode, is_transparent)
    }
}
