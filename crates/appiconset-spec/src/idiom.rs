//! Apple device idioms, platform tags, and scale factors.

use serde::{Deserialize, Serialize};

/// Device-class role an icon variant serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Idiom {
    /// iPhone home screen, settings, and spotlight icons.
    #[serde(rename = "iphone")]
    Iphone,
    /// iPad home screen, settings, and spotlight icons.
    #[serde(rename = "ipad")]
    Ipad,
    /// App Store artwork.
    #[serde(rename = "ios-marketing")]
    IosMarketing,
    /// Single-size icons shared across devices.
    #[serde(rename = "universal")]
    Universal,
}

impl Idiom {
    /// Returns the `Contents.json` spelling of this idiom.
    pub fn as_str(&self) -> &'static str {
        match self {
            Idiom::Iphone => "iphone",
            Idiom::Ipad => "ipad",
            Idiom::IosMarketing => "ios-marketing",
            Idiom::Universal => "universal",
        }
    }

    /// Whether this idiom is App Store artwork.
    pub fn is_marketing(&self) -> bool {
        matches!(self, Idiom::IosMarketing)
    }
}

impl std::fmt::Display for Idiom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional platform tag attached to a manifest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Watchos,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Watchos => "watchos",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display density multiplier converting points to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scale {
    X1,
    X2,
    X3,
}

impl Scale {
    /// Returns the integer multiplier.
    pub const fn factor(&self) -> u32 {
        match self {
            Scale::X1 => 1,
            Scale::X2 => 2,
            Scale::X3 => 3,
        }
    }

    /// Returns the `Contents.json` spelling, e.g. `"2x"`.
    pub fn label(&self) -> String {
        format!("{}x", self.factor())
    }
}

impl std::fmt::Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", self.factor())
    }
}
