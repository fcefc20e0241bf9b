//! Static icon catalog tables.
//!
//! Each icon-set kind has a fixed list of required (idiom, size, scales) records,
//! in the order their entries appear in `Contents.json`. The tables are hard-coded
//! rather than derived because Apple's matrix has no regular structure worth
//! computing.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SpecError;
use crate::idiom::{Idiom, Platform, Scale};
use crate::render::ResizeMode;
use crate::size::IconSize;

/// Asset-catalog image set directory, relative to the named project root.
pub const APP_ICON_SET_PATH: &str = "Assets.xcassets/AppIcon.appiconset";

/// Prefix of the rasterizer cache namespace; the target's cache component is appended.
pub const IMAGE_CACHE_NAME: &str = "widget-icons-";

/// One required icon: an idiom at a logical size, rendered at each listed scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconRequirement {
    pub idiom: Idiom,
    pub size: IconSize,
    pub scales: &'static [Scale],
    pub platform: Option<Platform>,
}

impl IconRequirement {
    const fn square(idiom: Idiom, side: f64, scales: &'static [Scale]) -> Self {
        Self {
            idiom,
            size: IconSize::square(side),
            scales,
            platform: None,
        }
    }

    const fn glyph(idiom: Idiom, width: f64, height: f64, scales: &'static [Scale]) -> Self {
        Self {
            idiom,
            size: IconSize::new(width, height),
            scales,
            platform: Some(Platform::Ios),
        }
    }
}

const X1: &[Scale] = &[Scale::X1];
const X2: &[Scale] = &[Scale::X2];
const X1_X2: &[Scale] = &[Scale::X1, Scale::X2];
const X2_X3: &[Scale] = &[Scale::X2, Scale::X3];
const X1_X2_X3: &[Scale] = &[Scale::X1, Scale::X2, Scale::X3];

/// Standard app icon: iPhone, iPad, and App Store artwork.
pub const STANDARD_ICONS: &[IconRequirement] = &[
    IconRequirement::square(Idiom::Iphone, 20.0, X2_X3),
    IconRequirement::square(Idiom::Iphone, 29.0, X1_X2_X3),
    IconRequirement::square(Idiom::Iphone, 40.0, X2_X3),
    IconRequirement::square(Idiom::Iphone, 60.0, X2_X3),
    // No iPhone 76x76@2x: current Xcode only asks for it under the ipad idiom.
    IconRequirement::square(Idiom::Ipad, 20.0, X1_X2),
    IconRequirement::square(Idiom::Ipad, 29.0, X1_X2),
    IconRequirement::square(Idiom::Ipad, 40.0, X1_X2),
    IconRequirement::square(Idiom::Ipad, 76.0, X1_X2),
    IconRequirement::square(Idiom::Ipad, 83.5, X2),
    IconRequirement::square(Idiom::IosMarketing, 1024.0, X1),
];

/// iMessage extension icon. The glyphs are landscape (width x height).
pub const IMESSAGE_ICONS: &[IconRequirement] = &[
    IconRequirement::glyph(Idiom::Universal, 60.0, 45.0, X2_X3),
    IconRequirement::glyph(Idiom::Universal, 67.0, 50.0, X2),
    IconRequirement::glyph(Idiom::Universal, 74.0, 55.0, X2),
    IconRequirement::glyph(Idiom::Universal, 27.0, 20.0, X2_X3),
    IconRequirement::glyph(Idiom::Universal, 32.0, 24.0, X2_X3),
    IconRequirement::glyph(Idiom::Universal, 1024.0, 768.0, X1),
    IconRequirement::glyph(Idiom::IosMarketing, 1024.0, 768.0, X1),
    IconRequirement::glyph(Idiom::IosMarketing, 1024.0, 1024.0, X1),
];

/// Watch app icon: a single universal 1024pt image.
pub const WATCH_ICONS: &[IconRequirement] = &[IconRequirement {
    idiom: Idiom::Universal,
    size: IconSize::square(1024.0),
    scales: X1,
    platform: Some(Platform::Watchos),
}];

/// Which generator variant (table, naming rule, and render policy) applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconSetKind {
    /// Standard app icon (every extension type that is not iMessage or watch).
    Standard,
    /// iMessage app extension icon.
    Imessage,
    /// watchOS app icon.
    Watch,
}

impl IconSetKind {
    /// The requirement table for this kind.
    pub fn requirements(&self) -> &'static [IconRequirement] {
        match self {
            IconSetKind::Standard => STANDARD_ICONS,
            IconSetKind::Imessage => IMESSAGE_ICONS,
            IconSetKind::Watch => WATCH_ICONS,
        }
    }

    /// Resize strategy used for every render of this kind.
    pub fn resize_mode(&self) -> ResizeMode {
        match self {
            // The icon should be square; a non-square source is cropped.
            IconSetKind::Standard | IconSetKind::Watch => ResizeMode::Cover,
            // Landscape glyphs keep the source aspect ratio.
            IconSetKind::Imessage => ResizeMode::Contain,
        }
    }

    /// Whether manifest entries carry a `scale` field.
    pub fn records_scale(&self) -> bool {
        !matches!(self, IconSetKind::Watch)
    }

    /// Image set directory relative to the named project root.
    pub fn asset_catalog_path(&self) -> &'static str {
        APP_ICON_SET_PATH
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IconSetKind::Standard => "standard",
            IconSetKind::Imessage => "imessage",
            IconSetKind::Watch => "watch",
        }
    }
}

impl std::fmt::Display for IconSetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Apple extension target type, as named in target configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtensionType {
    Widget,
    Clip,
    Imessage,
    Watch,
    Share,
    Action,
    Safari,
    NotificationContent,
    NotificationService,
    Intent,
    IntentUi,
    Spotlight,
    AppIntent,
    BgDownload,
    QuicklookThumbnail,
    CredentialsProvider,
    AccountAuth,
    DeviceActivityMonitor,
    LocationPush,
    NetworkPacketTunnel,
}

impl ExtensionType {
    /// Every known extension type, in declaration order.
    pub const ALL: &'static [ExtensionType] = &[
        ExtensionType::Widget,
        ExtensionType::Clip,
        ExtensionType::Imessage,
        ExtensionType::Watch,
        ExtensionType::Share,
        ExtensionType::Action,
        ExtensionType::Safari,
        ExtensionType::NotificationContent,
        ExtensionType::NotificationService,
        ExtensionType::Intent,
        ExtensionType::IntentUi,
        ExtensionType::Spotlight,
        ExtensionType::AppIntent,
        ExtensionType::BgDownload,
        ExtensionType::QuicklookThumbnail,
        ExtensionType::CredentialsProvider,
        ExtensionType::AccountAuth,
        ExtensionType::DeviceActivityMonitor,
        ExtensionType::LocationPush,
        ExtensionType::NetworkPacketTunnel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtensionType::Widget => "widget",
            ExtensionType::Clip => "clip",
            ExtensionType::Imessage => "imessage",
            ExtensionType::Watch => "watch",
            ExtensionType::Share => "share",
            ExtensionType::Action => "action",
            ExtensionType::Safari => "safari",
            ExtensionType::NotificationContent => "notification-content",
            ExtensionType::NotificationService => "notification-service",
            ExtensionType::Intent => "intent",
            ExtensionType::IntentUi => "intent-ui",
            ExtensionType::Spotlight => "spotlight",
            ExtensionType::AppIntent => "app-intent",
            ExtensionType::BgDownload => "bg-download",
            ExtensionType::QuicklookThumbnail => "quicklook-thumbnail",
            ExtensionType::CredentialsProvider => "credentials-provider",
            ExtensionType::AccountAuth => "account-auth",
            ExtensionType::DeviceActivityMonitor => "device-activity-monitor",
            ExtensionType::LocationPush => "location-push",
            ExtensionType::NetworkPacketTunnel => "network-packet-tunnel",
        }
    }

    /// Selects the generator variant for this target type.
    pub fn icon_set_kind(&self) -> IconSetKind {
        match self {
            ExtensionType::Watch => IconSetKind::Watch,
            ExtensionType::Imessage => IconSetKind::Imessage,
            _ => IconSetKind::Standard,
        }
    }
}

impl FromStr for ExtensionType {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExtensionType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SpecError::UnknownExtensionType(s.to_string()))
    }
}

impl std::fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_count(table: &[IconRequirement]) -> usize {
        table.iter().map(|r| r.scales.len()).sum()
    }

    #[test]
    fn test_table_entry_counts() {
        assert_eq!(entry_count(STANDARD_ICONS), 19);
        assert_eq!(entry_count(IMESSAGE_ICONS), 11);
        assert_eq!(entry_count(WATCH_ICONS), 1);
    }

    #[test]
    fn test_tables_are_well_formed() {
        for kind in [IconSetKind::Standard, IconSetKind::Imessage, IconSetKind::Watch] {
            for req in kind.requirements() {
                assert!(!req.scales.is_empty(), "{:?} has no scales", req);
                assert!(req.size.width > 0.0 && req.size.height > 0.0);
                assert!(
                    req.scales.windows(2).all(|w| w[0] < w[1]),
                    "scales must be strictly ascending: {:?}",
                    req
                );
            }
        }
    }

    #[test]
    fn test_standard_table_is_square_and_untagged() {
        assert!(STANDARD_ICONS
            .iter()
            .all(|r| r.size.width == r.size.height && r.platform.is_none()));
    }

    #[test]
    fn test_imessage_table_is_tagged_ios() {
        assert!(IMESSAGE_ICONS
            .iter()
            .all(|r| r.platform == Some(Platform::Ios)));
    }

    #[test]
    fn test_watch_table() {
        assert_eq!(WATCH_ICONS.len(), 1);
        let req = WATCH_ICONS[0];
        assert_eq!(req.idiom, Idiom::Universal);
        assert_eq!(req.size, IconSize::square(1024.0));
        assert_eq!(req.platform, Some(Platform::Watchos));
    }

    #[test]
    fn test_extension_type_kind_selection() {
        assert_eq!(ExtensionType::Watch.icon_set_kind(), IconSetKind::Watch);
        assert_eq!(ExtensionType::Imessage.icon_set_kind(), IconSetKind::Imessage);
        assert_eq!(ExtensionType::Widget.icon_set_kind(), IconSetKind::Standard);
        assert_eq!(ExtensionType::Clip.icon_set_kind(), IconSetKind::Standard);
    }

    #[test]
    fn test_extension_type_parse_roundtrip() {
        for ty in ExtensionType::ALL {
            assert_eq!(ty.as_str().parse::<ExtensionType>().unwrap(), *ty);
            let json = serde_json::to_string(ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
    }

    #[test]
    fn test_extension_type_unknown() {
        let err = "toaster".parse::<ExtensionType>().unwrap_err();
        assert_eq!(err, SpecError::UnknownExtensionType("toaster".to_string()));
    }

    #[test]
    fn test_resize_modes() {
        assert_eq!(IconSetKind::Standard.resize_mode(), ResizeMode::Cover);
        assert_eq!(IconSetKind::Watch.resize_mode(), ResizeMode::Cover);
        assert_eq!(IconSetKind::Imessage.resize_mode(), ResizeMode::Contain);
    }
}
