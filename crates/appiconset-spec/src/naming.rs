//! Filename derivation for generated icons.
//!
//! The filename is the dedup key within a run: two entries that resolve to the
//! same name share one rendered file.

use crate::catalog::{IconRequirement, IconSetKind};
use crate::idiom::{Idiom, Scale};
use crate::size::IconSize;

/// Fixed name of the standard App Store artwork, whatever its declared scale.
pub const MARKETING_ARTWORK_NAME: &str = "ItunesArtwork@2x.png";

/// `App-Icon-{W}x{H}@{scale}x.png`, used by standard and watch icons.
pub fn apple_icon_name(size: IconSize, scale: Scale) -> String {
    format!("App-Icon-{}@{}x.png", size, scale.factor())
}

/// `icon-{W}x{H}@{scale}x.png`; marketing artwork at 1x drops the scale suffix.
pub fn imessage_icon_name(size: IconSize, scale: Scale, idiom: Idiom) -> String {
    if idiom.is_marketing() && scale == Scale::X1 {
        format!("icon-{}.png", size)
    } else {
        format!("icon-{}@{}x.png", size, scale.factor())
    }
}

/// Filename for one (requirement, scale) pair of the given kind.
pub fn icon_filename(kind: IconSetKind, requirement: &IconRequirement, scale: Scale) -> String {
    match kind {
        IconSetKind::Standard if requirement.idiom.is_marketing() => {
            MARKETING_ARTWORK_NAME.to_string()
        }
        IconSetKind::Standard | IconSetKind::Watch => apple_icon_name(requirement.size, scale),
        IconSetKind::Imessage => imessage_icon_name(requirement.size, scale, requirement.idiom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{IMESSAGE_ICONS, STANDARD_ICONS, WATCH_ICONS};

    #[test]
    fn test_apple_icon_name() {
        assert_eq!(
            apple_icon_name(IconSize::square(20.0), Scale::X2),
            "App-Icon-20x20@2x.png"
        );
        assert_eq!(
            apple_icon_name(IconSize::square(83.5), Scale::X2),
            "App-Icon-83.5x83.5@2x.png"
        );
    }

    #[test]
    fn test_imessage_icon_name() {
        assert_eq!(
            imessage_icon_name(IconSize::new(60.0, 45.0), Scale::X3, Idiom::Universal),
            "icon-60x45@3x.png"
        );
        assert_eq!(
            imessage_icon_name(IconSize::new(1024.0, 768.0), Scale::X1, Idiom::Universal),
            "icon-1024x768@1x.png"
        );
        assert_eq!(
            imessage_icon_name(IconSize::new(1024.0, 768.0), Scale::X1, Idiom::IosMarketing),
            "icon-1024x768.png"
        );
    }

    #[test]
    fn test_standard_marketing_uses_fixed_name() {
        let marketing = STANDARD_ICONS
            .iter()
            .find(|r| r.idiom == Idiom::IosMarketing)
            .unwrap();
        assert_eq!(
            icon_filename(IconSetKind::Standard, marketing, Scale::X1),
            MARKETING_ARTWORK_NAME
        );
    }

    #[test]
    fn test_kind_specific_rules() {
        assert_eq!(
            icon_filename(IconSetKind::Watch, &WATCH_ICONS[0], Scale::X1),
            "App-Icon-1024x1024@1x.png"
        );
        assert_eq!(
            icon_filename(IconSetKind::Imessage, &IMESSAGE_ICONS[7], Scale::X1),
            "icon-1024x1024.png"
        );
    }
}
