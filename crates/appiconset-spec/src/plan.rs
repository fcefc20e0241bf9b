//! Expansion of catalog tables into concrete icon slots.
//!
//! A slot pairs the manifest entry for one (requirement, scale) combination with
//! the render task that produces its file. Slots are yielded in table order, which
//! is the order entries appear in `Contents.json`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::catalog::IconSetKind;
use crate::manifest::ManifestEntry;
use crate::naming::icon_filename;
use crate::render::{render_options, RenderOptions};

/// A single image to rasterize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderTask {
    /// Output filename; unique key for dedup within a run.
    pub filename: String,
    pub pixel_width: u32,
    pub pixel_height: u32,
    #[serde(flatten)]
    pub options: RenderOptions,
}

/// One manifest entry and the render task backing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSlot {
    pub entry: ManifestEntry,
    pub task: RenderTask,
}

/// Expands the kind's table into one slot per (requirement, scale) pair.
pub fn icon_slots(kind: IconSetKind, is_transparent: bool) -> Vec<IconSlot> {
    let mut slots = Vec::new();

    for requirement in kind.requirements() {
        let options = render_options(kind, requirement, is_transparent);

        for &scale in requirement.scales {
            let filename = icon_filename(kind, requirement, scale);
            let (pixel_width, pixel_height) = requirement.size.pixels(scale);

            slots.push(IconSlot {
                entry: ManifestEntry {
                    filename: filename.clone(),
                    idiom: requirement.idiom,
                    platform: requirement.platform,
                    scale: kind.records_scale().then(|| scale.label()),
                    size: requirement.size.to_string(),
                },
                task: RenderTask {
                    filename,
                    pixel_width,
                    pixel_height,
                    options,
                },
            });
        }
    }

    slots
}

/// Everything a run will render and record, computed without any I/O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSetPlan {
    pub kind: IconSetKind,
    /// Unique render tasks, in first-use order.
    pub renders: Vec<RenderTask>,
    /// Every manifest entry, in table order.
    pub entries: Vec<ManifestEntry>,
}

impl IconSetPlan {
    /// Number of entries that reuse a file rendered for an earlier entry.
    pub fn reused_count(&self) -> usize {
        self.entries.len() - self.renders.len()
    }
}

/// Plans a run: unique render tasks plus the full manifest entry list.
pub fn plan_icon_set(kind: IconSetKind, is_transparent: bool) -> IconSetPlan {
    let mut seen = HashSet::new();
    let mut renders = Vec::new();
    let mut entries = Vec::new();

    for slot in icon_slots(kind, is_transparent) {
        if seen.insert(slot.task.filename.clone()) {
            renders.push(slot.task);
        }
        entries.push(slot.entry);
    }

    IconSetPlan {
        kind,
        renders,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idiom::{Idiom, Platform};
    use crate::naming::MARKETING_ARTWORK_NAME;
    use crate::render::{ResizeMode, Rgba8};
    use pretty_assertions::assert_eq;

    fn find<'a>(plan: &'a IconSetPlan, filename: &str) -> &'a RenderTask {
        plan.renders
            .iter()
            .find(|t| t.filename == filename)
            .unwrap_or_else(|| panic!("no render task for {}", filename))
    }

    #[test]
    fn test_standard_plan_dedups_shared_sizes() {
        let plan = plan_icon_set(IconSetKind::Standard, false);
        assert_eq!(plan.entries.len(), 19);
        assert_eq!(plan.renders.len(), 15);
        assert_eq!(plan.reused_count(), 4);

        let unique: HashSet<_> = plan.entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(unique.len(), plan.renders.len());
    }

    #[test]
    fn test_standard_phone_20_at_2x() {
        let plan = plan_icon_set(IconSetKind::Standard, false);
        let task = find(&plan, "App-Icon-20x20@2x.png");
        assert_eq!((task.pixel_width, task.pixel_height), (40, 40));
        assert_eq!(task.options.resize_mode, ResizeMode::Cover);

        let first = &plan.entries[0];
        assert_eq!(first.idiom, Idiom::Iphone);
        assert_eq!(first.size, "20x20");
        assert_eq!(first.scale.as_deref(), Some("2x"));
        assert_eq!(first.platform, None);
    }

    #[test]
    fn test_standard_marketing_entry() {
        let plan = plan_icon_set(IconSetKind::Standard, false);
        let entry = plan.entries.last().unwrap();
        assert_eq!(entry.idiom, Idiom::IosMarketing);
        assert_eq!(entry.filename, MARKETING_ARTWORK_NAME);
        assert_eq!(entry.scale.as_deref(), Some("1x"));
        assert_eq!(entry.size, "1024x1024");

        let task = find(&plan, MARKETING_ARTWORK_NAME);
        assert_eq!((task.pixel_width, task.pixel_height), (1024, 1024));
    }

    #[test]
    fn test_standard_ipad_pro_fractional_size() {
        let plan = plan_icon_set(IconSetKind::Standard, false);
        let task = find(&plan, "App-Icon-83.5x83.5@2x.png");
        assert_eq!((task.pixel_width, task.pixel_height), (167, 167));
    }

    #[test]
    fn test_imessage_plan() {
        let plan = plan_icon_set(IconSetKind::Imessage, true);
        assert_eq!(plan.entries.len(), 11);
        assert_eq!(plan.renders.len(), 11);
        assert!(plan
            .entries
            .iter()
            .all(|e| e.platform == Some(Platform::Ios)));

        let glyph = find(&plan, "icon-60x45@3x.png");
        assert_eq!((glyph.pixel_width, glyph.pixel_height), (180, 135));
        assert_eq!(glyph.options.resize_mode, ResizeMode::Contain);
        assert!(!glyph.options.remove_transparency);

        let marketing = find(&plan, "icon-1024x768.png");
        assert_eq!((marketing.pixel_width, marketing.pixel_height), (1024, 768));
        assert!(marketing.options.remove_transparency);
        assert_eq!(marketing.options.background_color, Rgba8::WHITE);
    }

    #[test]
    fn test_watch_plan() {
        let plan = plan_icon_set(IconSetKind::Watch, false);
        assert_eq!(
            plan.entries,
            vec![ManifestEntry {
                filename: "App-Icon-1024x1024@1x.png".to_string(),
                idiom: Idiom::Universal,
                platform: Some(Platform::Watchos),
                scale: None,
                size: "1024x1024".to_string(),
            }]
        );
        assert_eq!(plan.renders.len(), 1);
        assert_eq!(plan.renders[0].options.resize_mode, ResizeMode::Cover);
    }

    #[test]
    fn test_plan_is_deterministic() {
        assert_eq!(
            plan_icon_set(IconSetKind::Standard, true),
            plan_icon_set(IconSetKind::Standard, true)
        );
    }

    #[test]
    fn test_render_task_serializes_flat() {
        let plan = plan_icon_set(IconSetKind::Watch, true);
        let json = serde_json::to_value(&plan.renders[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "filename": "App-Icon-1024x1024@1x.png",
                "pixel_width": 1024,
                "pixel_height": 1024,
                "resize_mode": "cover",
                "remove_transparency": false,
                "background_color": "#ffffff00"
            })
        );
    }
}
