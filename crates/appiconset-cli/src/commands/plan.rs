//! Plan command implementation
//!
//! Prints the renders and manifest entries a generate run would produce,
//! without reading the source icon or touching the filesystem.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use appiconset_spec::{plan_icon_set, ExtensionType, IconSetPlan};

/// Run the plan command
///
/// # Arguments
/// * `extension_type` - Extension type name
/// * `transparent` - Plan with transparency kept where Apple allows it
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(extension_type: &str, transparent: bool, json_output: bool) -> Result<ExitCode> {
    let extension_type = extension_type.parse::<ExtensionType>()?;
    let plan = plan_icon_set(extension_type.icon_set_kind(), transparent);

    if json_output {
        let json = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
        println!("{}", json);
    } else {
        print_plan(extension_type, &plan);
    }

    Ok(ExitCode::SUCCESS)
}

fn print_plan(extension_type: ExtensionType, plan: &IconSetPlan) {
    println!(
        "{} {} ({})",
        "Plan for:".cyan().bold(),
        extension_type,
        plan.kind
    );

    println!("\n{} ({})", "Renders".bold(), plan.renders.len());
    for task in &plan.renders {
        let transparency = if task.options.remove_transparency {
            "opaque".normal()
        } else {
            "alpha".yellow()
        };
        println!(
            "  {} {}x{} {} {} {}",
            task.filename,
            task.pixel_width,
            task.pixel_height,
            task.options.resize_mode.to_string().dimmed(),
            transparency,
            task.options.background_color.to_hex().dimmed()
        );
    }

    println!(
        "\n{} ({}, {} reuse an earlier render)",
        "Manifest entries".bold(),
        plan.entries.len(),
        plan.reused_count()
    );
    for entry in &plan.entries {
        let mut line = format!("  {:<14} {:<12}", entry.idiom.as_str(), entry.size);
        if let Some(scale) = &entry.scale {
            line.push_str(&format!(" {:<3}", scale));
        }
        if let Some(platform) = entry.platform {
            line.push_str(&format!(" [{}]", platform));
        }
        println!("{} -> {}", line, entry.filename);
    }
}
