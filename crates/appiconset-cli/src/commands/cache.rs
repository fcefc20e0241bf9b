//! `cache info` and `cache clear`

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use crate::cache;

/// Delete every target's cached renders under `project_root`.
pub fn clear(project_root: &str, json_output: bool) -> Result<ExitCode> {
    let removed = cache::clear(Path::new(project_root))?;

    if json_output {
        let json = serde_json::to_string_pretty(&serde_json::json!({ "removed": removed }))
            .context("Failed to serialize cache report")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    if removed.is_empty() {
        println!("{} nothing cached under {}", "Render cache:".cyan().bold(), project_root);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Render cache cleared".cyan().bold());
    for name in &removed {
        println!("  {} {}", "-".red(), name);
    }
    println!("  {} target(s) will re-render on the next run", removed.len());

    Ok(ExitCode::SUCCESS)
}

/// Report cached renders per target namespace.
pub fn info(project_root: &str, json_output: bool) -> Result<ExitCode> {
    let info = cache::info(Path::new(project_root))?;

    if json_output {
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize cache report")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Render cache:".cyan().bold(), info.cache_dir.display());
    for ns in &info.namespaces {
        println!(
            "  {:<40} {:>4} {} {:>10}",
            ns.name,
            ns.entry_count,
            "png".dimmed(),
            format_size(ns.size_bytes)
        );
    }
    println!(
        "  {} {} renders in {} namespace(s), {}",
        "total".bold(),
        info.entry_count,
        info.namespace_count,
        format_size(info.total_size_bytes)
    );

    Ok(ExitCode::SUCCESS)
}

/// Human size with one binary unit step: `512 B`, `1.5 KiB`, `3.20 MiB`.
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{} B", bytes)
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.2} MiB", b / (KIB * KIB))
    }
}
