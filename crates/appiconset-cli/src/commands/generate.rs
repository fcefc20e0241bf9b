//! Generate command implementation
//!
//! Generates the icon set and `Contents.json` for one target given on the
//! command line, or for every target in a targets file.

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use appiconset_spec::ExtensionType;

use crate::config::{load_targets, TargetConfig, TargetsFile};
use crate::generate::{with_ios_icon, FileStatus, GeneratedIconSet};

/// Extension type used when `--type` is omitted.
pub const DEFAULT_EXTENSION_TYPE: &str = "widget";

/// Run the generate command
///
/// # Arguments
/// * `icon` - Source icon path (required unless `config` is given)
/// * `extension_type` - Extension type name (default: widget)
/// * `cwd` - Target directory relative to the project root (required unless `config` is given)
/// * `config` - Optional targets file; overrides the single-target flags
/// * `project_root` - Project root directory (default: current directory)
/// * `transparent` - Keep the icon's alpha channel where Apple allows it
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 generation error
#[allow(clippy::too_many_arguments)]
pub fn run(
    icon: Option<&str>,
    extension_type: Option<&str>,
    cwd: Option<&str>,
    config: Option<&str>,
    project_root: Option<&str>,
    transparent: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let project_root = PathBuf::from(project_root.unwrap_or("."));
    let targets = resolve_targets(icon, extension_type, cwd, config, transparent);

    match (targets, json_output) {
        (Ok(targets), true) => run_json(&project_root, &targets),
        (Ok(targets), false) => run_human(&project_root, &targets),
        (Err(e), true) => {
            print_json_report(&project_root, &[], Some(format!("{:#}", e)))?;
            Ok(ExitCode::from(1))
        }
        (Err(e), false) => Err(e),
    }
}

/// Builds the target list from a config file or the single-target flags.
pub fn resolve_targets(
    icon: Option<&str>,
    extension_type: Option<&str>,
    cwd: Option<&str>,
    config: Option<&str>,
    transparent: bool,
) -> Result<Vec<TargetConfig>> {
    if let Some(config) = config {
        return load_targets(Path::new(config))
            .with_context(|| format!("Failed to load targets file: {}", config));
    }

    let icon = icon.ok_or_else(|| anyhow!("--icon is required unless --config is given"))?;
    let cwd = cwd.ok_or_else(|| anyhow!("--cwd is required unless --config is given"))?;
    let extension_type = extension_type
        .unwrap_or(DEFAULT_EXTENSION_TYPE)
        .parse::<ExtensionType>()?;

    let file = TargetsFile {
        targets: vec![TargetConfig {
            extension_type,
            cwd: cwd.to_string(),
            icon: icon.to_string(),
            is_transparent: transparent,
        }],
    };
    file.validate()?;
    Ok(file.targets)
}

fn run_human(project_root: &Path, targets: &[TargetConfig]) -> Result<ExitCode> {
    println!("{} {}", "Project root:".cyan().bold(), project_root.display());

    for target in targets {
        println!(
            "\n{} {} ({}, {})",
            "Target:".cyan().bold(),
            target.cwd,
            target.extension_type,
            target.extension_type.icon_set_kind()
        );
        println!("  {} {}", "Icon:".dimmed(), target.icon);
        if target.is_transparent {
            println!("  {} {}", "Transparency:".dimmed(), "kept".yellow());
        }

        let start = Instant::now();
        let result = with_ios_icon(target.extension_type, &target.to_job(project_root))
            .with_context(|| format!("Failed to generate icons for target: {}", target.cwd))?;

        print_files(&result);
        println!(
            "  {} {} rendered, {} reused, {} entries ({:.2}s)",
            "SUCCESS".green().bold(),
            result.rendered_count(),
            result.reused_count(),
            result.entries.len(),
            start.elapsed().as_secs_f64()
        );
        if let Some(path) = &result.manifest_path {
            println!("  {} {}", "Manifest:".dimmed(), path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_files(result: &GeneratedIconSet) {
    for file in &result.files {
        match file.status {
            FileStatus::Rendered => println!(
                "  {} {} ({}x{})",
                "+".green(),
                file.filename,
                file.width,
                file.height
            ),
            FileStatus::Reused => println!(
                "  {} {} {}",
                "=".dimmed(),
                file.filename,
                "(reused)".dimmed()
            ),
        }
    }
}

/// Per-target entry of the JSON report.
#[derive(Debug, Serialize)]
pub struct TargetReport {
    pub target: TargetConfig,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GeneratedIconSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

fn run_json(project_root: &Path, targets: &[TargetConfig]) -> Result<ExitCode> {
    let mut reports = Vec::new();
    let mut failed = false;

    for target in targets {
        let start = Instant::now();
        let outcome = with_ios_icon(target.extension_type, &target.to_job(project_root));
        let duration_ms = start.elapsed().as_millis() as u64;

        let report = match outcome {
            Ok(result) => TargetReport {
                target: target.clone(),
                ok: true,
                result: Some(result),
                error: None,
                duration_ms,
            },
            Err(e) => {
                failed = true;
                TargetReport {
                    target: target.clone(),
                    ok: false,
                    result: None,
                    error: Some(format!("{:#}", anyhow::Error::new(e))),
                    duration_ms,
                }
            }
        };
        reports.push(report);

        if failed {
            break;
        }
    }

    print_json_report(project_root, &reports, None)?;

    Ok(if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

/// The `--json` report. `error` is set when no target could be loaded.
pub fn json_report(
    project_root: &Path,
    reports: &[TargetReport],
    error: Option<String>,
) -> serde_json::Value {
    let ok = error.is_none() && reports.iter().all(|r| r.ok);
    let mut report = serde_json::json!({
        "ok": ok,
        "project_root": project_root,
        "targets": reports,
    });
    if let Some(error) = error {
        report["error"] = serde_json::Value::String(error);
    }
    report
}

fn print_json_report(
    project_root: &Path,
    reports: &[TargetReport],
    error: Option<String>,
) -> Result<()> {
    let report = json_report(project_root, reports, error);
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}
