//! appiconset CLI - Command-line interface for iOS app icon sets
//!
//! This binary renders app icon sets for Xcode extension targets and writes
//! their `Contents.json` manifests.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use appiconset_cli::commands;

/// appiconset - iOS App Icon Set Generator
#[derive(Parser)]
#[command(name = "appiconset")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an icon set and write its Contents.json
    Generate {
        /// Path to the source icon (relative to the project root or absolute)
        #[arg(short, long)]
        icon: Option<String>,

        /// Extension type (widget, imessage, watch, clip, ...)
        #[arg(short = 't', long = "type")]
        extension_type: Option<String>,

        /// Target directory relative to the project root
        #[arg(short, long)]
        cwd: Option<String>,

        /// Targets file listing several extension targets
        #[arg(long, conflicts_with_all = ["icon", "extension_type", "cwd"])]
        config: Option<String>,

        /// Project root directory (default: current directory)
        #[arg(short, long)]
        project_root: Option<String>,

        /// Keep the icon's transparency where Apple allows it
        #[arg(long)]
        transparent: bool,

        /// Output machine-readable JSON report
        #[arg(long)]
        json: bool,
    },

    /// Show the renders and manifest entries for an extension type
    Plan {
        /// Extension type (widget, imessage, watch, clip, ...)
        #[arg(short = 't', long = "type", default_value = "widget")]
        extension_type: String,

        /// Plan with transparency kept where Apple allows it
        #[arg(long)]
        transparent: bool,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the render cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand)]
enum CacheCommands {
    /// Remove every cached render
    Clear {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        project_root: String,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Show cached renders per target namespace
    Info {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        project_root: String,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            icon,
            extension_type,
            cwd,
            config,
            project_root,
            transparent,
            json,
        } => commands::generate::run(
            icon.as_deref(),
            extension_type.as_deref(),
            cwd.as_deref(),
            config.as_deref(),
            project_root.as_deref(),
            transparent,
            json,
        ),
        Commands::Plan {
            extension_type,
            transparent,
            json,
        } => commands::plan::run(&extension_type, transparent, json),
        Commands::Cache { command } => match command {
            CacheCommands::Clear { project_root, json } => {
                commands::cache::clear(&project_root, json)
            }
            CacheCommands::Info { project_root, json } => commands::cache::info(&project_root, json),
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
