//! Xcscout CLI - inspect Xcode workspaces and projects from the shell.
//!
//! Points at a `.xcodeproj` or `.xcworkspace` bundle and reports its
//! schemes and native targets, or regenerates missing user schemes.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;
mod config;

use commands::{recreate, schemes, status, targets};
use config::Config;

/// Xcscout CLI - Xcode scheme and target inspection.
///
/// Every command takes a path to a `.xcodeproj` or `.xcworkspace`
/// bundle and detects which one it got. Workspace commands aggregate
/// over the member projects listed in the workspace descriptor.
#[derive(Parser, Debug)]
#[command(
    name = "xcs",
    author,
    version,
    about = "Xcscout: inspect Xcode schemes and targets",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the schemes of a project or workspace bundle.
    Schemes {
        /// Path to a .xcodeproj or .xcworkspace bundle.
        path: PathBuf,

        /// Scheme kinds to list: shared, user, or all.
        #[arg(short, long, default_value = "all")]
        kind: String,

        /// Inspect each scheme file for a test-bundle reference.
        #[arg(long)]
        with_tests: bool,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List the native targets of a project or workspace bundle,
    /// flagging targets that contain or represent tests.
    Targets {
        /// Path to a .xcodeproj or .xcworkspace bundle.
        path: PathBuf,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Recreate per-user schemes through the xcodeproj Ruby gem.
    ///
    /// Requires `bundle` (or the executable named in XCS_BUNDLE_COMMAND)
    /// and a Ruby installation on PATH.
    RecreateUserSchemes {
        /// Path to a .xcodeproj or .xcworkspace bundle.
        path: PathBuf,
    },

    /// Show a bundle overview: kind, member projects, scheme and
    /// target counts.
    Status {
        /// Path to a .xcodeproj or .xcworkspace bundle.
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN // Default to less noise
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .init();

    let config = Config::load();

    match cli.command {
        Commands::Schemes {
            path,
            kind,
            with_tests,
            json,
        } => {
            let kind: schemes::KindFilter = kind.parse()?;
            schemes::execute(&path, kind, with_tests, json)?;
        }

        Commands::Targets { path, json } => {
            targets::execute(&path, json)?;
        }

        Commands::RecreateUserSchemes { path } => {
            recreate::execute(&config, &path)?;
        }

        Commands::Status { path } => {
            status::execute(&path)?;
        }
    }

    Ok(())
}
