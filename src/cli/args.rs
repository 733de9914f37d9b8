//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

use crate::package_manager::PackageManager;
use crate::template::LATEST_REF;

/// Scaffold a new Astro project from a starter template.
#[derive(Debug, Parser)]
#[command(name = "create-astro")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to create the project in
    #[arg(value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Starter template name, or `owner/repo[/subdir][#ref]` for third-party templates
    #[arg(short, long)]
    pub template: Option<String>,

    /// Astro release the first-party examples are taken from
    #[arg(long = "ref", value_name = "REF", env = "CREATE_ASTRO_REF", default_value = LATEST_REF)]
    pub git_ref: String,

    /// Package manager to write commands for (npm, yarn, pnpm, bun)
    #[arg(long, value_name = "NAME")]
    pub package_manager: Option<PackageManager>,

    /// Accept the default for every prompt
    #[arg(short, long, conflicts_with = "no")]
    pub yes: bool,

    /// Decline every prompt
    #[arg(short, long)]
    pub no: bool,

    /// Walk through the steps without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}
