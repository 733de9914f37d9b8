//! Per-run project settings.
//!
//! [`ProjectContext`] collects everything a creation run needs: where the
//! project goes, which template to use, and how commands are spelled. It is
//! built from CLI flags and filled in by the interactive steps.

use std::path::{Component, Path, PathBuf};

use crate::cli::args::Cli;
use crate::package_manager::PackageManager;
use crate::template::LATEST_REF;

/// Settings for a single project-creation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    /// Target directory exactly as the user gave it.
    pub cwd: PathBuf,
    /// Chosen template identifier, once known.
    pub template: Option<String>,
    /// Version reference of the first-party examples.
    pub git_ref: String,
    /// Package manager used for command spelling.
    pub package_manager: PackageManager,
    /// Package name written into the manifest.
    pub project_name: String,
    /// Skip all filesystem and network work.
    pub dry_run: bool,
    /// Accept defaults for every prompt.
    pub yes: bool,
    /// Decline every prompt.
    pub no: bool,
}

impl Default for ProjectContext {
    fn default() -> Self {
        Self {
            cwd: PathBuf::from("."),
            template: None,
            git_ref: LATEST_REF.to_string(),
            package_manager: PackageManager::default(),
            project_name: String::new(),
            dry_run: false,
            yes: false,
            no: false,
        }
    }
}

impl ProjectContext {
    /// Create a context for `cwd` with default settings.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            ..Default::default()
        }
    }

    /// Build a context from parsed command-line flags.
    ///
    /// The package manager falls back to the one that launched us.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            cwd: cli.directory.clone().unwrap_or_default(),
            template: cli.template.clone(),
            git_ref: cli.git_ref.clone(),
            package_manager: cli.package_manager.unwrap_or_else(PackageManager::detect),
            project_name: String::new(),
            dry_run: cli.dry_run,
            yes: cli.yes,
            no: cli.no,
        }
    }

    /// Whether the target is the directory we were started in.
    pub fn is_current_dir(&self) -> bool {
        is_current_dir(&self.cwd)
    }
}

/// Whether `path` spells the current directory (`""`, `.`, `./`).
pub fn is_current_dir(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::CurDir))
}

/// Whether a failed run may delete `path`.
///
/// Only directories below the current one qualify. Absolute paths that
/// happen to equal the current directory are not detected.
pub fn is_disposable(path: &Path) -> bool {
    if is_current_dir(path) {
        return false;
    }
    !matches!(path.components().next(), Some(Component::ParentDir))
}
