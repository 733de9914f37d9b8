//! Git template fetching.
//!
//! Shallow-clones the repository behind a locator into a staging directory,
//! then copies the requested subdirectory into the destination. Nothing is
//! written to the destination until the clone has succeeded.

use anyhow::{anyhow, bail, Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::source::RemoteSource;
use super::{DownloadOptions, TemplateFetcher};

/// Fetches templates from git repositories.
pub struct GitFetcher {
    /// Directory for staging clones.
    clone_dir: PathBuf,
}

impl GitFetcher {
    /// Create a new git fetcher.
    pub fn new(clone_dir: impl Into<PathBuf>) -> Self {
        Self {
            clone_dir: clone_dir.into(),
        }
    }

    /// Get the clone directory.
    pub fn clone_dir(&self) -> &PathBuf {
        &self.clone_dir
    }

    /// Clone `url` at `git_ref` and copy `subdir` (or the whole tree) into
    /// the destination described by `options`.
    pub fn fetch_into(
        &self,
        url: &str,
        git_ref: Option<&str>,
        subdir: Option<&str>,
        options: &DownloadOptions,
    ) -> Result<()> {
        let staging = self.repo_path(&format!("{url}#{}", git_ref.unwrap_or("")));
        if staging.exists() {
            fs::remove_dir_all(&staging)
                .with_context(|| format!("Failed to clear {}", staging.display()))?;
        }

        let result = self
            .clone_repo(url, &staging, git_ref)
            .and_then(|()| {
                let source = match subdir {
                    Some(sub) => staging.join(sub),
                    None => staging.clone(),
                };
                if !source.is_dir() {
                    bail!(
                        "Subdirectory '{}' not found in {url}",
                        subdir.unwrap_or_default()
                    );
                }
                copy_tree(&source, &options.destination(), options.force)
            });

        if staging.exists() {
            if let Err(e) = fs::remove_dir_all(&staging) {
                warn!(path = %staging.display(), error = %e, "Failed to remove staging clone");
            }
        }

        result
    }

    fn clone_repo(&self, url: &str, path: &Path, git_ref: Option<&str>) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut cmd = Command::new("git");
        cmd.args(["clone", "--depth", "1", "--quiet"]);

        if let Some(r) = git_ref {
            cmd.args(["--branch", r]);
        }

        cmd.arg(url).arg(path);
        debug!(url, git_ref, "Cloning template repository");

        let output = cmd
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .context("Failed to run git")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(anyhow!(stderr)).context(format!("Git clone of {url} failed"));
        }

        Ok(())
    }

    /// Get the staging path for a repository.
    ///
    /// Uses a hash of the URL to create a deterministic, unique path.
    pub fn repo_path(&self, url: &str) -> PathBuf {
        let hash = Sha256::digest(url.as_bytes());
        let hash_str = hex::encode(&hash[..8]);
        self.clone_dir.join(hash_str)
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new(std::env::temp_dir().join("create-astro"))
    }
}

impl TemplateFetcher for GitFetcher {
    fn download(&self, locator: &str, options: &DownloadOptions) -> Result<()> {
        let source = RemoteSource::parse(locator)?;
        self.fetch_into(
            &source.clone_url(),
            source.git_ref.as_deref(),
            source.subdir.as_deref(),
            options,
        )
        .with_context(|| format!("Failed to download {locator}"))
    }
}

/// Copy `from` into `to`, skipping the repository's `.git` directory.
fn copy_tree(from: &Path, to: &Path, force: bool) -> Result<()> {
    fs::create_dir_all(to)?;

    let entries = WalkDir::new(from)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git");

    for entry in entries {
        let entry = entry?;
        let relative = entry.path().strip_prefix(from)?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        let occupied = target.symlink_metadata().is_ok();
        if occupied && !force {
            bail!("Destination {} already exists", target.display());
        }

        if entry.file_type().is_symlink() {
            copy_symlink(entry.path(), &target, occupied)?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to write {}", target.display()))?;
        }
    }

    Ok(())
}

/// Recreate the link at `link` rather than copying what it points to.
#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path, occupied: bool) -> Result<()> {
    let points_to = fs::read_link(link)?;
    if occupied {
        if target.is_dir() && !target.is_symlink() {
            fs::remove_dir_all(target)?;
        } else {
            fs::remove_file(target)?;
        }
    }
    std::os::unix::fs::symlink(&points_to, target)
        .with_context(|| format!("Failed to link {}", target.display()))
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, _target: &Path, _occupied: bool) -> Result<()> {
    debug!(path = %link.display(), "Skipping symlink");
    Ok(())
}
