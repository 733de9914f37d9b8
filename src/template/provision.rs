//! Template provisioning.
//!
//! Downloads a template into the project directory and turns it into a
//! project of its own: README fixed up for the chosen package manager,
//! repository-only files removed, manifest renamed.
//!
//! A failed download is followed by a best-effort removal of the directory
//! (only when this run plausibly created it) and a classified error.

use anyhow::anyhow;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::thread::{self, ScopedJoinHandle};
use tracing::debug;

use crate::context::{is_disposable, ProjectContext};
use crate::error::{CreateError, Result};
use crate::fetch::{DownloadOptions, TemplateFetcher};
use crate::package_manager::PackageManager;
use crate::ui::UserInterface;

use super::locator::resolve_locator;
use super::readme::process_readme;
use super::rules::{apply_rules, Overrides, REMOVAL_RULES, UPDATE_RULES};

/// README rewritten after download.
pub const README_FILE: &str = "README.md";

/// Nested causes reported for a failed download.
const MAX_REPORTED_CAUSES: usize = 2;

static NOT_FOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b404\b|repository\b.*\bnot found|remote branch\b.*\bnot found|subdirectory\b.*\bnot found",
    )
    .unwrap()
});

/// How a provisioning call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// Dry run; nothing was touched.
    Skipped,
    /// Template downloaded and post-processed.
    Provisioned {
        /// Locator the template was fetched from.
        locator: String,
    },
}

/// Drives download and post-processing through a [`TemplateFetcher`].
pub struct Provisioner<F> {
    fetcher: F,
    anchor: PathBuf,
}

impl<F: TemplateFetcher> Provisioner<F> {
    /// Create a provisioner around a fetcher.
    ///
    /// Relative project directories resolve against the process working
    /// directory unless [`Provisioner::anchored_at`] says otherwise.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            anchor: PathBuf::new(),
        }
    }

    /// Resolve relative project directories against `dir`.
    pub fn anchored_at(mut self, dir: impl Into<PathBuf>) -> Self {
        self.anchor = dir.into();
        self
    }

    /// Directory the project for `ctx` is written to.
    pub fn target_dir(&self, ctx: &ProjectContext) -> PathBuf {
        self.anchor.join(&ctx.cwd)
    }

    /// Get the fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Download `template` into the project directory and normalize it.
    ///
    /// Fetch failures are reported through `ui` and returned as
    /// [`CreateError::TemplateNotFound`] or [`CreateError::TemplateDownload`].
    pub fn provision(
        &self,
        template: &str,
        ctx: &ProjectContext,
        ui: &mut dyn UserInterface,
    ) -> Result<ProvisionOutcome> {
        if ctx.dry_run {
            debug!(template, "Dry run, skipping template download");
            return Ok(ProvisionOutcome::Skipped);
        }

        let locator = resolve_locator(template, &ctx.git_ref);
        let target = self.target_dir(ctx);
        let options = DownloadOptions::in_place(&target);

        debug!(template, locator = %locator, target = %target.display(), "Downloading template");
        if let Err(err) = self.fetcher.download(&locator, &options) {
            remove_partial_directory(&ctx.cwd, &target);
            return Err(classify_failure(template, &err, ui));
        }

        normalize_readme(&target, ctx.package_manager)?;
        post_process(
            &target,
            &Overrides {
                name: ctx.project_name.clone(),
            },
        )?;

        Ok(ProvisionOutcome::Provisioned { locator })
    }
}

/// Rewrite `README.md` under `root`, if there is one.
///
/// Invalid UTF-8 is decoded lossily. Returns whether a README was found.
pub fn normalize_readme(root: &Path, pm: PackageManager) -> Result<bool> {
    let path = root.join(README_FILE);
    if !path.is_file() {
        return Ok(false);
    }

    let bytes = fs::read(&path)?;
    let content = String::from_utf8_lossy(&bytes);
    fs::write(&path, process_readme(&content, pm))?;
    debug!(path = %path.display(), package_manager = %pm, "Normalized README");
    Ok(true)
}

/// Run the removal and update passes side by side and wait for both.
///
/// The two passes touch disjoint paths. The first error wins.
pub fn post_process(root: &Path, overrides: &Overrides) -> Result<()> {
    thread::scope(|s| {
        let removal = s.spawn(|| apply_rules(REMOVAL_RULES, root, overrides));
        let update = s.spawn(|| apply_rules(UPDATE_RULES, root, overrides));

        let removed = join_pass(removal, "removal");
        let updated = join_pass(update, "update");

        debug!(?removed, ?updated, "Post-processing finished");
        removed.and(updated).map(|_| ())
    })
}

fn join_pass(handle: ScopedJoinHandle<'_, Result<usize>>, pass: &str) -> Result<usize> {
    handle
        .join()
        .map_err(|_| CreateError::Other(anyhow!("The {pass} pass panicked")))?
}

/// Try to delete a directory left behind by a failed download.
///
/// `cwd` is the project directory as the user gave it and decides whether
/// removal is allowed at all; `target` is where it resolved to. Only empty
/// directories are removed and every error is discarded.
pub fn remove_partial_directory(cwd: &Path, target: &Path) {
    if !is_disposable(cwd) {
        debug!(cwd = %cwd.display(), "Leaving target directory in place");
        return;
    }

    match fs::remove_dir(target) {
        Ok(()) => debug!(target = %target.display(), "Removed directory after failed download"),
        Err(e) => debug!(target = %target.display(), error = %e, "Could not remove directory"),
    }
}

/// Whether any message in the error chain signals a missing template.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| NOT_FOUND.is_match(&cause.to_string()))
}

/// Turn a fetch error into the error shown to the user.
///
/// Anything other than not-found is logged with up to two nested causes.
pub fn classify_failure(
    template: &str,
    err: &anyhow::Error,
    ui: &mut dyn UserInterface,
) -> CreateError {
    if is_not_found(err) {
        debug!(template, error = %err, "Template not found");
        return CreateError::TemplateNotFound {
            template: template.to_string(),
        };
    }

    debug!(template, error = ?err, "Template download failed");
    ui.error(&err.to_string());
    for cause in err.chain().skip(1).take(MAX_REPORTED_CAUSES) {
        ui.error(&cause.to_string());
    }

    CreateError::TemplateDownload {
        template: template.to_string(),
    }
}
