//! Template fetching from remote sources.
//!
//! The provisioning flow only talks to [`TemplateFetcher`]. The shipped
//! implementation is [`GitFetcher`], which shallow-clones the repository a
//! locator points at and copies the requested subdirectory into place.

pub mod git;
pub mod source;

use std::path::PathBuf;

pub use git::GitFetcher;
pub use source::{Provider, RemoteSource};

/// Options passed along with a download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Overwrite files that already exist in the destination.
    pub force: bool,
    /// Base directory of the download.
    pub cwd: PathBuf,
    /// Destination, relative to `cwd`. `.` materializes straight into `cwd`.
    pub dir: PathBuf,
}

impl DownloadOptions {
    /// Options that overwrite into `cwd` itself.
    pub fn in_place(cwd: impl Into<PathBuf>) -> Self {
        Self {
            force: true,
            cwd: cwd.into(),
            dir: PathBuf::from("."),
        }
    }

    /// Resolved destination directory.
    pub fn destination(&self) -> PathBuf {
        self.cwd.join(&self.dir)
    }
}

/// Downloads a template locator onto disk.
///
/// Errors should keep their cause chain; the provisioning flow reports up
/// to two nested causes.
pub trait TemplateFetcher {
    /// Materialize `locator` according to `options`.
    fn download(&self, locator: &str, options: &DownloadOptions) -> anyhow::Result<()>;
}

impl<F> TemplateFetcher for F
where
    F: Fn(&str, &DownloadOptions) -> anyhow::Result<()>,
{
    fn download(&self, locator: &str, options: &DownloadOptions) -> anyhow::Result<()> {
        self(locator, options)
    }
}
