//! Error types for project creation.
//!
//! This module defines [`CreateError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `CreateError` for failures the user needs to act on
//! - Fetch collaborators return `anyhow::Error` so their cause chain can be reported
//! - Cleanup failures after a broken download are never surfaced

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for project creation.
#[derive(Debug, Error)]
pub enum CreateError {
    /// The resolved template could not be found remotely.
    #[error("Template {template} does not exist!")]
    TemplateNotFound { template: String },

    /// The template download failed for any other reason.
    #[error("Unable to download template {template}")]
    TemplateDownload { template: String },

    /// The target directory already contains files.
    #[error("Directory {path} is not empty")]
    DirectoryNotEmpty { path: PathBuf },

    /// The template manifest could not be rewritten.
    #[error("Failed to update manifest at {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// No template was chosen, or the user backed out of a prompt.
    #[error("Project creation cancelled")]
    Cancelled,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for project creation.
pub type Result<T> = std::result::Result<T, CreateError>;
