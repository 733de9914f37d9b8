//! create-astro - scaffold a new Astro project from a starter template.
//!
//! The binary asks where the project goes and which template to start
//! from, downloads the template and turns it into a project of its own.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`context`] - Per-run project settings
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Downloading templates from git hosts
//! - [`package_manager`] - Package manager detection and command spelling
//! - [`project`] - Target directory checks and package naming
//! - [`template`] - Locator resolution, README rewrites, provisioning
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use create_astro::package_manager::PackageManager;
//! use create_astro::template::{process_readme, resolve_locator};
//!
//! assert_eq!(
//!     resolve_locator("blog", "4.0.0"),
//!     "github:withastro/astro/examples/blog#4.0.0"
//! );
//! assert_eq!(
//!     process_readme("Run `npm run dev`", PackageManager::Yarn),
//!     "Run `yarn dev`"
//! );
//! ```

pub mod cli;
pub mod context;
pub mod error;
pub mod fetch;
pub mod package_manager;
pub mod project;
pub mod template;
pub mod ui;

pub use error::{CreateError, Result};
