//! Project templates.
//!
//! - [`locator`] - template identifier to fetchable locator
//! - [`readme`] - README marker stripping and package-manager respelling
//! - [`rules`] - files removed or rewritten after download
//! - [`provision`] - download, post-process, recover from failures
//!
//! # Example
//!
//! ```
//! use create_astro::template::resolve_locator;
//!
//! let locator = resolve_locator("starlight", "latest");
//! assert_eq!(locator, "github:withastro/starlight/examples/basics");
//! ```

pub mod locator;
pub mod provision;
pub mod readme;
pub mod rules;

pub use locator::{is_third_party, resolve_locator, LATEST_REF};
pub use provision::{
    classify_failure, is_not_found, normalize_readme, post_process, remove_partial_directory,
    ProvisionOutcome, Provisioner, README_FILE,
};
pub use readme::{process_readme, rewrite_package_manager_references, strip_marker_sections};
pub use rules::{FileRule, Overrides, Transform, REMOVAL_RULES, UPDATE_RULES};

/// A first-party starter offered in the template prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Starter {
    /// Template identifier.
    pub name: &'static str,
    /// Prompt label.
    pub label: &'static str,
}

/// Template used when the user accepts all defaults.
pub const DEFAULT_TEMPLATE: &str = "basics";

/// Starters listed by the template prompt, recommended first.
pub const STARTERS: &[Starter] = &[
    Starter {
        name: "basics",
        label: "A basic, helpful starter project (recommended)",
    },
    Starter {
        name: "blog",
        label: "Use blog template",
    },
    Starter {
        name: "starlight",
        label: "Use docs (Starlight) template",
    },
    Starter {
        name: "minimal",
        label: "Use minimal (empty) template",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_is_listed_first() {
        assert_eq!(STARTERS[0].name, DEFAULT_TEMPLATE);
    }

    #[test]
    fn starters_are_first_party() {
        assert!(STARTERS.iter().all(|s| !is_third_party(s.name)));
    }
}
