//! Template identifier resolution.
//!
//! Turns what the user typed for `--template` into a locator the fetcher
//! understands. Resolution never fails; bad identifiers surface later as
//! fetch errors.

use tracing::debug;

/// Version reference meaning "whatever is current".
pub const LATEST_REF: &str = "latest";

/// Prefix routing an identifier to the Starlight docs starters.
const STARLIGHT_PREFIX: &str = "starlight";

/// Starter used when a Starlight identifier names none.
const DEFAULT_STARLIGHT_STARTER: &str = "basics";

/// Resolve a template identifier and version reference to a source locator.
///
/// # Example
///
/// ```
/// use create_astro::template::resolve_locator;
///
/// assert_eq!(
///     resolve_locator("blog", "latest"),
///     "github:withastro/astro#examples/blog"
/// );
/// assert_eq!(resolve_locator("user/repo", "latest"), "user/repo");
/// ```
pub fn resolve_locator(template: &str, git_ref: &str) -> String {
    let locator = if template.starts_with(STARLIGHT_PREFIX) {
        let starter = template
            .split('/')
            .nth(1)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STARLIGHT_STARTER);
        format!("github:withastro/starlight/examples/{starter}")
    } else if is_third_party(template) {
        template.to_string()
    } else if git_ref == LATEST_REF {
        // The examples branch holds only the example directories, so the
        // fetch skips the rest of the monorepo.
        format!("github:withastro/astro#examples/{template}")
    } else {
        format!("github:withastro/astro/examples/{template}#{git_ref}")
    };

    debug!(template, git_ref, locator = %locator, "Resolved template locator");
    locator
}

/// Whether an identifier points outside the first-party examples.
pub fn is_third_party(template: &str) -> bool {
    !template.starts_with(STARLIGHT_PREFIX) && template.contains('/')
}
