//! Package name derivation.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static VALID_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@[a-z\d\-*~][a-z\d\-*._~]*/)?[a-z\d\-~][a-z\d\-._~]*$").unwrap()
});
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static LEADING_DOT_OR_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[._]").unwrap());
static INVALID_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z\d\-~]+").unwrap());

/// Fallback when nothing usable is left of a name.
const FALLBACK_NAME: &str = "astro-project";

/// Whether `name` is a valid npm package name.
pub fn is_valid_name(name: &str) -> bool {
    VALID_NAME.is_match(name)
}

/// Coerce `name` into a valid npm package name.
///
/// ```
/// use create_astro::project::to_valid_name;
///
/// assert_eq!(to_valid_name("My Astro Site"), "my-astro-site");
/// assert_eq!(to_valid_name("@scope/pkg"), "@scope/pkg");
/// ```
pub fn to_valid_name(name: &str) -> String {
    if is_valid_name(name) {
        return name.to_string();
    }

    let lowered = name.trim().to_lowercase();
    let dashed = WHITESPACE.replace_all(&lowered, "-");
    let trimmed = LEADING_DOT_OR_UNDERSCORE.replace(&dashed, "");
    let cleaned = INVALID_CHARS.replace_all(&trimmed, "-");
    let result = cleaned.trim_matches('-');

    if result.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        result.to_string()
    }
}

/// Package name for a project created in `dir`.
///
/// For the current directory the name comes from `current_dir`.
pub fn project_name_for(dir: &Path, current_dir: &Path) -> String {
    let base = if crate::context::is_current_dir(dir) {
        current_dir
    } else {
        dir
    };

    let name = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    to_valid_name(&name)
}
