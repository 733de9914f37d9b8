//! Target directory checks.

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::Result;

/// Entries that may already exist in a directory we scaffold into.
const SAFE_ENTRIES: &[&str] = &[
    ".DS_Store",
    ".git",
    ".gitkeep",
    ".idea",
    ".npmignore",
    ".travis.yml",
    ".yarn",
    ".yarnrc.yml",
    "docs",
    "LICENSE",
    "mkdocs.yml",
    "Thumbs.db",
];

static SAFE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.iml$|^npm-debug\.log|^yarn-debug\.log|^yarn-error\.log").unwrap()
});

/// Whether a directory entry can be ignored when checking for emptiness.
pub fn is_safe_entry(name: &str) -> bool {
    SAFE_ENTRIES.contains(&name) || SAFE_PATTERN.is_match(name)
}

/// Whether `dir` is missing or holds only safe entries.
pub fn is_empty_dir(dir: &Path) -> Result<bool> {
    if !dir.exists() {
        return Ok(true);
    }

    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name();
        if !is_safe_entry(&name.to_string_lossy()) {
            return Ok(false);
        }
    }

    Ok(true)
}
