//! Post-download file rules.
//!
//! A fixed table of paths that are either deleted from a fresh project or
//! rewritten with per-project overrides.

use regex::Regex;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::{CreateError, Result};

static FIRST_INDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^([ \t]+)").unwrap());

const DEFAULT_INDENT: &str = "\t";

/// Values written into the project's manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overrides {
    /// Package name for the new project.
    pub name: String,
}

/// Rewrite applied to a file's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Set `name`, drop `private`, keep the file's indentation.
    PackageManifest,
}

impl Transform {
    /// Apply the transform to file contents.
    pub fn apply(&self, path: &Path, content: &str, overrides: &Overrides) -> Result<String> {
        match self {
            Self::PackageManifest => rewrite_manifest(content, overrides).map_err(|e| {
                CreateError::Manifest {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            }),
        }
    }
}

/// What happens to a path after the template lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRule {
    /// Delete the file or directory.
    Remove { path: &'static str },
    /// Load, transform and write back.
    Update {
        path: &'static str,
        transform: Transform,
    },
}

/// Files that only make sense in the examples repository.
pub const REMOVAL_RULES: &[FileRule] = &[
    FileRule::Remove {
        path: "CHANGELOG.md",
    },
    FileRule::Remove {
        path: ".codesandbox",
    },
];

/// Files rewritten for the new project.
pub const UPDATE_RULES: &[FileRule] = &[FileRule::Update {
    path: "package.json",
    transform: Transform::PackageManifest,
}];

impl FileRule {
    /// Path of the rule, relative to the project root.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Remove { path } | Self::Update { path, .. } => path,
        }
    }

    /// Apply the rule under `root`. Missing targets are skipped.
    ///
    /// Returns whether anything was changed.
    pub fn apply(&self, root: &Path, overrides: &Overrides) -> Result<bool> {
        let target = root.join(self.path());
        // symlink_metadata so a dangling link still counts as present
        if fs::symlink_metadata(&target).is_err() {
            return Ok(false);
        }

        match self {
            Self::Remove { .. } => {
                if target.is_dir() {
                    fs::remove_dir_all(&target)?;
                } else {
                    fs::remove_file(&target)?;
                }
                debug!(path = %target.display(), "Removed template artifact");
            }
            Self::Update { transform, .. } => {
                let content = fs::read_to_string(&target)?;
                let updated = transform.apply(&target, &content, overrides)?;
                fs::write(&target, updated)?;
                debug!(path = %target.display(), "Updated template file");
            }
        }

        Ok(true)
    }
}

/// Apply every rule in `rules` under `root`, stopping at the first error.
pub fn apply_rules(rules: &[FileRule], root: &Path, overrides: &Overrides) -> Result<usize> {
    let mut changed = 0;
    for rule in rules {
        if rule.apply(root, overrides)? {
            changed += 1;
        }
    }
    Ok(changed)
}

/// Indentation of the first indented line, or a tab.
pub fn detect_indent(content: &str) -> &str {
    FIRST_INDENT
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_INDENT)
}

/// Merge overrides into a `package.json` document.
///
/// Existing keys keep their position; `private` is removed. No trailing
/// newline is added.
pub fn rewrite_manifest(content: &str, overrides: &Overrides) -> anyhow::Result<String> {
    let mut manifest: Map<String, Value> = serde_json::from_str(content)?;
    manifest.insert("name".to_string(), Value::String(overrides.name.clone()));
    manifest.shift_remove("private");

    let indent = detect_indent(content);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(&manifest, &mut ser)?;

    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn overrides(name: &str) -> Overrides {
        Overrides {
            name: name.to_string(),
        }
    }

    #[test]
    fn detects_two_space_indent() {
        assert_eq!(detect_indent("{\n  \"name\": \"x\"\n}"), "  ");
    }

    #[test]
    fn detects_tab_indent() {
        assert_eq!(detect_indent("{\n\t\"name\": \"x\"\n}"), "\t");
    }

    #[test]
    fn single_line_falls_back_to_tab() {
        assert_eq!(detect_indent(r#"{"name":"x"}"#), "\t");
    }

    #[test]
    fn manifest_sets_name_and_drops_private() {
        let out = rewrite_manifest(
            "{\n  \"name\": \"@example/basics\",\n  \"private\": true,\n  \"version\": \"0.0.1\"\n}\n",
            &overrides("new-app"),
        )
        .unwrap();
        assert_eq!(
            out,
            "{\n  \"name\": \"new-app\",\n  \"version\": \"0.0.1\"\n}"
        );
    }

    #[test]
    fn manifest_keeps_key_order() {
        let out = rewrite_manifest(
            "{\n    \"type\": \"module\",\n    \"name\": \"old\",\n    \"scripts\": {\n        \"dev\": \"astro dev\"\n    }\n}",
            &overrides("fresh"),
        )
        .unwrap();
        assert_eq!(
            out,
            "{\n    \"type\": \"module\",\n    \"name\": \"fresh\",\n    \"scripts\": {\n        \"dev\": \"astro dev\"\n    }\n}"
        );
    }

    #[test]
    fn manifest_without_name_gets_one() {
        let out = rewrite_manifest("{\"version\":\"1.0.0\"}", &overrides("app")).unwrap();
        assert_eq!(out, "{\n\t\"version\": \"1.0.0\",\n\t\"name\": \"app\"\n}");
    }

    #[test]
    fn invalid_manifest_is_an_error() {
        assert!(rewrite_manifest("not json", &overrides("app")).is_err());
        assert!(rewrite_manifest("[1, 2]", &overrides("app")).is_err());
    }

    #[test]
    fn remove_rule_deletes_file_and_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("CHANGELOG.md"), "# Changelog").unwrap();
        fs::create_dir_all(temp.path().join(".codesandbox/nested")).unwrap();
        fs::write(temp.path().join(".codesandbox/nested/tasks.json"), "{}").unwrap();

        let changed = apply_rules(REMOVAL_RULES, temp.path(), &overrides("x")).unwrap();

        assert_eq!(changed, 2);
        assert!(!temp.path().join("CHANGELOG.md").exists());
        assert!(!temp.path().join(".codesandbox").exists());
    }

    #[test]
    fn missing_targets_are_skipped() {
        let temp = TempDir::new().unwrap();
        let changed = apply_rules(REMOVAL_RULES, temp.path(), &overrides("x")).unwrap();
        assert_eq!(changed, 0);
        let changed = apply_rules(UPDATE_RULES, temp.path(), &overrides("x")).unwrap();
        assert_eq!(changed, 0);
    }

    #[test]
    fn update_rule_rewrites_manifest_in_place() {
        let temp = TempDir::new().unwrap();
        let manifest = temp.path().join("package.json");
        fs::write(&manifest, r#"{"name":"old","private":true}"#).unwrap();

        apply_rules(UPDATE_RULES, temp.path(), &overrides("new-app")).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&manifest).unwrap()).unwrap();
        assert_eq!(value["name"], "new-app");
        assert!(value.get("private").is_none());
    }

    #[test]
    fn update_rule_reports_broken_manifest() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{ broken").unwrap();

        let err = apply_rules(UPDATE_RULES, temp.path(), &overrides("x")).unwrap_err();

        assert!(matches!(err, CreateError::Manifest { .. }));
    }

    #[test]
    fn rule_paths() {
        assert_eq!(REMOVAL_RULES[0].path(), "CHANGELOG.md");
        assert_eq!(UPDATE_RULES[0].path(), "package.json");
    }
}
