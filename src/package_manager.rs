//! Package manager selection.
//!
//! The package manager only affects how commands are spelled in the
//! generated project (README rewrites, next-steps hints). It is taken from
//! `--package-manager`, or from the `npm_config_user_agent` variable that
//! npm, yarn, pnpm and bun set when they launch a `create-*` binary.

use std::fmt;
use std::str::FromStr;

/// Environment variable the JavaScript package managers export.
pub const USER_AGENT_VAR: &str = "npm_config_user_agent";

/// A JavaScript package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// Binary name of the package manager.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
        }
    }

    /// Whether this is npm, the manager templates are written for.
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Npm)
    }

    /// Command line that runs a package script.
    ///
    /// Only npm needs the `run` sub-command for arbitrary scripts.
    pub fn run_script(&self, script: &str) -> String {
        if self.is_default() {
            format!("npm run {script}")
        } else {
            format!("{} {script}", self.name())
        }
    }

    /// Detect the manager from a user agent like `pnpm/9.1.0 npm/? node/v20.11.0`.
    ///
    /// Unknown or missing agents fall back to npm.
    pub fn from_user_agent(agent: Option<&str>) -> Self {
        agent
            .and_then(|ua| ua.split_whitespace().next())
            .and_then(|spec| spec.split('/').next())
            .and_then(|name| name.parse().ok())
            .unwrap_or_default()
    }

    /// Detect the manager from the process environment.
    pub fn detect() -> Self {
        Self::from_user_agent(std::env::var(USER_AGENT_VAR).ok().as_deref())
    }
}

impl FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            "bun" => Ok(Self::Bun),
            _ => Err(format!("unknown package manager: {}", s)),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
