//! Remote template source parsing.
//!
//! Locators use the `[provider:]owner/repo[/subdir][#ref]` shorthand, e.g.
//! `github:withastro/astro#examples/blog` or
//! `gitlab:group/project/templates/site#v2`. A bare `owner/repo` means GitHub.

use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;

/// Git hosting provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    GitHub,
    GitLab,
    Bitbucket,
    SourceHut,
}

impl Provider {
    /// Clone URL for `repo` (`owner/name`).
    pub fn clone_url(&self, repo: &str) -> String {
        match self {
            Self::GitHub => format!("https://github.com/{repo}.git"),
            Self::GitLab => format!("https://gitlab.com/{repo}.git"),
            Self::Bitbucket => format!("https://bitbucket.org/{repo}.git"),
            Self::SourceHut => format!("https://git.sr.ht/~{repo}"),
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "github" | "gh" => Ok(Self::GitHub),
            "gitlab" => Ok(Self::GitLab),
            "bitbucket" => Ok(Self::Bitbucket),
            "sourcehut" => Ok(Self::SourceHut),
            _ => Err(format!("unsupported provider: {}", s)),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Bitbucket => "bitbucket",
            Self::SourceHut => "sourcehut",
        })
    }
}

/// A parsed template locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSource {
    /// Hosting provider.
    pub provider: Provider,
    /// Repository as `owner/name`.
    pub repo: String,
    /// Directory inside the repository, if any.
    pub subdir: Option<String>,
    /// Branch or tag; `None` means the default branch.
    pub git_ref: Option<String>,
}

impl RemoteSource {
    /// Parse a locator string.
    pub fn parse(locator: &str) -> Result<Self> {
        let locator = locator.trim();

        let (provider, rest) = match locator.split_once(':') {
            Some((name, rest)) => match name.parse::<Provider>() {
                Ok(provider) => (provider, rest),
                Err(e) => bail!("Invalid template source '{locator}': {e}"),
            },
            None => (Provider::default(), locator),
        };

        let (path, git_ref) = match rest.split_once('#') {
            Some((path, r)) if !r.is_empty() => (path, Some(r.to_string())),
            Some((path, _)) => (path, None),
            None => (rest, None),
        };

        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let (Some(owner), Some(name)) = (segments.next(), segments.next()) else {
            bail!("Invalid template source '{locator}': expected owner/repo");
        };

        let subdir: Vec<&str> = segments.collect();
        let subdir = (!subdir.is_empty()).then(|| subdir.join("/"));

        Ok(Self {
            provider,
            repo: format!("{owner}/{name}"),
            subdir,
            git_ref,
        })
    }

    /// Clone URL of the repository.
    pub fn clone_url(&self) -> String {
        self.provider.clone_url(&self.repo)
    }

    /// Get a unique identifier for this source.
    pub fn id(&self) -> String {
        format!(
            "{}:{}/{}@{}",
            self.provider,
            self.repo,
            self.subdir.as_deref().unwrap_or(""),
            self.git_ref.as_deref().unwrap_or("HEAD")
        )
    }
}

impl FromStr for RemoteSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_examples_branch_locator() {
        let source = RemoteSource::parse("github:withastro/astro#examples/blog").unwrap();

        assert_eq!(source.provider, Provider::GitHub);
        assert_eq!(source.repo, "withastro/astro");
        assert_eq!(source.subdir, None);
        assert_eq!(source.git_ref.as_deref(), Some("examples/blog"));
    }

    #[test]
    fn parses_versioned_locator() {
        let source = RemoteSource::parse("github:withastro/astro/examples/blog#v1.2.3").unwrap();

        assert_eq!(source.repo, "withastro/astro");
        assert_eq!(source.subdir.as_deref(), Some("examples/blog"));
        assert_eq!(source.git_ref.as_deref(), Some("v1.2.3"));
    }

    #[test]
    fn parses_starlight_locator() {
        let source = RemoteSource::parse("github:withastro/starlight/examples/basics").unwrap();

        assert_eq!(source.repo, "withastro/starlight");
        assert_eq!(source.subdir.as_deref(), Some("examples/basics"));
        assert_eq!(source.git_ref, None);
    }

    #[test]
    fn bare_repo_defaults_to_github() {
        let source = RemoteSource::parse("someuser/sometemplate").unwrap();

        assert_eq!(source.provider, Provider::GitHub);
        assert_eq!(source.clone_url(), "https://github.com/someuser/sometemplate.git");
    }

    #[test]
    fn other_providers() {
        let source = RemoteSource::parse("gitlab:group/project/site#dev").unwrap();
        assert_eq!(source.clone_url(), "https://gitlab.com/group/project.git");
        assert_eq!(source.subdir.as_deref(), Some("site"));

        let source = RemoteSource::parse("sourcehut:someone/starter").unwrap();
        assert_eq!(source.clone_url(), "https://git.sr.ht/~someone/starter");
    }

    #[test]
    fn empty_ref_means_default_branch() {
        let source = RemoteSource::parse("owner/repo#").unwrap();
        assert_eq!(source.git_ref, None);
    }

    #[test]
    fn rejects_unknown_provider() {
        assert!(RemoteSource::parse("svn:owner/repo").is_err());
    }

    #[test]
    fn rejects_missing_repo() {
        assert!(RemoteSource::parse("github:owner").is_err());
        assert!(RemoteSource::parse("").is_err());
    }

    #[test]
    fn ids_differ_by_ref() {
        let a = RemoteSource::parse("owner/repo#main").unwrap();
        let b = RemoteSource::parse("owner/repo#dev").unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(
            RemoteSource::parse("owner/repo").unwrap().id(),
            "github:owner/repo/@HEAD"
        );
    }
}
