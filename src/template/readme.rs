//! README normalization.
//!
//! Starter READMEs carry sections meant only for the examples repository,
//! wrapped in `<!-- ASTRO:REMOVE:START -->` / `<!-- ASTRO:REMOVE:END -->`
//! comments, and spell commands for npm. Both are fixed up after download.

use regex::Regex;
use std::sync::LazyLock;

use crate::package_manager::PackageManager;

// Non-greedy, so each START pairs with the next END. No nesting.
static MARKER_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!--\s*ASTRO:REMOVE:START\s*-->.*?<!--\s*ASTRO:REMOVE:END\s*-->").unwrap()
});

static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

static NPM_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bnpm run\b").unwrap());

static NPM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bnpm\b").unwrap());

/// Remove every marker-delimited section and squeeze the blank lines left behind.
///
/// ```
/// use create_astro::template::strip_marker_sections;
///
/// let readme = "# App\n\n<!-- ASTRO:REMOVE:START -->\nRepo only\n<!-- ASTRO:REMOVE:END -->\n\nUsage";
/// assert_eq!(strip_marker_sections(readme), "# App\n\nUsage");
/// ```
pub fn strip_marker_sections(content: &str) -> String {
    let stripped = MARKER_SECTION.replace_all(content, "");
    EXCESS_NEWLINES.replace_all(&stripped, "\n\n").into_owned()
}

/// Respell npm commands for another package manager.
///
/// `npm run <script>` becomes `<pm> <script>` first, then any remaining
/// standalone `npm` becomes `<pm>`. Content is returned untouched for npm.
pub fn rewrite_package_manager_references(content: &str, pm: PackageManager) -> String {
    if pm.is_default() {
        return content.to_string();
    }

    let without_run = NPM_RUN.replace_all(content, pm.name());
    NPM.replace_all(&without_run, pm.name()).into_owned()
}

/// Full README pass: strip marker sections, then respell npm commands.
pub fn process_readme(content: &str, pm: PackageManager) -> String {
    rewrite_package_manager_references(&strip_marker_sections(content), pm)
}

#[cfg(test)]
mod tests {
    use super::*;

    const README: &str = "# Astro Starter Kit: Basics

```sh
npm create astro@latest -- --template basics
```

<!-- ASTRO:REMOVE:START -->

[![Open in StackBlitz](https://developer.stackblitz.com/img/open_in_stackblitz.svg)](https://stackblitz.com/github/withastro/astro/tree/latest/examples/basics)

<!-- ASTRO:REMOVE:END -->

> 🧑‍🚀 **Seasoned astronaut?** Delete this file. Have fun!

| Command           | Action                          |
| :---------------- | :------------------------------ |
| `npm install`     | Installs dependencies           |
| `npm run dev`     | Starts local dev server         |
| `npm run build`   | Build your production site      |
";

    #[test]
    fn strips_single_section() {
        let out = strip_marker_sections(README);
        assert!(!out.contains("StackBlitz"));
        assert!(!out.contains("ASTRO:REMOVE"));
        assert!(out.contains("Seasoned astronaut"));
        assert!(!out.contains("\n\n\n"));
    }

    #[test]
    fn strips_multiple_sections() {
        let input = "a\n<!-- ASTRO:REMOVE:START -->x<!-- ASTRO:REMOVE:END -->\nb\n<!-- ASTRO:REMOVE:START -->y<!-- ASTRO:REMOVE:END -->\nc";
        assert_eq!(strip_marker_sections(input), "a\n\nb\n\nc");
    }

    #[test]
    fn marker_matching_is_case_insensitive_and_whitespace_tolerant() {
        let input = "keep<!--astro:remove:start-->drop<!--   Astro:Remove:End   -->kept";
        assert_eq!(strip_marker_sections(input), "keepkept");
    }

    #[test]
    fn first_end_closes_section() {
        let input = "<!-- ASTRO:REMOVE:START -->a<!-- ASTRO:REMOVE:END -->b<!-- ASTRO:REMOVE:END -->";
        assert_eq!(strip_marker_sections(input), "b<!-- ASTRO:REMOVE:END -->");
    }

    #[test]
    fn unterminated_start_is_left_alone() {
        let input = "a <!-- ASTRO:REMOVE:START --> b";
        assert_eq!(strip_marker_sections(input), input);
    }

    #[test]
    fn collapses_existing_blank_runs() {
        assert_eq!(strip_marker_sections("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(strip_marker_sections("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn strip_is_idempotent() {
        let once = strip_marker_sections(README);
        assert_eq!(strip_marker_sections(&once), once);
    }

    #[test]
    fn npm_leaves_content_untouched() {
        let input = "Run `npm run dev` after `npm install`.";
        assert_eq!(
            rewrite_package_manager_references(input, PackageManager::Npm),
            input
        );
        assert_eq!(
            process_readme(README, PackageManager::Npm),
            strip_marker_sections(README)
        );
    }

    #[test]
    fn pnpm_rewrites_run_and_bare_npm() {
        let out = rewrite_package_manager_references("run npm install", PackageManager::Pnpm);
        assert_eq!(out, "run pnpm install");

        let out = rewrite_package_manager_references("`npm run dev`", PackageManager::Pnpm);
        assert_eq!(out, "`pnpm dev`");
    }

    #[test]
    fn yarn_rewrites_readme_table() {
        let out = process_readme(README, PackageManager::Yarn);
        assert!(out.contains("`yarn install`"));
        assert!(out.contains("`yarn dev`"));
        assert!(out.contains("`yarn build`"));
        assert!(out.contains("yarn create astro@latest"));
        assert!(!NPM.is_match(&out));
    }

    #[test]
    fn word_boundaries_protect_longer_tokens() {
        let input = "pnpm and npmrc and npx stay";
        assert_eq!(
            rewrite_package_manager_references(input, PackageManager::Bun),
            input
        );
    }
}
