//! Provisioning through the public API with an in-memory template source.

use std::cell::RefCell;
use std::fs;

use create_astro::cli::{Command, CreateCommand};
use create_astro::context::ProjectContext;
use create_astro::fetch::{DownloadOptions, TemplateFetcher};
use create_astro::package_manager::PackageManager;
use create_astro::template::{ProvisionOutcome, Provisioner};
use create_astro::ui::{MockUI, SpinnerStatus};
use create_astro::CreateError;
use tempfile::TempDir;

const README: &str = "# Astro Starter Kit: Basics

<!-- ASTRO:REMOVE:START -->
[![Open in StackBlitz](https://developer.stackblitz.com/img/open_in_stackblitz.svg)](https://stackblitz.com)
<!-- ASTRO:REMOVE:END -->

```sh
npm create astro@latest -- --template basics
```

| Command         | Action                          |
| :-------------- | :------------------------------ |
| `npm install`   | Installs dependencies           |
| `npm run dev`   | Starts local dev server         |
| `npm run build` | Build your production site      |
";

const MANIFEST: &str = "{\n\t\"name\": \"@example/basics\",\n\t\"type\": \"module\",\n\t\"version\": \"0.0.1\",\n\t\"private\": true,\n\t\"scripts\": {\n\t\t\"dev\": \"astro dev\"\n\t}\n}\n";

/// Serves a fixed starter and records every request.
#[derive(Default)]
struct FixtureFetcher {
    requests: RefCell<Vec<String>>,
}

impl TemplateFetcher for FixtureFetcher {
    fn download(&self, locator: &str, options: &DownloadOptions) -> anyhow::Result<()> {
        self.requests.borrow_mut().push(locator.to_string());
        if locator.contains("does-not-exist") {
            anyhow::bail!("Failed to download {locator}: 404 Not Found");
        }

        let dest = options.destination();
        fs::create_dir_all(dest.join(".codesandbox"))?;
        fs::write(dest.join(".codesandbox/environment.json"), "{}")?;
        fs::write(dest.join("CHANGELOG.md"), "# @example/basics\n")?;
        fs::write(dest.join("README.md"), README)?;
        fs::write(dest.join("package.json"), MANIFEST)?;
        fs::create_dir_all(dest.join("src/pages"))?;
        fs::write(dest.join("src/pages/index.astro"), "<h1>Astro</h1>\n")?;
        Ok(())
    }
}

#[test]
fn yarn_project_end_to_end() {
    let temp = TempDir::new().unwrap();
    let app = temp.path().join("my-app");
    let ctx = ProjectContext {
        cwd: app.clone(),
        package_manager: PackageManager::Yarn,
        project_name: "my-app".to_string(),
        ..Default::default()
    };
    let provisioner = Provisioner::new(FixtureFetcher::default());
    let mut ui = MockUI::new();

    let outcome = provisioner.provision("basics", &ctx, &mut ui).unwrap();

    assert_eq!(
        outcome,
        ProvisionOutcome::Provisioned {
            locator: "github:withastro/astro#examples/basics".to_string()
        }
    );

    let readme = fs::read_to_string(app.join("README.md")).unwrap();
    assert!(!readme.contains("StackBlitz"));
    assert!(!readme.contains("ASTRO:REMOVE"));
    assert!(readme.contains("| `yarn install`   |"));
    assert!(readme.contains("| `yarn dev`   |"));
    assert!(readme.contains("| `yarn build` |"));
    assert!(readme.contains("yarn create astro@latest"));
    assert!(!readme.contains("\n\n\n"));

    let manifest = fs::read_to_string(app.join("package.json")).unwrap();
    assert_eq!(
        manifest,
        "{\n\t\"name\": \"my-app\",\n\t\"type\": \"module\",\n\t\"version\": \"0.0.1\",\n\t\"scripts\": {\n\t\t\"dev\": \"astro dev\"\n\t}\n}"
    );

    assert!(!app.join("CHANGELOG.md").exists());
    assert!(!app.join(".codesandbox").exists());
    assert!(app.join("src/pages/index.astro").exists());
    assert!(ui.errors().is_empty());
}

#[test]
fn pinned_ref_reaches_the_fetcher() {
    let temp = TempDir::new().unwrap();
    let ctx = ProjectContext {
        cwd: temp.path().join("site"),
        git_ref: "4.2.0".to_string(),
        project_name: "site".to_string(),
        ..Default::default()
    };
    let provisioner = Provisioner::new(FixtureFetcher::default());
    let mut ui = MockUI::new();

    provisioner.provision("blog", &ctx, &mut ui).unwrap();

    assert_eq!(
        *provisioner.fetcher().requests.borrow(),
        ["github:withastro/astro/examples/blog#4.2.0"]
    );
}

#[test]
fn missing_template_is_reported_and_cleaned_up() {
    let temp = TempDir::new().unwrap();
    let app = temp.path().join("app");
    fs::create_dir(&app).unwrap();
    let ctx = ProjectContext {
        cwd: app.clone(),
        project_name: "app".to_string(),
        ..Default::default()
    };
    let provisioner = Provisioner::new(FixtureFetcher::default());
    let mut ui = MockUI::new();

    let err = provisioner
        .provision("does-not-exist", &ctx, &mut ui)
        .unwrap_err();

    assert!(matches!(err, CreateError::TemplateNotFound { .. }));
    assert_eq!(err.to_string(), "Template does-not-exist does not exist!");
    assert!(!app.exists());
    assert!(ui.errors().is_empty());
}

#[test]
fn create_command_runs_every_step() {
    let temp = TempDir::new().unwrap();
    let ctx = ProjectContext {
        cwd: temp.path().join("launchpad"),
        template: Some("basics".to_string()),
        package_manager: PackageManager::Bun,
        yes: true,
        ..Default::default()
    };
    let cmd = CreateCommand::new(ctx, temp.path(), FixtureFetcher::default());
    let mut ui = MockUI::new();

    let result = cmd.execute(&mut ui).unwrap();

    assert!(result.success);
    let manifest = fs::read_to_string(temp.path().join("launchpad/package.json")).unwrap();
    assert!(manifest.contains("\"name\": \"launchpad\""));
    let readme = fs::read_to_string(temp.path().join("launchpad/README.md")).unwrap();
    assert!(readme.contains("`bun dev`"));

    assert_eq!(ui.headers().len(), 1);
    assert!(ui.has_info("Using basics as project template"));
    assert!(ui.has_message("Run bun dev to start the dev server"));
    assert_eq!(ui.spinners()[0].status, Some(SpinnerStatus::Success));
}
