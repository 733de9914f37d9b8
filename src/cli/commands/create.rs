//! Create command implementation.
//!
//! Walks through the project setup steps: intro, target directory, package
//! name, template choice, template copying and next steps.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::context::ProjectContext;
use crate::error::{CreateError, Result};
use crate::fetch::TemplateFetcher;
use crate::project::{is_empty_dir, project_name_for};
use crate::template::{ProvisionOutcome, Provisioner, DEFAULT_TEMPLATE, STARTERS};
use crate::ui::{Prompt, PromptOption, PromptType, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Directory offered when none was given.
pub const DEFAULT_DIRECTORY: &str = "./astro-app";

/// The create command implementation.
pub struct CreateCommand<F> {
    context: ProjectContext,
    current_dir: PathBuf,
    provisioner: Provisioner<F>,
}

impl<F: TemplateFetcher> CreateCommand<F> {
    /// Create a new create command.
    ///
    /// `current_dir` anchors relative targets, both for the emptiness check
    /// and for the download, and names projects created in `.`.
    pub fn new(context: ProjectContext, current_dir: &Path, fetcher: F) -> Self {
        Self {
            context,
            current_dir: current_dir.to_path_buf(),
            provisioner: Provisioner::new(fetcher).anchored_at(current_dir),
        }
    }

    /// Get the starting context.
    pub fn context(&self) -> &ProjectContext {
        &self.context
    }

    fn intro(&self, ui: &mut dyn UserInterface) {
        ui.show_header(&format!("create-astro v{}", env!("CARGO_PKG_VERSION")));
        if self.context.dry_run {
            ui.info("--dry-run", "Nothing will be written to disk");
        }
    }

    fn choose_directory(&self, ctx: &mut ProjectContext, ui: &mut dyn UserInterface) -> Result<()> {
        let mut candidate = if ctx.cwd.as_os_str().is_empty() {
            self.ask_directory(ctx, ui)?
        } else {
            ctx.cwd.clone()
        };

        loop {
            if is_empty_dir(&self.current_dir.join(&candidate))? {
                ui.info(
                    "dir",
                    &format!("Using {} as project directory", candidate.display()),
                );
                ctx.cwd = candidate;
                return Ok(());
            }

            ui.warning(&format!("Directory {} is not empty!", candidate.display()));
            if !ui.is_interactive() || ctx.yes || ctx.no {
                return Err(CreateError::DirectoryNotEmpty { path: candidate });
            }
            candidate = self.ask_directory(ctx, ui)?;
        }
    }

    fn ask_directory(&self, ctx: &ProjectContext, ui: &mut dyn UserInterface) -> Result<PathBuf> {
        if ctx.yes {
            return Ok(PathBuf::from(DEFAULT_DIRECTORY));
        }

        let answer = ui
            .prompt(&Prompt {
                key: "directory".to_string(),
                question: "Where should we create your new project?".to_string(),
                prompt_type: PromptType::Input,
                default: Some(DEFAULT_DIRECTORY.to_string()),
            })?
            .as_string();

        let answer = answer.trim();
        Ok(PathBuf::from(if answer.is_empty() {
            DEFAULT_DIRECTORY
        } else {
            answer
        }))
    }

    fn choose_name(&self, ctx: &mut ProjectContext) {
        ctx.project_name = project_name_for(&ctx.cwd, &self.current_dir);
        debug!(name = %ctx.project_name, "Derived package name");
    }

    fn choose_template(&self, ctx: &ProjectContext, ui: &mut dyn UserInterface) -> Result<String> {
        let given = ctx
            .template
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let template = match given {
            Some(t) => t.to_string(),
            None if ctx.yes => DEFAULT_TEMPLATE.to_string(),
            None => {
                let options = STARTERS
                    .iter()
                    .map(|s| PromptOption {
                        label: s.label.to_string(),
                        value: s.name.to_string(),
                    })
                    .collect();
                ui.prompt(&Prompt {
                    key: "template".to_string(),
                    question: "How would you like to start your new project?".to_string(),
                    prompt_type: PromptType::Select { options },
                    default: Some(DEFAULT_TEMPLATE.to_string()),
                })?
                .as_string()
            }
        };

        if template.is_empty() {
            return Err(CreateError::Cancelled);
        }

        ui.info("tmpl", &format!("Using {template} as project template"));
        Ok(template)
    }

    fn copy_template(
        &self,
        template: &str,
        ctx: &ProjectContext,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let mut spinner = ui.start_spinner("Template copying...");

        match self.provisioner.provision(template, ctx, ui) {
            Ok(ProvisionOutcome::Skipped) => {
                spinner.finish_skipped("Skipping template copying");
                Ok(())
            }
            Ok(ProvisionOutcome::Provisioned { locator }) => {
                debug!(%locator, "Template provisioned");
                spinner.finish_success("Template copied");
                Ok(())
            }
            Err(e) => {
                spinner.finish_error("Template copying failed");
                Err(e)
            }
        }
    }

    fn next_steps(&self, ctx: &ProjectContext, ui: &mut dyn UserInterface) {
        ui.success("Project initialized!");
        ui.info("next", "Liftoff confirmed. Explore your project!");

        if !ctx.is_current_dir() {
            ui.message(&format!(
                "  Enter your project directory using cd {}",
                ctx.cwd.display()
            ));
        }
        ui.message(&format!(
            "  Run {} to start the dev server. CTRL+C to stop.",
            ctx.package_manager.run_script("dev")
        ));
    }
}

impl<F: TemplateFetcher> Command for CreateCommand<F> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut ctx = self.context.clone();

        self.intro(ui);
        self.choose_directory(&mut ctx, ui)?;
        self.choose_name(&mut ctx);

        let template = self.choose_template(&ctx, ui)?;
        ctx.template = Some(template.clone());

        self.copy_template(&template, &ctx, ui)?;
        self.next_steps(&ctx, ui);

        Ok(CommandResult::success())
    }
}
