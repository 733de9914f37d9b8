//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing parsed flags to a command

use std::path::{Path, PathBuf};

use crate::cli::args::Cli;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::fetch::GitFetcher;
use crate::ui::UserInterface;

use super::completions::CompletionsCommand;
use super::create::CreateCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Dispatches parsed flags to their command.
pub struct CommandDispatcher {
    current_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the process working directory.
    pub fn new(current_dir: PathBuf) -> Self {
        Self { current_dir }
    }

    /// Get the working directory.
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Dispatch and execute a command.
    ///
    /// `--completions` short-circuits; everything else creates a project.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if let Some(shell) = cli.completions {
            return CompletionsCommand::new(shell).execute(ui);
        }

        let cmd = CreateCommand::new(
            ProjectContext::from_cli(cli),
            &self.current_dir,
            GitFetcher::default(),
        );
        cmd.execute(ui)
    }
}
