//! Shell completions generation.
//!
//! `create-astro --completions <SHELL>` prints a completion script.

use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

use crate::cli::args::Cli;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Binary name completions are registered for.
const BIN_NAME: &str = "create-astro";

/// The completions command implementation.
pub struct CompletionsCommand {
    shell: Shell,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(shell: Shell) -> Self {
        Self { shell }
    }

    /// Write the completion script to `out`.
    pub fn generate(&self, out: &mut dyn Write) {
        let mut cmd = Cli::command();
        clap_complete::generate(self.shell, &mut cmd, BIN_NAME, out);
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        self.generate(&mut std::io::stdout());
        Ok(CommandResult::success())
    }
}
