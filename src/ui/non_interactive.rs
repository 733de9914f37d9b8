//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use anyhow::anyhow;

use crate::error::{CreateError, Result};

use super::theme::Theme;
use super::{parse_confirm, OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Prefix of environment variables that answer prompts by key.
pub const PROMPT_ENV_PREFIX: &str = "CREATE_ASTRO_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `CREATE_ASTRO_PROMPT_<KEY>` variables, then
/// from the prompt default. A prompt with neither is an error.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: Theme,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            theme: Theme::plain(),
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn info(&mut self, label: &str, msg: &str) {
        if self.mode.shows_info() {
            println!("{}", self.theme.format_info(label, msg));
        }
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        let answer = self
            .env_overrides
            .get(&env_key)
            .or(prompt.default.as_ref())
            .cloned()
            .ok_or_else(|| {
                CreateError::Other(anyhow!(
                    "Cannot prompt for '{}' in non-interactive mode (no default value)",
                    prompt.key
                ))
            })?;

        Ok(match prompt.prompt_type {
            PromptType::Confirm => PromptResult::Bool(parse_confirm(&answer)),
            PromptType::Input | PromptType::Select { .. } => PromptResult::String(answer),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        println!("{}", message);
        Box::new(NoopSpinner {
            theme: self.theme.clone(),
        })
    }

    fn show_header(&mut self, title: &str) {
        println!("\n{}\n", self.theme.format_header(title));
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that does not animate, printing only its final line.
struct NoopSpinner {
    theme: Theme,
}

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn finish_error(&mut self, msg: &str) {
        println!("{}", self.theme.format_error(msg));
    }

    fn finish_skipped(&mut self, msg: &str) {
        println!("{}", self.theme.format_skipped(msg));
    }
}
