//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use create_astro::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("template", "blog");
//!
//! ui.info("tmpl", "Using blog as project template");
//! ui.success("Template copied");
//!
//! assert!(ui.has_info("Using blog"));
//! assert!(ui.successes().contains(&"Template copied".to_string()));
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::error::Result;

use super::{parse_confirm, OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
///
/// Captures all UI interactions and allows pre-configured prompt responses,
/// either single (via `set_prompt_response`) or queued (via
/// `queue_prompt_responses`) for keys asked more than once.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    infos: Vec<(String, String)>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<Rc<RefCell<MockSpinnerState>>>,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order. After the queue is exhausted,
    /// falls back to `set_prompt_response` or defaults.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured info lines as (label, message).
    pub fn infos(&self) -> &[(String, String)] {
        &self.infos
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Snapshot of every spinner started so far.
    pub fn spinners(&self) -> Vec<MockSpinnerState> {
        self.spinners.iter().map(|s| s.borrow().clone()).collect()
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if an info line contained `msg`.
    pub fn has_info(&self, msg: &str) -> bool {
        self.infos.iter().any(|(_, m)| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    fn next_response(&mut self, key: &str) -> Option<String> {
        if let Some(response) = self.prompt_queues.get_mut(key).and_then(|q| q.pop_front()) {
            return Some(response);
        }
        self.prompt_responses.get(key).cloned()
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn info(&mut self, label: &str, msg: &str) {
        self.infos.push((label.to_string(), msg.to_string()));
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        let is_confirm = matches!(prompt.prompt_type, PromptType::Confirm);
        let answer = self
            .next_response(&prompt.key)
            .or_else(|| prompt.default.clone());

        Ok(match (answer, is_confirm) {
            (Some(a), true) => PromptResult::Bool(parse_confirm(&a)),
            (Some(a), false) => PromptResult::String(a),
            (None, true) => PromptResult::Bool(false),
            (None, false) => PromptResult::String(String::new()),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let state = Rc::new(RefCell::new(MockSpinnerState {
            started: message.to_string(),
            ..Default::default()
        }));
        self.spinners.push(Rc::clone(&state));
        Box::new(MockSpinner { state })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// What a mock spinner went through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockSpinnerState {
    /// Message the spinner started with.
    pub started: String,
    /// Messages set while spinning.
    pub messages: Vec<String>,
    /// Final message, once finished.
    pub finish_message: Option<String>,
    /// Final status, once finished.
    pub status: Option<SpinnerStatus>,
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
    /// Finished as skipped.
    Skipped,
}

/// Mock spinner that records into state shared with its [`MockUI`].
#[derive(Debug)]
pub struct MockSpinner {
    state: Rc<RefCell<MockSpinnerState>>,
}

impl MockSpinner {
    fn finish(&mut self, msg: &str, status: SpinnerStatus) {
        let mut state = self.state.borrow_mut();
        state.finish_message = Some(msg.to_string());
        state.status = Some(status);
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.state.borrow_mut().messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish(msg, SpinnerStatus::Success);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(msg, SpinnerStatus::Error);
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.finish(msg, SpinnerStatus::Skipped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptOption;

    fn input(key: &str, default: Option<&str>) -> Prompt {
        Prompt {
            key: key.to_string(),
            question: "Where should we create your new project?".to_string(),
            prompt_type: PromptType::Input,
            default: default.map(String::from),
        }
    }

    #[test]
    fn mock_ui_captures_messages() {
        let mut ui = MockUI::new();

        ui.message("Hello");
        ui.info("dir", "Using ./app");
        ui.success("Done");
        ui.warning("Be careful");
        ui.error("Oops");

        assert_eq!(ui.messages(), &["Hello"]);
        assert_eq!(ui.infos(), &[("dir".to_string(), "Using ./app".to_string())]);
        assert_eq!(ui.successes(), &["Done"]);
        assert_eq!(ui.warnings(), &["Be careful"]);
        assert_eq!(ui.errors(), &["Oops"]);
    }

    #[test]
    fn mock_ui_prompt_with_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("directory", "./site");

        let result = ui.prompt(&input("directory", None)).unwrap();

        assert_eq!(result.as_string(), "./site");
        assert_eq!(ui.prompts_shown(), &["directory"]);
    }

    #[test]
    fn mock_ui_prompt_falls_back_to_default() {
        let mut ui = MockUI::new();

        let result = ui.prompt(&input("directory", Some("./astro-app"))).unwrap();

        assert_eq!(result.as_string(), "./astro-app");
    }

    #[test]
    fn mock_ui_queued_responses_come_first() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("directory", "./fallback");
        ui.queue_prompt_responses("directory", vec!["./first", "./second"]);

        let answers: Vec<String> = (0..3)
            .map(|_| ui.prompt(&input("directory", None)).unwrap().as_string())
            .collect();

        assert_eq!(answers, ["./first", "./second", "./fallback"]);
    }

    #[test]
    fn mock_ui_confirm_parses_answer() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("overwrite", "yes");
        let prompt = Prompt {
            key: "overwrite".to_string(),
            question: "Continue?".to_string(),
            prompt_type: PromptType::Confirm,
            default: None,
        };

        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(true));
    }

    #[test]
    fn mock_ui_select_without_answer_is_empty() {
        let mut ui = MockUI::new();
        let prompt = Prompt {
            key: "template".to_string(),
            question: "Template?".to_string(),
            prompt_type: PromptType::Select {
                options: vec![PromptOption {
                    label: "Blog".to_string(),
                    value: "blog".to_string(),
                }],
            },
            default: None,
        };

        assert_eq!(ui.prompt(&prompt).unwrap().as_string(), "");
    }

    #[test]
    fn mock_ui_records_spinner_lifecycle() {
        let mut ui = MockUI::new();

        let mut spinner = ui.start_spinner("Template copying...");
        spinner.set_message("Still copying...");
        spinner.finish_success("Template copied");

        let spinners = ui.spinners();
        assert_eq!(spinners.len(), 1);
        assert_eq!(spinners[0].started, "Template copying...");
        assert_eq!(spinners[0].messages, ["Still copying..."]);
        assert_eq!(spinners[0].finish_message.as_deref(), Some("Template copied"));
        assert_eq!(spinners[0].status, Some(SpinnerStatus::Success));
    }

    #[test]
    fn mock_ui_interactive_flag() {
        let mut ui = MockUI::new();
        assert!(!ui.is_interactive());
        ui.set_interactive(true);
        assert!(ui.is_interactive());
    }
}
