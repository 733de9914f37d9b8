//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! picked by [`CommandDispatcher`] from the parsed flags.

pub mod completions;
pub mod create;
pub mod dispatcher;

pub use completions::CompletionsCommand;
pub use create::{CreateCommand, DEFAULT_DIRECTORY};
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
