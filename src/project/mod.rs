//! Project directory and naming helpers.

pub mod directory;
pub mod name;

pub use directory::{is_empty_dir, is_safe_entry};
pub use name::{is_valid_name, project_name_for, to_valid_name};
