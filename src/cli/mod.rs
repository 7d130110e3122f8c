//! Line-oriented shell driving one trip-request wizard.

pub mod commands;
pub mod core;
pub mod formatting;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;

pub use shell::{run_cli, SCRIPT_ENV};
