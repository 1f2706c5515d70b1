//! Command-line interface.

pub mod args;
pub mod commands;

pub use args::{CatalogCommands, Cli, Commands, InitArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
