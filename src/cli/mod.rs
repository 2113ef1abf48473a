//! Command-line interface definitions and helpers.
//!
//! This module contains the CLI arguments, enums, settings resolution and
//! subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, Command, ConfigAction};
pub use commands::{handle_config_action, show_settings};
pub use enums::CharacterSet;
