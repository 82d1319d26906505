//! Command-line interface
//!
//! Argument parsing, routing and one handler module per subcommand.

pub mod args;
pub mod commands;
pub mod router;

pub use args::{Cli, Commands};
pub use router::execute_command;
