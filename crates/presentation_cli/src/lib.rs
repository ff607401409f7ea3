//! WaterOps command-line client
//!
//! Argument definitions and command execution; the binary in `main.rs`
//! wires them to configuration, logging and the terminal.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands, log_filter_from_verbosity};
pub use commands::execute;
