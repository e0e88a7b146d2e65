//! Command-line interface for lastfm-client.
//!
//! One subcommand per supported Last.fm method, printing text or JSON.

mod commands;

pub use commands::{Cli, Commands, OutputFormat, PeriodArg, run_command};
