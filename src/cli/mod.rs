//! Command-line interface for Landmark.
//!
//! This module provides a small CLI over the library for working with JSON
//! exports of the route, user and comment tables, and for previewing SOQL.

pub mod args;
pub mod commands;
pub mod utils;

use crate::{Config, Result};

pub use args::{Command, RouteView};

/// Main entry point for the CLI application
pub fn run(config: &Config) -> Result<()> {
    let command = match args::parse_args() {
        Ok(cmd) => cmd,
        Err(e) => {
            args::print_usage();
            return Err(e);
        }
    };

    if let Some(output) = execute(config, command)? {
        println!("{}", output);
    }

    Ok(())
}

/// Runs a parsed command, returning what should be printed.
pub fn execute(config: &Config, command: Command) -> Result<Option<String>> {
    let output = match command {
        Command::Routes {
            routes_file,
            user_file,
            view,
        } => commands::routes(config, &routes_file, &user_file, &view)?,
        Command::Comments {
            comments_file,
            scroll_to,
        } => commands::comments(&comments_file, scroll_to.as_deref())?,
        Command::Soql {
            object,
            fields,
            limit,
        } => commands::soql(&object, &fields, limit)?,
        Command::Help => {
            args::print_usage();
            return Ok(None);
        }
    };

    Ok(Some(output))
}
