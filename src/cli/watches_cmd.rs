// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! `watches` command: inspect the project's watch document.

use crate::config::OperatorConfig;
use crate::watches::{WatchRegistry, WATCHES_FILE};

use super::args::{WatchesAction, WatchesArgs};
use super::watches_format::{format_summary, print_watches};
use super::{EXIT_FAILURE, EXIT_SUCCESS};

/// Strictly load the watch document and list or validate it.
pub fn run_watches(args: &WatchesArgs, config: &OperatorConfig) -> i32 {
    let path = match &args.project {
        Some(project) => project.join(WATCHES_FILE),
        None => config.watches_path(),
    };

    let registry = match WatchRegistry::load(&path) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_FAILURE;
        }
    };

    match args.action {
        WatchesAction::List => print_watches(&registry),
        WatchesAction::Validate => println!("{}", format_summary(&registry)),
    }
    EXIT_SUCCESS
}

#[cfg(test)]
#[path = "watches_cmd_tests.rs"]
mod tests;
