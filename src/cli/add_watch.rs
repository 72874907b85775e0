// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! `add-watch` command.

use crate::config::OperatorConfig;
use crate::watches::update_watch_for_resource_type;

use super::args::AddWatchArgs;
use super::{EXIT_FAILURE, EXIT_SUCCESS};

/// Register a resource type in the project's watch document.
pub fn run_add_watch(args: &AddWatchArgs, config: &OperatorConfig) -> i32 {
    let project = args.project.as_deref().unwrap_or(&config.project_dir);

    match update_watch_for_resource_type(&args.gvk, project, &args.chart) {
        Ok(()) => {
            println!("Added watch for {}", args.gvk);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_FAILURE
        }
    }
}
