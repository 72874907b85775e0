// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Chart operator command line entry point.
//!
//! Loads configuration, initialises logging and dispatches to the watch
//! registry commands.

mod cli_parser;

use std::path::PathBuf;
use std::process::ExitCode;

use chart_operator::cli::{self, EXIT_USAGE};
use chart_operator::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE};
use chart_operator::{telemetry, ConfigError, OperatorConfig};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");
    let rest = args.get(2..).unwrap_or(&[]);

    match command {
        "help" | "--help" | "-h" => {
            if let Some(sub) = args.get(2) {
                cli_parser::print_command_help(sub);
            } else {
                cli_parser::print_usage();
            }
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("chart-operator {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        "add-watch" => match cli::parse_add_watch(rest) {
            Ok(parsed) => with_config(|config| cli::run_add_watch(&parsed, config)),
            Err(e) => usage_error(command, &e),
        },
        "watches" => match cli::parse_watches(rest) {
            Ok(parsed) => with_config(|config| cli::run_watches(&parsed, config)),
            Err(e) => usage_error(command, &e),
        },
        _ => {
            eprintln!("Unknown command: {}", command);
            cli_parser::print_usage();
            ExitCode::from(EXIT_USAGE as u8)
        }
    }
}

fn load_config() -> Result<OperatorConfig, ConfigError> {
    let path = std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    OperatorConfig::load(path)?.apply_env()
}

fn with_config<F>(run: F) -> ExitCode
where
    F: FnOnce(&OperatorConfig) -> i32,
{
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(EXIT_USAGE as u8);
        }
    };
    telemetry::init(&config);
    ExitCode::from(run(&config) as u8)
}

fn usage_error(command: &str, err: &cli::UsageError) -> ExitCode {
    eprintln!("{}", err);
    cli_parser::print_command_help(command);
    ExitCode::from(EXIT_USAGE as u8)
}
