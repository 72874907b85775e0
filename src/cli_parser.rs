// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Help text for chart-operator-cli.

/// Print general usage information.
pub fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "chart-operator - watch registry tooling for chart-backed operators v{}

USAGE:
    chart-operator-cli <COMMAND> [OPTIONS]

COMMANDS:
    add-watch    Register a resource type in watches.yaml
    watches      List or validate the watch document
    version      Show version information
    help         Show this help message

OPTIONS:
    -h, --help     Show help for command
    -V, --version  Show version information

EXAMPLES:
    chart-operator-cli add-watch --group app.example.com --version v1alpha1 --kind App
    chart-operator-cli add-watch --version v1 --kind ConfigMap --chart helm-charts/cm
    chart-operator-cli watches list
    chart-operator-cli watches validate --project ./my-operator

ENVIRONMENT:
    CHART_OPERATOR_CONFIG       Configuration file (default: chart-operator.toml)
    CHART_OPERATOR_PROJECT_DIR  Project directory holding watches.yaml
    CHART_OPERATOR_LOG_LEVEL    Log filter when RUST_LOG is unset
    CHART_OPERATOR_LOG_FORMAT   Log format (text, json)
    RUST_LOG                    Log filter (debug, info, warn, error)

EXIT CODES:
    0  Success
    1  Operation failed
    2  Usage or configuration error
",
        version
    );
}

/// Print detailed help for a specific command.
pub fn print_command_help(command: &str) {
    match command {
        "add-watch" => print_add_watch_help(),
        "watches" => print_watches_help(),
        _ => {
            eprintln!(
                "No detailed help available for '{}'. Use 'chart-operator-cli help' for general usage.",
                command
            );
        }
    }
}

fn print_add_watch_help() {
    eprintln!(
        "chart-operator-cli add-watch - Register a resource type

USAGE:
    chart-operator-cli add-watch --version <VERSION> --kind <KIND> [OPTIONS]

OPTIONS:
    --group <GROUP>    API group (omit for the core group)
    --version <VER>    API version, e.g. v1alpha1
    --kind <KIND>      Resource kind, e.g. App
    --chart <CHART>    Chart location (default: helm-charts/<kind>)
    --project <DIR>    Project directory (overrides configuration)

DESCRIPTION:
    Appends an entry to <project>/watches.yaml, creating the file if needed.
    Fails without writing if the resource type is already watched.

EXIT CODES:
    0  Watch registered
    1  Invalid resource type, duplicate, or unreadable document
    2  Usage or configuration error
"
    );
}

fn print_watches_help() {
    eprintln!(
        "chart-operator-cli watches - Inspect the watch document

USAGE:
    chart-operator-cli watches [SUBCOMMAND] [OPTIONS]

SUBCOMMANDS:
    list           List watched resource types (default)
    validate       Check the document and report the entry count

OPTIONS:
    --project <DIR>  Project directory (overrides configuration)
"
    );
}
