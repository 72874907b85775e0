// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Flag parsing for the CLI subcommands.
//!
//! Parsers receive the arguments that follow the command name.

use std::path::PathBuf;

use thiserror::Error;

use crate::k8s::types::GroupVersionKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Unknown argument: {0}")]
    UnknownArgument(String),

    #[error("Missing required option {0}")]
    MissingRequired(&'static str),

    #[error("Unknown watches subcommand: {0}")]
    UnknownSubcommand(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddWatchArgs {
    pub gvk: GroupVersionKind,
    pub chart: String,
    /// Overrides the configured project directory.
    pub project: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchesAction {
    List,
    Validate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchesArgs {
    pub action: WatchesAction,
    pub project: Option<PathBuf>,
}

fn take_value(args: &[String], i: usize) -> Result<String, UsageError> {
    args.get(i + 1)
        .cloned()
        .ok_or_else(|| UsageError::MissingValue(args[i].clone()))
}

/// Parse `--group G --version V --kind K [--chart C] [--project DIR]`.
///
/// `--group` may be omitted for the core group.
pub fn parse_add_watch(args: &[String]) -> Result<AddWatchArgs, UsageError> {
    let mut group = String::new();
    let mut version = None;
    let mut kind = None;
    let mut chart = String::new();
    let mut project = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--group" => group = take_value(args, i)?,
            "--version" => version = Some(take_value(args, i)?),
            "--kind" => kind = Some(take_value(args, i)?),
            "--chart" => chart = take_value(args, i)?,
            "--project" => project = Some(PathBuf::from(take_value(args, i)?)),
            other => return Err(UsageError::UnknownArgument(other.to_string())),
        }
        i += 2;
    }

    let version = version.ok_or(UsageError::MissingRequired("--version"))?;
    let kind = kind.ok_or(UsageError::MissingRequired("--kind"))?;
    Ok(AddWatchArgs {
        gvk: GroupVersionKind::new(group, version, kind),
        chart,
        project,
    })
}

/// Parse `[list|validate] [--project DIR]`. The action defaults to `list`.
pub fn parse_watches(args: &[String]) -> Result<WatchesArgs, UsageError> {
    let mut rest = args;
    let action = match args.first().map(|s| s.as_str()) {
        Some("list") => {
            rest = &args[1..];
            WatchesAction::List
        }
        Some("validate") => {
            rest = &args[1..];
            WatchesAction::Validate
        }
        Some(sub) if !sub.starts_with("--") => {
            return Err(UsageError::UnknownSubcommand(sub.to_string()))
        }
        _ => WatchesAction::List,
    };

    let mut project = None;
    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--project" => project = Some(PathBuf::from(take_value(rest, i)?)),
            other => return Err(UsageError::UnknownArgument(other.to_string())),
        }
        i += 2;
    }

    Ok(WatchesArgs { action, project })
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
