// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Command implementations for `chart-operator-cli`.
//!
//! Each command returns a process exit code. Errors are printed to stderr
//! using the library error's own message.

pub mod add_watch;
pub mod args;
pub mod watches_cmd;
pub mod watches_format;

pub use add_watch::run_add_watch;
pub use args::{parse_add_watch, parse_watches, AddWatchArgs, UsageError, WatchesAction, WatchesArgs};
pub use watches_cmd::run_watches;

/// Command completed.
pub const EXIT_SUCCESS: i32 = 0;
/// The requested operation failed.
pub const EXIT_FAILURE: i32 = 1;
/// Bad arguments or configuration.
pub const EXIT_USAGE: i32 = 2;
