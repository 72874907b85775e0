// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Watch registry: which chart is rendered for which resource type.

pub mod registry;
pub mod types;

pub use registry::{
    update_watch_for_resource_type, upsert_watch, WatchRegistry, DEFAULT_FILE_MODE, WATCHES_FILE,
};
pub use types::{WatchEntry, WatchError, DEFAULT_CHARTS_DIR};
