// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Formatting helpers for the watches command.

use crate::watches::{WatchEntry, WatchRegistry};

const DEFAULT_CHART_LABEL: &str = "(default)";

/// One listing line: `<gvk> -> <chart>`.
pub fn format_entry(entry: &WatchEntry) -> String {
    let chart = if entry.chart.is_empty() {
        DEFAULT_CHART_LABEL
    } else {
        entry.chart.as_str()
    };
    let mut line = format!("{} -> {}", entry.gvk(), chart);
    if let Some(period) = &entry.reconcile_period {
        line.push_str(&format!(" (every {})", period));
    }
    line
}

pub fn format_summary(registry: &WatchRegistry) -> String {
    let noun = if registry.len() == 1 { "watch" } else { "watches" };
    format!("{}: {} {} valid", registry.path().display(), registry.len(), noun)
}

/// Print every entry in document order.
pub fn print_watches(registry: &WatchRegistry) {
    if registry.is_empty() {
        println!("No watches in {}", registry.path().display());
        return;
    }
    for entry in registry.entries() {
        println!("{}", format_entry(entry));
    }
}
