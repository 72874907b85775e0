// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Watch entries and watch registry errors.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::k8s::types::GroupVersionKind;
use crate::k8s::validation::{validate_chart_reference, validate_loaded_identity, ValidationError};

/// Directory holding charts when an entry names none.
pub const DEFAULT_CHARTS_DIR: &str = "helm-charts";

/// One resource type watched by the operator and the chart rendered for it.
///
/// Field names match the persisted watch document; unknown fields are
/// rejected when loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WatchEntry {
    #[serde(default)]
    pub group: String,
    pub version: String,
    pub kind: String,
    /// Chart location. Empty selects the default location for the kind.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chart: String,
    /// Resync interval, e.g. `30s` or `1h30m`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconcile_period: Option<String>,
    /// Values forced onto every release of this type.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub override_values: BTreeMap<String, serde_yaml::Value>,
}

impl WatchEntry {
    pub fn new(gvk: GroupVersionKind, chart: impl Into<String>) -> Self {
        Self {
            group: gvk.group,
            version: gvk.version,
            kind: gvk.kind,
            chart: chart.into(),
            reconcile_period: None,
            override_values: BTreeMap::new(),
        }
    }

    pub fn gvk(&self) -> GroupVersionKind {
        GroupVersionKind::new(&self.group, &self.version, &self.kind)
    }

    /// Parsed reconcile period, if one is set.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidReconcilePeriod` if the value does
    /// not parse as a duration.
    pub fn reconcile_period(&self) -> Result<Option<Duration>, ValidationError> {
        match &self.reconcile_period {
            None => Ok(None),
            Some(raw) => humantime::parse_duration(raw)
                .map(Some)
                .map_err(|e| ValidationError::InvalidReconcilePeriod(format!("{}: {}", raw, e))),
        }
    }

    /// Conventional chart location for this kind: `helm-charts/<kind>`.
    pub fn default_chart_dir(&self) -> String {
        format!("{}/{}", DEFAULT_CHARTS_DIR, self.kind.to_lowercase())
    }

    /// Check an entry read back from a watch document.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_loaded_identity(&self.gvk())?;
        validate_chart_reference(&self.chart)?;
        self.reconcile_period()?;
        Ok(())
    }
}

/// Watch registry errors.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to read watch manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write watch manifest {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to unmarshal watch config yaml {}{}: {message}", .path.display(), line_suffix(.line))]
    Malformed {
        path: PathBuf,
        line: Option<usize>,
        message: String,
    },

    #[error("duplicate GVK: {0}")]
    Duplicate(GroupVersionKind),

    #[error("invalid watch for {gvk}: {source}")]
    InvalidEntry {
        gvk: GroupVersionKind,
        source: ValidationError,
    },

    #[error("invalid resource type: {0}")]
    InvalidResource(#[source] ValidationError),

    #[error("failed to marshal watch config yaml: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl WatchError {
    /// True when the watch document does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" (line {})", line),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
