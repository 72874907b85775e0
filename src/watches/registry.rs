// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Watch document loading, merging and atomic persistence.
//!
//! The document is `<project>/watches.yaml`: a YAML sequence of entries,
//! unique by group/version/kind. Merging only appends. An existing entry is
//! never replaced, since it may carry hand-written overrides.
//!
//! No lock guards the document. Callers that may upsert concurrently for the
//! same project must serialize those calls.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::types::{WatchEntry, WatchError};
use crate::k8s::types::GroupVersionKind;
use crate::k8s::validation::{validate_chart_reference, validate_resource_type};

/// File name of the watch document inside a project.
pub const WATCHES_FILE: &str = "watches.yaml";

/// Permission mode for newly created watch documents.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

const DOCUMENT_MARKER: &str = "---\n";

/// In-memory view of one watch document.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchRegistry {
    path: PathBuf,
    entries: Vec<WatchEntry>,
}

impl WatchRegistry {
    /// Registry for a document that has not been written yet.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Load and validate an existing watch document.
    ///
    /// # Errors
    /// - `WatchError::Read` if the file cannot be read (including not found)
    /// - `WatchError::Malformed` if it is not a sequence of known entries
    /// - `WatchError::InvalidEntry` if an entry fails validation
    /// - `WatchError::Duplicate` if two entries share a resource type
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WatchError> {
        let path = path.as_ref().to_path_buf();
        let contents = fs::read_to_string(&path).map_err(|source| WatchError::Read {
            path: path.clone(),
            source,
        })?;

        let mut registry = Self::empty(path);
        for entry in parse_document(&registry.path, &contents)? {
            entry.validate().map_err(|source| WatchError::InvalidEntry {
                gvk: entry.gvk(),
                source,
            })?;
            registry.add(entry)?;
        }

        debug!(
            path = %registry.path.display(),
            entries = registry.entries.len(),
            "loaded watch document"
        );
        Ok(registry)
    }

    /// Like [`WatchRegistry::load`], but a missing file yields an empty registry.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Result<Self, WatchError> {
        match Self::load(path.as_ref()) {
            Err(err) if err.is_not_found() => Ok(Self::empty(path.as_ref())),
            other => other,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[WatchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, gvk: &GroupVersionKind) -> Option<&WatchEntry> {
        self.entries.iter().find(|entry| entry.gvk() == *gvk)
    }

    /// Append an entry after all existing ones.
    ///
    /// # Errors
    /// Returns `WatchError::Duplicate` if the resource type is already present.
    pub fn add(&mut self, entry: WatchEntry) -> Result<(), WatchError> {
        let gvk = entry.gvk();
        if self.find(&gvk).is_some() {
            warn!(gvk = %gvk, path = %self.path.display(), "refusing duplicate watch");
            return Err(WatchError::Duplicate(gvk));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Render the document text.
    pub fn to_yaml(&self) -> Result<String, WatchError> {
        let mut contents = String::from(DOCUMENT_MARKER);
        contents.push_str(&serde_yaml::to_string(&self.entries)?);
        Ok(contents)
    }

    /// Write the document atomically.
    ///
    /// The content goes to a temporary file in the same directory, which is
    /// synced and then renamed over the document. An existing document keeps
    /// its permissions; a new one gets [`DEFAULT_FILE_MODE`].
    pub fn save(&self) -> Result<(), WatchError> {
        let contents = self.to_yaml()?;
        write_atomic(&self.path, contents.as_bytes()).map_err(|source| WatchError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), entries = self.entries.len(), "saved watch document");
        Ok(())
    }
}

fn parse_document(path: &Path, contents: &str) -> Result<Vec<WatchEntry>, WatchError> {
    let malformed = |e: serde_yaml::Error| WatchError::Malformed {
        path: path.to_path_buf(),
        line: e.location().map(|loc| loc.line()),
        message: e.to_string(),
    };

    let mut documents = serde_yaml::Deserializer::from_str(contents);
    // Blank or comment-only text holds no document at all.
    let Some(document) = documents.next() else {
        return Ok(Vec::new());
    };
    let entries = Option::<Vec<WatchEntry>>::deserialize(document).map_err(malformed)?;

    // Later documents would be dropped on the next save. Empty ones carry
    // nothing and are tolerated.
    for (index, extra) in documents.enumerate() {
        let value = Option::<serde_yaml::Value>::deserialize(extra).map_err(malformed)?;
        if value.is_some_and(|value| !value.is_null()) {
            return Err(WatchError::Malformed {
                path: path.to_path_buf(),
                line: document_start_line(contents, index + 1),
                message: "expected a single sequence of watches, found another YAML document"
                    .to_string(),
            });
        }
    }
    Ok(entries.unwrap_or_default())
}

/// One-based line on which the document at `index` begins.
fn document_start_line(contents: &str, index: usize) -> Option<usize> {
    let mut current = 0;
    let mut open = false;
    for (i, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed == "..." {
            if open {
                current += 1;
                open = false;
            }
            continue;
        }
        let is_marker = trimmed == "---" || trimmed.starts_with("--- ");
        let is_content = !trimmed.is_empty() && !trimmed.starts_with('#');
        if is_marker && open {
            current += 1;
        }
        if is_marker || (is_content && !open) {
            open = true;
            if current == index {
                return Some(i + 1);
            }
        }
    }
    None
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let permissions = fs::metadata(path)
        .ok()
        .map(|meta| meta.permissions())
        .or_else(default_permissions);

    let mut tmp = tempfile::Builder::new()
        .prefix(".watches")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(DEFAULT_FILE_MODE))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

/// Register `gvk` in `<project_path>/watches.yaml`.
///
/// A missing document is created. Nothing is written if any step fails.
///
/// # Errors
/// Returns `WatchError::Duplicate` if the type is already watched, plus any
/// load or save error.
pub fn upsert_watch(
    gvk: &GroupVersionKind,
    chart: &str,
    project_path: impl AsRef<Path>,
) -> Result<(), WatchError> {
    let path = project_path.as_ref().join(WATCHES_FILE);
    let mut registry = WatchRegistry::load_or_empty(&path)?;
    registry.add(WatchEntry::new(gvk.clone(), chart))?;
    registry.save()
}

/// Scaffolding entry point: validate a new resource type and register it.
///
/// Calling this twice for the same type fails the second time with
/// `WatchError::Duplicate`.
pub fn update_watch_for_resource_type(
    gvk: &GroupVersionKind,
    project_path: impl AsRef<Path>,
    chart: &str,
) -> Result<(), WatchError> {
    validate_resource_type(gvk).map_err(WatchError::InvalidResource)?;
    validate_chart_reference(chart).map_err(WatchError::InvalidResource)?;

    let project_path = project_path.as_ref();
    upsert_watch(gvk, chart, project_path)?;

    let chart_label = if chart.is_empty() { "(default)" } else { chart };
    info!(
        gvk = %gvk,
        chart = chart_label,
        project = %project_path.display(),
        "registered watch"
    );
    Ok(())
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
