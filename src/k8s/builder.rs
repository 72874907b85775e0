// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Ownership-injecting manifest builder.
//!
//! Wraps a [`ManifestBuilder`] (the capability that turns rendered manifest
//! text into objects) and runs the ownership decision over every object it
//! returns. Visitation is ordered and stops at the first error.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::ownership::{annotate, OwnershipError};
use super::scope::ScopeLookup;
use super::types::{OwnerDescriptor, RenderedObject};

/// Manifest parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("error parsing manifest: {0}")]
    Syntax(String),

    #[error("manifest document {index} is invalid: {reason}")]
    InvalidDocument { index: usize, reason: String },
}

/// Parses manifest text into an ordered list of objects.
pub trait ManifestBuilder {
    fn build(&self, manifest: &str, validate: bool) -> Result<Vec<Value>, ParseError>;
}

impl<T: ManifestBuilder + ?Sized> ManifestBuilder for &T {
    fn build(&self, manifest: &str, validate: bool) -> Result<Vec<Value>, ParseError> {
        (**self).build(manifest, validate)
    }
}

impl<T: ManifestBuilder + ?Sized> ManifestBuilder for Box<T> {
    fn build(&self, manifest: &str, validate: bool) -> Result<Vec<Value>, ParseError> {
        (**self).build(manifest, validate)
    }
}

/// Builder that marks every produced object as owned by one custom resource.
pub struct OwnerRefInjectingBuilder<B, L> {
    base: B,
    lookup: L,
    owner: OwnerDescriptor,
}

impl<B: ManifestBuilder, L: ScopeLookup> OwnerRefInjectingBuilder<B, L> {
    pub fn new(base: B, lookup: L, owner: OwnerDescriptor) -> Self {
        Self {
            base,
            lookup,
            owner,
        }
    }

    pub fn owner(&self) -> &OwnerDescriptor {
        &self.owner
    }

    /// Parse `manifest` and inject ownership into every object.
    ///
    /// Objects keep the order the underlying builder produced them in.
    ///
    /// # Errors
    /// Parse errors are returned unchanged as `OwnershipError::Parse`. The
    /// first per-object failure aborts the build; no partial list is returned.
    pub fn build(
        &self,
        manifest: &str,
        validate: bool,
    ) -> Result<Vec<RenderedObject>, OwnershipError> {
        let values = self.base.build(manifest, validate)?;

        let mut objects = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            let mut obj =
                RenderedObject::from_value(value).map_err(|e| OwnershipError::InvalidObject {
                    index,
                    reason: e.to_string(),
                })?;
            annotate(&self.lookup, &self.owner, &mut obj)?;
            objects.push(obj);
        }

        tracing::debug!(
            owner = %self.owner.gvk,
            owner_name = %self.owner.namespaced_name(),
            objects = objects.len(),
            "injected ownership into rendered manifest"
        );
        Ok(objects)
    }
}

/// Multi-document YAML manifest parser.
///
/// Empty and `null` documents are skipped; `*List` documents are flattened
/// into their items.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlManifestBuilder;

impl YamlManifestBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestBuilder for YamlManifestBuilder {
    fn build(&self, manifest: &str, validate: bool) -> Result<Vec<Value>, ParseError> {
        let mut objects = Vec::new();

        for (index, document) in serde_yaml::Deserializer::from_str(manifest).enumerate() {
            let value = Value::deserialize(document)
                .map_err(|e| ParseError::Syntax(format!("document {}: {}", index, e)))?;

            if value.is_null() {
                continue;
            }

            for object in flatten_list(value) {
                if validate {
                    validate_object(&object)
                        .map_err(|reason| ParseError::InvalidDocument { index, reason })?;
                }
                objects.push(object);
            }
        }

        Ok(objects)
    }
}

fn flatten_list(value: Value) -> Vec<Value> {
    let is_list = value
        .get("kind")
        .and_then(Value::as_str)
        .is_some_and(|kind| kind.ends_with("List"));

    if is_list {
        if let Some(Value::Array(items)) = value.get("items") {
            return items.clone();
        }
    }
    vec![value]
}

fn validate_object(object: &Value) -> Result<(), String> {
    if !object.is_object() {
        return Err("document is not a mapping".to_string());
    }

    let non_empty = |v: Option<&Value>| v.and_then(Value::as_str).is_some_and(|s| !s.is_empty());

    if !non_empty(object.get("apiVersion")) {
        return Err("apiVersion not set".to_string());
    }
    if !non_empty(object.get("kind")) {
        return Err("kind not set".to_string());
    }
    if !non_empty(object.get("metadata").and_then(|m| m.get("name"))) {
        return Err("metadata.name not set".to_string());
    }
    Ok(())
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
