// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Validation functions for resource type identities and chart references.
//!
//! The strict rules apply to resource types declared through scaffolding.
//! Entries loaded from an existing watch document only need a version and a
//! kind, so hand-edited documents keep loading.

use super::types::GroupVersionKind;

/// Maximum length of a kind name.
pub const MAX_KIND_LENGTH: usize = 63;

/// Maximum length of an API group (DNS subdomain).
pub const MAX_GROUP_LENGTH: usize = 253;

/// Maximum length of a chart reference.
const MAX_CHART_LENGTH: usize = 1024;

/// Validation error types.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is empty but required.
    EmptyField(String),
    /// Field exceeds maximum length.
    MaxLengthExceeded { field: String, max: usize },
    /// Kind is not an upper camel case identifier.
    InvalidKind(String),
    /// Version does not follow the `v1`, `v1alpha1`, `v2beta3` scheme.
    InvalidVersion(String),
    /// Group is not a lowercase DNS subdomain.
    InvalidGroup(String),
    /// Chart reference cannot be used as a path.
    InvalidChart(String),
    /// Reconcile period does not parse as a duration.
    InvalidReconcilePeriod(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "Field '{}' cannot be empty", field),
            Self::MaxLengthExceeded { field, max } => {
                write!(f, "Field '{}' exceeds maximum length of {}", field, max)
            }
            Self::InvalidKind(msg) => write!(f, "Invalid kind: {}", msg),
            Self::InvalidVersion(msg) => write!(f, "Invalid version: {}", msg),
            Self::InvalidGroup(msg) => write!(f, "Invalid group: {}", msg),
            Self::InvalidChart(msg) => write!(f, "Invalid chart reference: {}", msg),
            Self::InvalidReconcilePeriod(msg) => write!(f, "Invalid reconcile period: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a kind name.
///
/// Must start with an uppercase ASCII letter; alphanumerics only.
pub fn validate_kind(kind: &str) -> Result<(), ValidationError> {
    if kind.is_empty() {
        return Err(ValidationError::EmptyField("kind".to_string()));
    }

    if kind.len() > MAX_KIND_LENGTH {
        return Err(ValidationError::MaxLengthExceeded {
            field: "kind".to_string(),
            max: MAX_KIND_LENGTH,
        });
    }

    if !kind.starts_with(|c: char| c.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidKind(format!(
            "{}: must start with an uppercase letter",
            kind
        )));
    }

    if !kind.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidKind(format!(
            "{}: must contain only alphanumeric characters",
            kind
        )));
    }

    Ok(())
}

/// Validate an API version such as `v1`, `v1alpha1` or `v2beta3`.
pub fn validate_version(version: &str) -> Result<(), ValidationError> {
    if version.is_empty() {
        return Err(ValidationError::EmptyField("version".to_string()));
    }

    let invalid = || {
        ValidationError::InvalidVersion(format!(
            "{}: must match v<N>, v<N>alpha<M> or v<N>beta<M>",
            version
        ))
    };

    let rest = version.strip_prefix('v').ok_or_else(invalid)?;
    let major_len = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if major_len == 0 || rest.starts_with('0') {
        return Err(invalid());
    }

    let suffix = &rest[major_len..];
    if suffix.is_empty() {
        return Ok(());
    }

    let stage = suffix
        .strip_prefix("alpha")
        .or_else(|| suffix.strip_prefix("beta"))
        .ok_or_else(invalid)?;
    if stage.is_empty() || stage.starts_with('0') || !stage.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    Ok(())
}

/// Validate an API group. The empty string is the core group.
pub fn validate_group(group: &str) -> Result<(), ValidationError> {
    if group.is_empty() {
        return Ok(());
    }

    if group.len() > MAX_GROUP_LENGTH {
        return Err(ValidationError::MaxLengthExceeded {
            field: "group".to_string(),
            max: MAX_GROUP_LENGTH,
        });
    }

    for label in group.split('.') {
        if label.is_empty() {
            return Err(ValidationError::InvalidGroup(format!(
                "{}: contains an empty label",
                group
            )));
        }

        let valid_chars = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-';
        if !label.chars().all(valid_chars) {
            return Err(ValidationError::InvalidGroup(format!(
                "{}: labels must be lowercase alphanumerics or dashes",
                group
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(ValidationError::InvalidGroup(format!(
                "{}: labels cannot start or end with a dash",
                group
            )));
        }
    }

    Ok(())
}

/// Validate a chart reference. Empty selects the default chart location.
pub fn validate_chart_reference(chart: &str) -> Result<(), ValidationError> {
    if chart.len() > MAX_CHART_LENGTH {
        return Err(ValidationError::MaxLengthExceeded {
            field: "chart".to_string(),
            max: MAX_CHART_LENGTH,
        });
    }

    if chart.contains('\0') {
        return Err(ValidationError::InvalidChart(
            "contains null byte".to_string(),
        ));
    }

    Ok(())
}

/// Validate a resource type declared through scaffolding.
pub fn validate_resource_type(gvk: &GroupVersionKind) -> Result<(), ValidationError> {
    validate_group(&gvk.group)?;
    validate_version(&gvk.version)?;
    validate_kind(&gvk.kind)?;
    Ok(())
}

/// Minimal check for an identity read back from a watch document.
pub fn validate_loaded_identity(gvk: &GroupVersionKind) -> Result<(), ValidationError> {
    if gvk.version.is_empty() {
        return Err(ValidationError::EmptyField("version".to_string()));
    }
    if gvk.kind.is_empty() {
        return Err(ValidationError::EmptyField("kind".to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
