// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Ownership decision for a single rendered object.
//!
//! When the owner may legally reference the object, the object gets a
//! controller reference. Otherwise it gets two tracking annotations that a
//! watch handler can map back to the owner.

use thiserror::Error;

use super::builder::ParseError;
use super::scope::{can_own, ScopeLookup, TypeResolutionError};
use super::types::{OwnerDescriptor, RenderedObject};

/// Annotation holding the owner's `<namespace>/<name>`.
pub const NAMESPACED_NAME_ANNOTATION: &str = "chart-operator.io/owned-by-namespaced-name";

/// Annotation holding the owner's `<kind>.<group>`.
pub const TYPE_ANNOTATION: &str = "chart-operator.io/owned-by-type";

/// Ownership injection errors.
#[derive(Debug, Error)]
pub enum OwnershipError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Failed to resolve ownership for {object}: {source}")]
    TypeResolution {
        object: String,
        #[source]
        source: TypeResolutionError,
    },

    #[error("Rendered object {index} is not a valid resource: {reason}")]
    InvalidObject { index: usize, reason: String },
}

/// Mark `obj` as owned by `owner`.
///
/// References to other owners are kept; only a reference carrying the
/// owner's uid is replaced.
///
/// # Errors
/// Returns `OwnershipError::TypeResolution` if either resource type is
/// unknown to `lookup`. `obj` is left untouched in that case.
pub fn annotate<L: ScopeLookup + ?Sized>(
    lookup: &L,
    owner: &OwnerDescriptor,
    obj: &mut RenderedObject,
) -> Result<(), OwnershipError> {
    let dependent_gvk = obj.gvk();
    let use_owner_ref = can_own(
        lookup,
        (&owner.gvk, owner.namespace.as_str()),
        (&dependent_gvk, obj.namespace()),
    )
    .map_err(|source| OwnershipError::TypeResolution {
        object: obj.describe(),
        source,
    })?;

    if use_owner_ref {
        set_owner_reference(owner, obj);
    } else {
        set_tracking_annotations(owner, obj);
    }
    Ok(())
}

fn set_owner_reference(owner: &OwnerDescriptor, obj: &mut RenderedObject) {
    let reference = owner.owner_reference();
    let refs = &mut obj.metadata.owner_references;
    refs.retain(|existing| existing.uid != reference.uid);
    refs.push(reference);
}

fn set_tracking_annotations(owner: &OwnerDescriptor, obj: &mut RenderedObject) {
    let annotations = &mut obj.metadata.annotations;
    annotations.insert(
        NAMESPACED_NAME_ANNOTATION.to_string(),
        owner.namespaced_name(),
    );
    annotations.insert(TYPE_ANNOTATION.to_string(), owner.gvk.group_kind());
}

#[cfg(test)]
#[path = "ownership_tests.rs"]
mod tests;
