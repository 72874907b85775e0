// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Resource scope resolution and the owner-reference legality check.
//!
//! Scope comes from a [`ScopeLookup`] capability (discovery, a REST mapper,
//! or the static catalog below). Nothing here caches lookups.

use std::collections::HashMap;

use thiserror::Error;

use super::types::GroupVersionKind;

/// Whether instances of a resource type are namespaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeInfo {
    pub is_cluster_scoped: bool,
}

impl ScopeInfo {
    pub const CLUSTER: ScopeInfo = ScopeInfo {
        is_cluster_scoped: true,
    };
    pub const NAMESPACED: ScopeInfo = ScopeInfo {
        is_cluster_scoped: false,
    };
}

/// The resource type is unknown to the cluster or catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeResolutionError {
    #[error("no matches for kind \"{}\" in version \"{}\"", .0.kind, .0.api_version())]
    NoMatch(GroupVersionKind),

    #[error("scope lookup failed for {gvk}: {reason}")]
    Lookup {
        gvk: GroupVersionKind,
        reason: String,
    },
}

/// Resolves the scope of a resource type.
pub trait ScopeLookup {
    fn resolve(&self, gvk: &GroupVersionKind) -> Result<ScopeInfo, TypeResolutionError>;
}

impl<T: ScopeLookup + ?Sized> ScopeLookup for &T {
    fn resolve(&self, gvk: &GroupVersionKind) -> Result<ScopeInfo, TypeResolutionError> {
        (**self).resolve(gvk)
    }
}

impl<T: ScopeLookup + ?Sized> ScopeLookup for Box<T> {
    fn resolve(&self, gvk: &GroupVersionKind) -> Result<ScopeInfo, TypeResolutionError> {
        (**self).resolve(gvk)
    }
}

/// Decide whether `owner` may carry an owner reference on `dependent`.
///
/// Each side is a resource type plus the namespace of the instance. The
/// cluster-scope checks run before the namespace comparison because
/// cluster-scoped objects report no namespace.
///
/// # Errors
/// Returns the lookup's `TypeResolutionError` if either type is unknown.
pub fn can_own<L: ScopeLookup + ?Sized>(
    lookup: &L,
    owner: (&GroupVersionKind, &str),
    dependent: (&GroupVersionKind, &str),
) -> Result<bool, TypeResolutionError> {
    let (owner_gvk, owner_namespace) = owner;
    let (dependent_gvk, dependent_namespace) = dependent;

    let owner_scope = lookup.resolve(owner_gvk)?;
    let dependent_scope = lookup.resolve(dependent_gvk)?;

    let allowed = if owner_scope.is_cluster_scoped {
        true
    } else if dependent_scope.is_cluster_scoped {
        false
    } else {
        owner_namespace == dependent_namespace
    };

    tracing::trace!(
        owner = %owner_gvk,
        dependent = %dependent_gvk,
        allowed,
        "resolved owner reference support"
    );
    Ok(allowed)
}

/// In-memory scope catalog keyed by resource type.
#[derive(Debug, Clone, Default)]
pub struct StaticScopeCatalog {
    scopes: HashMap<GroupVersionKind, ScopeInfo>,
}

const BUILTIN_CLUSTER_TYPES: &[(&str, &str, &str)] = &[
    ("", "v1", "Namespace"),
    ("", "v1", "Node"),
    ("", "v1", "PersistentVolume"),
    ("rbac.authorization.k8s.io", "v1", "ClusterRole"),
    ("rbac.authorization.k8s.io", "v1", "ClusterRoleBinding"),
    ("apiextensions.k8s.io", "v1", "CustomResourceDefinition"),
    ("storage.k8s.io", "v1", "StorageClass"),
    ("scheduling.k8s.io", "v1", "PriorityClass"),
    ("admissionregistration.k8s.io", "v1", "MutatingWebhookConfiguration"),
    ("admissionregistration.k8s.io", "v1", "ValidatingWebhookConfiguration"),
];

const BUILTIN_NAMESPACED_TYPES: &[(&str, &str, &str)] = &[
    ("", "v1", "Pod"),
    ("", "v1", "Service"),
    ("", "v1", "ConfigMap"),
    ("", "v1", "Secret"),
    ("", "v1", "ServiceAccount"),
    ("", "v1", "PersistentVolumeClaim"),
    ("apps", "v1", "Deployment"),
    ("apps", "v1", "StatefulSet"),
    ("apps", "v1", "DaemonSet"),
    ("apps", "v1", "ReplicaSet"),
    ("batch", "v1", "Job"),
    ("batch", "v1", "CronJob"),
    ("networking.k8s.io", "v1", "Ingress"),
    ("networking.k8s.io", "v1", "NetworkPolicy"),
    ("rbac.authorization.k8s.io", "v1", "Role"),
    ("rbac.authorization.k8s.io", "v1", "RoleBinding"),
    ("policy", "v1", "PodDisruptionBudget"),
    ("autoscaling", "v2", "HorizontalPodAutoscaler"),
];

impl StaticScopeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the common built-in Kubernetes types.
    pub fn with_builtin_types() -> Self {
        let mut catalog = Self::new();
        for (group, version, kind) in BUILTIN_CLUSTER_TYPES {
            catalog.register(GroupVersionKind::new(*group, *version, *kind), ScopeInfo::CLUSTER);
        }
        for (group, version, kind) in BUILTIN_NAMESPACED_TYPES {
            catalog.register(
                GroupVersionKind::new(*group, *version, *kind),
                ScopeInfo::NAMESPACED,
            );
        }
        catalog
    }

    /// Register or replace the scope of a type.
    pub fn register(&mut self, gvk: GroupVersionKind, scope: ScopeInfo) {
        self.scopes.insert(gvk, scope);
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl ScopeLookup for StaticScopeCatalog {
    fn resolve(&self, gvk: &GroupVersionKind) -> Result<ScopeInfo, TypeResolutionError> {
        self.scopes
            .get(gvk)
            .copied()
            .ok_or_else(|| TypeResolutionError::NoMatch(gvk.clone()))
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
