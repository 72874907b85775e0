// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Chart operator core.
//!
//! Two pieces of a chart-backed reconciliation framework:
//! - [`watches`]: the on-disk registry mapping a resource type to the chart
//!   rendered for it, with duplicate detection and atomic saves.
//! - [`k8s`]: ownership injection for rendered objects, choosing between an
//!   owner reference and tracking annotations based on resource scope.
//!
//! Cluster discovery and manifest rendering are consumed through the
//! [`k8s::ScopeLookup`] and [`k8s::ManifestBuilder`] traits.

pub mod cli;
pub mod config;
pub mod k8s;
pub mod telemetry;
pub mod watches;

pub use config::{ConfigError, LogFormat, OperatorConfig};
pub use k8s::{
    can_own, GroupVersionKind, ManifestBuilder, OwnerDescriptor, OwnerRefInjectingBuilder,
    OwnershipError, ParseError, RenderedObject, ScopeInfo, ScopeLookup, StaticScopeCatalog,
    TypeResolutionError, YamlManifestBuilder,
};
pub use watches::{update_watch_for_resource_type, upsert_watch, WatchEntry, WatchError, WatchRegistry};
