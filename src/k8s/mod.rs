// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes-facing types and the ownership injection pipeline.
//!
//! Scope resolution feeds the ownership decision, which the injecting
//! builder applies to every object rendered from a chart.

pub mod builder;
pub mod ownership;
pub mod scope;
pub mod types;
pub mod validation;

pub use builder::{ManifestBuilder, OwnerRefInjectingBuilder, ParseError, YamlManifestBuilder};
pub use ownership::{annotate, OwnershipError, NAMESPACED_NAME_ANNOTATION, TYPE_ANNOTATION};
pub use scope::{can_own, ScopeInfo, ScopeLookup, StaticScopeCatalog, TypeResolutionError};
pub use types::{GroupVersionKind, ObjectMeta, OwnerDescriptor, OwnerReference, RenderedObject};
