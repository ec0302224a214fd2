//! Resource resolution and plugin prioritization
//!
//! This module decides where each active plugin and the active theme can be
//! installed from, and in which order plugin installs are emitted.

pub mod dependency_graph;
pub mod resource_resolver;

pub use dependency_graph::{DependencyGraph, ExtensionDescriptor, OrderedExtension};
pub use resource_resolver::{normalize_slug, ResourceResolver};
