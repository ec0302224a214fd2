//! Plugin dependency prioritization
//!
//! Plugins declare prerequisites in their `Requires Plugins` header. Every
//! plugin that some other plugin requires is moved to the front, annotated
//! with the names of the plugins that required it; the rest keep their
//! discovery order. This is a single pass, not a topological sort: chains
//! deeper than one level and cycles are left as they fall.

use crate::blueprint::types::ResourceLocator;
use std::collections::HashMap;

/// An active plugin that resolved to a download location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDescriptor {
    pub slug: String,
    pub name: String,
    /// Declared prerequisite slugs
    pub requires: Vec<String>,
    pub locator: ResourceLocator,
}

/// A descriptor in emission order, with its prioritization note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedExtension {
    pub descriptor: ExtensionDescriptor,
    /// `(prioritized because of A, B)` for prerequisites, empty otherwise
    pub info: String,
}

/// Reverse dependency map over discovered extensions
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<ExtensionDescriptor>,
    /// Prerequisite slug -> dependents, keyed in first-declared order
    dependents: Vec<(String, Vec<String>)>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a discovered extension; its declared prerequisites become edges
    pub fn add(&mut self, descriptor: ExtensionDescriptor) {
        for required in &descriptor.requires {
            match self.dependents.iter_mut().find(|(slug, _)| slug == required) {
                Some((_, dependents)) => dependents.push(descriptor.slug.clone()),
                None => self
                    .dependents
                    .push((required.clone(), vec![descriptor.slug.clone()])),
            }
        }
        self.nodes.push(descriptor);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Dependents recorded for a prerequisite slug
    pub fn dependents_of(&self, slug: &str) -> &[String] {
        self.dependents
            .iter()
            .find(|(s, _)| s == slug)
            .map(|(_, d)| d.as_slice())
            .unwrap_or(&[])
    }

    /// Emission order: required extensions first, then the rest
    ///
    /// Prerequisites that were not discovered are ignored.
    pub fn prioritize(self) -> Vec<OrderedExtension> {
        let names: HashMap<&str, &str> = self
            .nodes
            .iter()
            .map(|n| (n.slug.as_str(), n.name.as_str()))
            .collect();

        let mut infos: HashMap<String, String> = HashMap::new();
        let mut front: Vec<String> = Vec::new();
        for (required, dependents) in &self.dependents {
            if !names.contains_key(required.as_str()) || front.contains(required) {
                continue;
            }
            let dependent_names: Vec<&str> = dependents
                .iter()
                .filter_map(|d| names.get(d.as_str()).copied())
                .collect();
            infos.insert(
                required.clone(),
                format!("(prioritized because of {})", dependent_names.join(", ")),
            );
            front.push(required.clone());
        }

        let mut by_slug: HashMap<String, ExtensionDescriptor> = HashMap::new();
        let mut rest = Vec::new();
        for node in self.nodes {
            if front.contains(&node.slug) {
                by_slug.insert(node.slug.clone(), node);
            } else {
                rest.push(node);
            }
        }

        let mut ordered = Vec::with_capacity(front.len() + rest.len());
        for slug in front {
            if let Some(descriptor) = by_slug.remove(&slug) {
                let info = infos.remove(&slug).unwrap_or_default();
                ordered.push(OrderedExtension { descriptor, info });
            }
        }
        ordered.extend(rest.into_iter().map(|descriptor| OrderedExtension {
            descriptor,
            info: String::new(),
        }));
        ordered
    }
}
