//! Blueprint extractor for WordPress Playground
//!
//! Inspects a WordPress installation (plugins, theme, pages, templates, site
//! options, `wp-config.php` constants, users) and produces a Playground
//! blueprint: an ordered list of provisioning steps that rebuilds an
//! equivalent site elsewhere.

pub use blueprint_core::{BlueprintError, BlueprintResult};

/// Core module re-exported from `blueprint-core`.
pub mod core {
    pub use blueprint_core::core::*;

    /// Path module re-exported from blueprint-core.
    pub mod path {
        pub use blueprint_core::core::path::*;
    }
}

/// Configuration management.
pub mod config;

/// Locator cache with a freshness window.
pub mod cache;

/// Dependency injection infrastructure.
pub mod di;

/// wordpress.org plugin and theme directory client.
pub mod wporg;

/// Resource resolution and plugin prioritization.
pub mod resolver;

/// `wp-config.php` constant and plugin option discovery.
pub mod scanner;

/// Content reference rewriting and content creation scripts.
pub mod content;

/// Installation snapshots.
pub mod snapshot;

/// Blueprint document, assembly and selection merging.
pub mod blueprint;
