//! Core utilities shared by the blueprint extractor.
//!
//! Holds the error type used across the workspace and the platform-specific
//! locations for configuration, cache and persisted selections.

pub mod core;

pub use crate::core::error::{BlueprintError, BlueprintResult};
