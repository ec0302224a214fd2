//! Blueprint document, assembly and selection merging
//!
//! The flow is one-directional: the [`assembler`] builds a blueprint from
//! the installation, the [`catalog`] lists selectable content, and
//! [`merge`] folds a [`selection::SelectionState`] into the final document.

pub mod assembler;
pub mod catalog;
pub mod merge;
pub mod selection;
pub mod share;
pub mod store;
pub mod types;

pub use assembler::{AssembledBlueprint, AssemblyOptions, ManifestAssembler};
pub use catalog::ContentCatalog;
pub use merge::merge_selection;
pub use selection::SelectionState;
pub use store::SelectionStore;
pub use types::{Blueprint, ResourceLocator, Step};
