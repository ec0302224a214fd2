//! Content reference rewriting and content creation scripts
//!
//! Content discovered on the source site is carried into the blueprint as
//! typed [`ContentIntent`]s. Template parts that embed navigation menus are
//! first rewritten so every numeric post id becomes a symbolic token the
//! target site resolves after creating the referenced posts.

pub mod intent;
pub mod php;
pub mod rewriter;

pub use intent::{ContentIntent, PostFields};
pub use rewriter::{rewrite_template_part, NavItem, Reference, RewrittenContent};
