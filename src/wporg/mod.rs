//! wordpress.org plugin and theme directory integration
//!
//! The directory answers two questions for the resolver:
//! - where a plugin's package can be downloaded from
//! - whether a theme is published in the theme directory

pub mod client;
pub mod types;

pub use client::WpOrgClient;
pub use types::{PluginInformation, ThemeInformation};
