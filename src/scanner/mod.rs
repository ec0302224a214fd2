//! Configuration constant and plugin option discovery
//!
//! Neither scan emits steps on its own; the results seed the constants and
//! options an operator can add to the blueprint.

pub mod constants;
pub mod options;

pub use constants::{scan_constants, ConfigConstant};
pub use options::{scan_plugin_options, PluginOptions};
