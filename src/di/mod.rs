//! Dependency injection infrastructure
//!
//! The extractor's collaborators (configuration, the remote plugin/theme
//! directory, the clock, the WordPress installation) are reached through
//! traits so that every piece can be exercised against in-memory fakes.
//!
//! # Example (Production)
//! ```no_run
//! use blueprint::di::ServiceContainer;
//!
//! # fn example() -> blueprint::core::BlueprintResult<()> {
//! let container = ServiceContainer::new()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example (Testing)
//! ```
//! use blueprint::di::{ServiceContainer, mocks::*};
//! use std::sync::Arc;
//!
//! let config = Arc::new(MockConfigProvider::default());
//! let metadata = Arc::new(MockMetadataSource::new());
//! let clock = Arc::new(MockClock::default());
//!
//! let container = ServiceContainer::with_providers(config, metadata, clock);
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::{Clock, ConfigProvider, Installation, MetadataSource, SystemClock};
