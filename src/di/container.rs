//! Service container for dependency injection

use super::traits::{Clock, ConfigProvider, MetadataSource, SystemClock};
use crate::cache::LocatorCache;
use crate::config::Config;
use crate::core::BlueprintResult;
use crate::wporg::WpOrgClient;
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds the long-lived services behind trait objects so commands can be
/// run against real wordpress.org or against mocks.
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<dyn ConfigProvider>,
    pub metadata: Arc<dyn MetadataSource>,
    pub clock: Arc<dyn Clock>,
}

impl ServiceContainer {
    /// Create a container from the user's config file
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or created, or
    /// the HTTP client cannot be built.
    pub fn new() -> BlueprintResult<Self> {
        Self::from_config(Config::load()?)
    }

    /// Create a container with production services for a given config
    pub fn from_config(config: Config) -> BlueprintResult<Self> {
        let metadata = WpOrgClient::new(&config)?;

        Ok(Self {
            config: Arc::new(config),
            metadata: Arc::new(metadata),
            clock: Arc::new(SystemClock),
        })
    }

    /// Create a container with custom providers
    pub fn with_providers(
        config: Arc<dyn ConfigProvider>,
        metadata: Arc<dyn MetadataSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            metadata,
            clock,
        }
    }

    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    pub fn metadata(&self) -> &dyn MetadataSource {
        self.metadata.as_ref()
    }

    /// Open the persisted locator cache in the configured cache directory
    pub fn locator_cache(&self) -> BlueprintResult<LocatorCache> {
        Ok(LocatorCache::open(
            &self.config.cache_dir()?,
            self.config.cache_ttl(),
            self.clock.clone(),
        ))
    }
}
