//! wordpress.org info API client

use crate::core::{BlueprintError, BlueprintResult};
use crate::di::traits::{ConfigProvider, MetadataSource};
use crate::wporg::types::{PluginInformation, ThemeInformation};
use async_trait::async_trait;
use reqwest::{header, Client as HttpClient, StatusCode};
use std::time::Duration;

/// Client for the plugin and theme information endpoints
pub struct WpOrgClient {
    http_client: HttpClient,
    plugins_api_url: String,
    themes_api_url: String,
}

impl WpOrgClient {
    /// Create a client for the endpoints named in the configuration
    pub fn new(config: &dyn ConfigProvider) -> BlueprintResult<Self> {
        Self::with_urls(config.plugins_api_url(), config.themes_api_url())
    }

    pub fn with_urls(plugins_api_url: &str, themes_api_url: &str) -> BlueprintResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("blueprint/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| BlueprintError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            plugins_api_url: plugins_api_url.to_string(),
            themes_api_url: themes_api_url.to_string(),
        })
    }

    /// Plugin directory entry, `None` if the slug is not published
    pub async fn plugin_information(
        &self,
        slug: &str,
    ) -> BlueprintResult<Option<PluginInformation>> {
        let info: Option<PluginInformation> = self
            .info_request(&self.plugins_api_url, "plugin_information", slug)
            .await?;
        Ok(info.filter(|i| i.error.is_none()))
    }

    /// Theme directory entry, `None` if the slug is not published
    pub async fn theme_information(&self, slug: &str) -> BlueprintResult<Option<ThemeInformation>> {
        let info: Option<ThemeInformation> = self
            .info_request(&self.themes_api_url, "theme_information", slug)
            .await?;
        Ok(info.filter(|i| i.is_published()))
    }

    async fn info_request<T: serde::de::DeserializeOwned>(
        &self,
        base_url: &str,
        action: &str,
        slug: &str,
    ) -> BlueprintResult<Option<T>> {
        tracing::debug!("wordpress.org {} for {}", action, slug);

        let response = self
            .http_client
            .get(base_url)
            .query(&[("action", action), ("request[slug]", slug)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(BlueprintError::Resolution(format!(
                "wordpress.org {} for {} failed: HTTP {}",
                action, slug, status
            )));
        }

        // The API answers unknown slugs with `false` or `null` on some mirrors
        let body: serde_json::Value = response.json().await?;
        if !body.is_object() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(body)?))
    }
}

#[async_trait]
impl MetadataSource for WpOrgClient {
    async fn plugin_download_link(&self, slug: &str) -> BlueprintResult<Option<String>> {
        Ok(self
            .plugin_information(slug)
            .await?
            .and_then(|info| info.download_link)
            .filter(|link| !link.is_empty()))
    }

    async fn theme_exists(&self, slug: &str) -> BlueprintResult<bool> {
        Ok(self.theme_information(slug).await?.is_some())
    }
}
