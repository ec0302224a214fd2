//! Installation data types

use serde::{Deserialize, Serialize};

pub const POST_TYPE_PAGE: &str = "page";
pub const POST_TYPE_TEMPLATE: &str = "wp_template";
pub const POST_TYPE_TEMPLATE_PART: &str = "wp_template_part";
pub const POST_TYPE_GLOBAL_STYLES: &str = "wp_global_styles";

/// An active plugin as WordPress reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePlugin {
    /// Plugin file relative to the plugins directory (`akismet/akismet.php`)
    pub file: String,

    /// Display name from the plugin header
    #[serde(default)]
    pub name: String,

    /// Raw `Requires Plugins` header (comma-separated slugs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_plugins: Option<String>,
}

impl ActivePlugin {
    pub fn new(file: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            name: name.into(),
            requires_plugins: None,
        }
    }

    pub fn with_requires(mut self, requires: impl Into<String>) -> Self {
        self.requires_plugins = Some(requires.into());
        self
    }

    /// Slug is the plugin's directory (or the file itself for single-file plugins)
    pub fn slug(&self) -> &str {
        self.file.split('/').next().unwrap_or(&self.file)
    }

    /// Display name, falling back to the slug
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.slug()
        } else {
            &self.name
        }
    }

    /// Declared dependency slugs in declaration order
    pub fn requires(&self) -> Vec<String> {
        self.requires_plugins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// The active theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeInfo {
    /// Text domain, which is also the theme directory slug
    pub slug: String,

    /// Stylesheet name, used as the `wp_theme` term for templates
    #[serde(default)]
    pub stylesheet: String,

    #[serde(default)]
    pub name: String,
}

impl ThemeInfo {
    pub fn stylesheet(&self) -> &str {
        if self.stylesheet.is_empty() {
            &self.slug
        } else {
            &self.stylesheet
        }
    }
}

/// A post of any type (page, template, template part, navigation, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,

    pub post_type: String,

    #[serde(default)]
    pub title: String,

    /// Slug (`post_name`)
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub content: String,

    /// `wp_theme` term the post is attached to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl Post {
    pub fn new(id: u64, post_type: &str, name: &str, content: &str) -> Self {
        Self {
            id,
            post_type: post_type.to_string(),
            title: name.to_string(),
            name: name.to_string(),
            content: content.to_string(),
            theme: None,
        }
    }

    pub fn with_theme(mut self, theme: &str) -> Self {
        self.theme = Some(theme.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub login: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserAccount {
    pub fn primary_role(&self) -> &str {
        self.roles.first().map(String::as_str).unwrap_or("subscriber")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlatformVersions {
    #[serde(default)]
    pub php: String,

    #[serde(default)]
    pub wp: String,
}

impl PlatformVersions {
    /// PHP version pinned as `major.minor`
    pub fn php_pin(&self) -> String {
        self.php.split('.').take(2).collect::<Vec<_>>().join(".")
    }
}
