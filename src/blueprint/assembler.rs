//! Manifest assembly
//!
//! Builds the blueprint for the installation as it stands, before any
//! operator selection is applied: plugin installs in prerequisite order, the
//! theme, core site options, and the content purge.

use crate::blueprint::types::{Blueprint, Features, PreferredVersions, ResourceLocator, Step};
use crate::cache::LocatorCache;
use crate::content::ContentIntent;
use crate::di::{ConfigProvider, Installation, MetadataSource};
use crate::resolver::resource_resolver::SELF_SLUG;
use crate::resolver::{normalize_slug, DependencyGraph, ExtensionDescriptor, ResourceResolver};
use serde_json::{Map, Value};

/// Site options every blueprint carries
pub const CORE_SITE_OPTIONS: [&str; 3] = ["blogname", "blogdescription", "permalink_structure"];

/// Landing page persisted on the site by a previous export
pub const LANDING_PAGE_OPTION: &str = "blueprint_extractor_initial_landing_page";

/// What to leave out while assembling
#[derive(Debug, Clone, Default)]
pub struct AssemblyOptions {
    /// Plugin (or theme) slugs to skip
    pub ignore: Vec<String>,
    pub ignore_all_plugins: bool,
    pub ignore_theme: bool,
}

impl AssemblyOptions {
    fn ignores(&self, slug: &str) -> bool {
        self.ignore.iter().any(|s| s == slug) || normalize_slug(slug) == SELF_SLUG
    }
}

/// The assembled blueprint and the slugs that could not be resolved
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledBlueprint {
    pub blueprint: Blueprint,
    /// Plugins and the theme left out because no download location was found
    pub ignored: Vec<String>,
}

pub struct ManifestAssembler<'a> {
    installation: &'a dyn Installation,
    config: &'a dyn ConfigProvider,
    metadata: &'a dyn MetadataSource,
}

impl<'a> ManifestAssembler<'a> {
    pub fn new(
        installation: &'a dyn Installation,
        config: &'a dyn ConfigProvider,
        metadata: &'a dyn MetadataSource,
    ) -> Self {
        Self {
            installation,
            config,
            metadata,
        }
    }

    /// Assemble the blueprint; individual resolution failures only shrink it
    pub async fn assemble(
        &self,
        cache: &mut LocatorCache,
        options: &AssemblyOptions,
    ) -> AssembledBlueprint {
        let mut resolver =
            ResourceResolver::new(self.metadata, cache, self.config.github_proxy_url());
        let mut ignored = Vec::new();
        let mut steps = Vec::new();

        let mut graph = DependencyGraph::new();
        if !options.ignore_all_plugins {
            for plugin in self.installation.active_plugins() {
                let slug = plugin.slug().to_string();
                if options.ignores(&slug) {
                    continue;
                }
                match resolver.resolve(&slug).await {
                    Some(locator) => graph.add(ExtensionDescriptor {
                        name: plugin.display_name().to_string(),
                        requires: plugin.requires(),
                        slug,
                        locator,
                    }),
                    None => ignored.push(slug),
                }
            }
        }

        for ordered in graph.prioritize() {
            let descriptor = ordered.descriptor;
            steps.push(Step::InstallPlugin {
                plugin_data: descriptor.locator,
                name: Some(descriptor.name),
                slug: Some(descriptor.slug),
                info: Some(ordered.info),
            });
        }

        if let Some(theme) = self.installation.active_theme() {
            if !options.ignore_theme && !options.ignore.contains(&theme.slug) {
                if resolver.theme_exists(&theme.slug).await {
                    steps.push(Step::InstallTheme {
                        theme_zip_file: ResourceLocator::theme(&theme.slug),
                    });
                } else {
                    ignored.push(theme.slug.clone());
                }
            }
        }

        let mut site_options = Map::new();
        for name in CORE_SITE_OPTIONS {
            let value = self
                .installation
                .option(name)
                .unwrap_or_else(|| Value::String(String::new()));
            site_options.insert(name.to_string(), value);
        }
        steps.push(Step::SetSiteOptions {
            options: site_options,
        });

        steps.push(Step::RunPhp {
            code: ContentIntent::PurgeContent,
        });

        if !ignored.is_empty() {
            tracing::info!("Left out of the blueprint: {}", ignored.join(", "));
        }

        let versions = self.installation.platform_versions();
        let blueprint = Blueprint {
            landing_page: self.landing_page(),
            preferred_versions: PreferredVersions {
                php: versions.php_pin(),
                wp: versions.wp,
            },
            php_extension_bundles: self.config.php_extension_bundles().to_vec(),
            features: Features { networking: true },
            login: true,
            steps,
        };

        AssembledBlueprint { blueprint, ignored }
    }

    fn landing_page(&self) -> String {
        match self.installation.option(LANDING_PAGE_OPTION) {
            Some(Value::String(page)) if !page.is_empty() => page,
            _ => self.config.landing_page().to_string(),
        }
    }
}
