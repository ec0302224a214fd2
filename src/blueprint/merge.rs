//! Selection merge engine
//!
//! Applies an operator selection to an assembled blueprint. The result is a
//! new document; the assembled one is left untouched, so merging the same
//! selection twice yields the same steps.

use crate::blueprint::assembler::{AssembledBlueprint, LANDING_PAGE_OPTION};
use crate::blueprint::catalog::ContentCatalog;
use crate::blueprint::selection::{
    SelectionState, DEFAULT_CHECKED_OPTION, INITIAL_CONSTANTS_OPTION, INITIAL_OPTIONS_OPTION,
    NAME_OPTION,
};
use crate::blueprint::types::{Blueprint, ResourceLocator, Step};
use crate::content::ContentIntent;
use crate::di::ConfigProvider;
use serde_json::{Map, Value};

/// Where Playground unpacks the uploads archive
pub const UPLOADS_PATH: &str = "/wordpress/wp-content/uploads";

/// GitHub repository and branch the extractor installs itself from
pub const EXTRACTOR_REPO: &str = "akirk/blueprint-extractor";
pub const EXTRACTOR_BRANCH: &str = "main";

/// Produce the exported blueprint
///
/// Step order: plugins, theme (with global styles), site options, purge,
/// uploads archive, users, constants, pages, template parts, templates,
/// and finally the extractor itself.
pub fn merge_selection(
    assembled: &AssembledBlueprint,
    selection: &SelectionState,
    catalog: &ContentCatalog,
    config: &dyn ConfigProvider,
) -> Blueprint {
    let mut blueprint = assembled.blueprint.clone();
    if let Some(ref landing_page) = selection.landing_page {
        if !landing_page.is_empty() {
            blueprint.landing_page = landing_page.clone();
        }
    }

    let mut steps = Vec::new();
    for step in assembled.blueprint.steps.iter().cloned() {
        match step {
            Step::InstallPlugin { .. } => {
                if step
                    .plugin_slug()
                    .is_some_and(|slug| selection.ignores_plugin(slug))
                {
                    continue;
                }
                steps.push(step.stripped());
            }
            Step::InstallTheme { .. } => {
                if selection.ignore_theme {
                    continue;
                }
                steps.push(step);
                // After the theme install, so the theme's `wp_theme` term exists
                if selection.include_global_styles {
                    if let Some(ref styles) = catalog.global_styles {
                        steps.push(Step::RunPhp {
                            code: ContentIntent::create_global_styles(styles),
                        });
                    }
                }
            }
            Step::SetSiteOptions { mut options } => {
                for (name, value) in &selection.options {
                    options.insert(name.clone(), value.clone());
                }
                if options.is_empty() {
                    continue;
                }
                steps.push(Step::SetSiteOptions { options });
            }
            other => steps.push(other),
        }
    }

    if let Some(zip_url) = selection.zip_url.as_deref().filter(|u| !u.is_empty()) {
        steps.push(Step::Unzip {
            zip_file: ResourceLocator::url(format!("{}?{}", config.cors_proxy_url(), zip_url)),
            extract_to_path: UPLOADS_PATH.to_string(),
        });
    }

    for chosen in &selection.users {
        let Some(user) = catalog.user(&chosen.login) else {
            tracing::debug!("Selected user {} no longer exists", chosen.login);
            continue;
        };
        steps.push(Step::RunPhp {
            code: ContentIntent::CreateUser {
                login: user.login.clone(),
                display_name: user.display_name.clone(),
                role: user.primary_role().to_string(),
                password: chosen.password.clone(),
            },
        });
    }

    if !selection.constants.is_empty() {
        steps.push(Step::DefineWpConfigConsts {
            consts: selection.constants.clone(),
        });
    }

    for page in catalog.pages.iter().filter(|p| selection.pages.contains(&p.id)) {
        steps.push(Step::RunPhp {
            code: ContentIntent::create_page(page, &catalog.site_url),
        });
    }

    for entry in catalog
        .template_parts
        .iter()
        .filter(|e| selection.template_parts.contains(&e.post.id))
    {
        steps.push(Step::RunPhp {
            code: ContentIntent::create_template_part(
                &entry.post,
                entry.rewritten.clone(),
                &catalog.site_url,
            ),
        });
    }

    for template in catalog
        .templates
        .iter()
        .filter(|p| selection.templates.contains(&p.id))
    {
        steps.push(Step::RunPhp {
            code: ContentIntent::create_template(template),
        });
    }

    log_stale_ids(selection, catalog);

    if selection.include_extractor {
        steps.push(Step::InstallPlugin {
            plugin_data: ResourceLocator::url(format!(
                "{}?repo={}&branch={}",
                config.github_proxy_url(),
                EXTRACTOR_REPO,
                EXTRACTOR_BRANCH
            )),
            name: None,
            slug: None,
            info: None,
        });
        steps.push(Step::SetSiteOptions {
            options: extractor_seed(selection, &blueprint.landing_page),
        });
    }

    blueprint.steps = steps;
    blueprint
}

/// Options that let the extractor on the target start from this selection
fn extractor_seed(selection: &SelectionState, landing_page: &str) -> Map<String, Value> {
    let mut seed = Map::new();
    seed.insert(
        INITIAL_CONSTANTS_OPTION.to_string(),
        Value::Object(selection.constants.clone()),
    );
    seed.insert(
        INITIAL_OPTIONS_OPTION.to_string(),
        Value::Object(selection.options.clone()),
    );
    seed.insert(
        LANDING_PAGE_OPTION.to_string(),
        Value::String(landing_page.to_string()),
    );
    seed.insert(DEFAULT_CHECKED_OPTION.to_string(), Value::Bool(true));
    seed.insert(
        NAME_OPTION.to_string(),
        Value::String(selection.name.clone().unwrap_or_default()),
    );
    seed
}

fn log_stale_ids(selection: &SelectionState, catalog: &ContentCatalog) {
    for id in &selection.pages {
        if catalog.page(*id).is_none() {
            tracing::debug!("Selected page {} no longer exists", id);
        }
    }
    for id in &selection.templates {
        if !catalog.templates.iter().any(|p| p.id == *id) {
            tracing::debug!("Selected template {} no longer exists", id);
        }
    }
    for id in &selection.template_parts {
        if !catalog.template_parts.iter().any(|e| e.post.id == *id) {
            tracing::debug!("Selected template part {} no longer exists", id);
        }
    }
}
