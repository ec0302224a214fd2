//! Plugin option scan

use crate::di::Installation;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Options owned by WordPress itself, never offered as plugin settings
pub const CORE_OPTIONS: [&str; 24] = [
    "home",
    "WPLANG",
    "blogname",
    "blogdescription",
    "site_icon",
    "siteurl",
    "stylesheet",
    "start_of_week",
    "timezone_string",
    "date_format",
    "time_format",
    "gmt_offset",
    "permalink_structure",
    "rss_use_excerpt",
    "comment_registration",
    "blog_charset",
    "posts_per_page",
    "rewrite_rules",
    "sidebars_widgets",
    "admin_email",
    "page_on_front",
    "page_for_posts",
    "show_on_front",
    "active_plugins",
];

const SKIPPED_DIRS: [&str; 2] = ["vendor", "node_modules"];

static GET_OPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"get_option\(\s*['"]([^'"]+)['"]\s*\)"#).expect("Invalid get_option regex")
});

/// Options one plugin reads, with their current values
#[derive(Debug, Clone, PartialEq)]
pub struct PluginOptions {
    pub slug: String,
    pub options: Map<String, Value>,
}

pub fn is_reserved_option(name: &str) -> bool {
    CORE_OPTIONS.contains(&name) || name.starts_with("wp_") || name.starts_with('_')
}

/// Empty strings, zero, `"0"`, false, null and empty collections
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Option names referenced by `get_option('...')` in a PHP source
pub fn referenced_options(source: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    GET_OPTION
        .captures_iter(source)
        .map(|c| c[1].to_string())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Options each active, non-ignored plugin reads that hold a value
///
/// Plugins without any such option are left out.
pub fn scan_plugin_options(
    installation: &dyn Installation,
    ignored: &[String],
) -> Vec<PluginOptions> {
    let mut results: Vec<PluginOptions> = Vec::new();

    for plugin in installation.active_plugins() {
        let slug = plugin.slug().to_string();
        if ignored.contains(&slug) {
            continue;
        }
        let Some(dir) = installation.plugin_dir(&plugin.file) else {
            continue;
        };

        let mut options = Map::new();
        for file in php_sources(&dir) {
            let source = match fs::read_to_string(&file) {
                Ok(source) => source,
                Err(e) => {
                    tracing::warn!("Skipping unreadable file {}: {}", file.display(), e);
                    continue;
                }
            };
            for name in referenced_options(&source) {
                if is_reserved_option(&name) || options.contains_key(&name) {
                    continue;
                }
                match installation.option(&name) {
                    Some(value) if !is_falsy(&value) => {
                        options.insert(name, value);
                    }
                    _ => {}
                }
            }
        }

        if options.is_empty() {
            continue;
        }
        match results.iter_mut().find(|r| r.slug == slug) {
            Some(existing) => existing.options.extend(options),
            None => results.push(PluginOptions { slug, options }),
        }
    }

    results
}

/// PHP files of a plugin, leaving out bundled dependencies
fn php_sources(root: &Path) -> Vec<std::path::PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.depth() == 1
                && entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| SKIPPED_DIRS.contains(&name)))
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable path: {}", e);
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "php")
        })
        .map(|entry| entry.into_path())
        .collect()
}
