//! Persisted selection store
//!
//! Selections survive between runs as a flat JSON object of namespaced
//! keys, one per category. A category missing from the store falls back
//! to the seed selection of the installation.

use crate::blueprint::selection::{SelectionState, UserSelection, SELECTION_VERSION};
use crate::core::path::{ensure_dir, selection_file};
use crate::core::{BlueprintError, BlueprintResult};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const KEY_PREFIX: &str = "blueprint_extractor_";

pub const VERSION_KEY: &str = "blueprint_extractor_version";
pub const IGNORE_PLUGINS_KEY: &str = "blueprint_extractor_ignore_plugins";
pub const IGNORE_THEME_KEY: &str = "blueprint_extractor_ignore_theme";
pub const GLOBAL_STYLES_KEY: &str = "blueprint_extractor_global_styles";
pub const OPTIONS_KEY: &str = "blueprint_extractor_additional_options";
pub const CONSTANTS_KEY: &str = "blueprint_extractor_constants";
pub const PAGES_KEY: &str = "blueprint_extractor_pages";
pub const TEMPLATES_KEY: &str = "blueprint_extractor_templates";
pub const TEMPLATE_PARTS_KEY: &str = "blueprint_extractor_template_parts";
pub const USERS_KEY: &str = "blueprint_extractor_users";
pub const PASSWORDS_KEY: &str = "blueprint_extractor_passwords";
pub const ZIP_URL_KEY: &str = "blueprint_extractor_zip_url";
pub const EXCLUDE_EXTRACTOR_KEY: &str = "blueprint_extractor_exclude_extractor";
pub const LANDING_PAGE_KEY: &str = "blueprint_extractor_landing_page";
pub const NAME_KEY: &str = "blueprint_extractor_name";

pub struct SelectionStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl SelectionStore {
    /// Open the store in the user's data directory
    pub fn open_default() -> BlueprintResult<Self> {
        Self::open(&selection_file()?)
    }

    /// Open a store file; a missing file is an empty store
    pub fn open(path: &Path) -> BlueprintResult<Self> {
        let entries = if path.exists() {
            let content = fs::read_to_string(path)?;
            match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    return Err(BlueprintError::Selection(format!(
                        "{} does not hold a JSON object",
                        path.display()
                    )))
                }
                Err(e) => {
                    return Err(BlueprintError::Selection(format!(
                        "Failed to parse {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        } else {
            Map::new()
        };

        if let Some(version) = entries.get(VERSION_KEY).and_then(Value::as_u64) {
            if version > u64::from(SELECTION_VERSION) {
                return Err(BlueprintError::Selection(format!(
                    "Selection version {} is newer than supported version {}",
                    version, SELECTION_VERSION
                )));
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        !self.entries.keys().any(|k| k.starts_with(KEY_PREFIX) && k != VERSION_KEY)
    }

    /// Stored selection, each missing category taken from `seed`
    pub fn state(&self, seed: &SelectionState) -> SelectionState {
        let e = &self.entries;
        SelectionState {
            version: SELECTION_VERSION,
            ignore_plugins: e
                .get(IGNORE_PLUGINS_KEY)
                .map(strings)
                .unwrap_or_else(|| seed.ignore_plugins.clone()),
            ignore_theme: e
                .get(IGNORE_THEME_KEY)
                .map(truthy)
                .unwrap_or(seed.ignore_theme),
            include_global_styles: e
                .get(GLOBAL_STYLES_KEY)
                .map(truthy)
                .unwrap_or(seed.include_global_styles),
            options: e
                .get(OPTIONS_KEY)
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_else(|| seed.options.clone()),
            constants: e
                .get(CONSTANTS_KEY)
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_else(|| seed.constants.clone()),
            pages: e.get(PAGES_KEY).map(ids).unwrap_or_else(|| seed.pages.clone()),
            templates: e
                .get(TEMPLATES_KEY)
                .map(ids)
                .unwrap_or_else(|| seed.templates.clone()),
            template_parts: e
                .get(TEMPLATE_PARTS_KEY)
                .map(ids)
                .unwrap_or_else(|| seed.template_parts.clone()),
            users: match e.get(USERS_KEY) {
                Some(users) => {
                    let passwords = e.get(PASSWORDS_KEY).map(strings).unwrap_or_default();
                    strings(users)
                        .into_iter()
                        .enumerate()
                        .map(|(i, login)| UserSelection {
                            login,
                            password: passwords.get(i).cloned().unwrap_or_default(),
                        })
                        .collect()
                }
                None => seed.users.clone(),
            },
            zip_url: e
                .get(ZIP_URL_KEY)
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| seed.zip_url.clone()),
            include_extractor: e
                .get(EXCLUDE_EXTRACTOR_KEY)
                .map(|v| !truthy(v))
                .unwrap_or(seed.include_extractor),
            landing_page: e
                .get(LANDING_PAGE_KEY)
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| seed.landing_page.clone()),
            name: e
                .get(NAME_KEY)
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| seed.name.clone()),
        }
    }

    /// Record a selection; empty categories are removed
    pub fn record(&mut self, state: &SelectionState) {
        self.entries
            .insert(VERSION_KEY.to_string(), Value::from(SELECTION_VERSION));

        self.put(IGNORE_PLUGINS_KEY, string_list(&state.ignore_plugins));
        self.put(
            IGNORE_THEME_KEY,
            state.ignore_theme.then_some(Value::Bool(true)),
        );
        self.put(
            GLOBAL_STYLES_KEY,
            state.include_global_styles.then_some(Value::Bool(true)),
        );
        self.put(OPTIONS_KEY, object(&state.options));
        self.put(CONSTANTS_KEY, object(&state.constants));
        self.put(PAGES_KEY, id_list(&state.pages));
        self.put(TEMPLATES_KEY, id_list(&state.templates));
        self.put(TEMPLATE_PARTS_KEY, id_list(&state.template_parts));

        let logins: Vec<String> = state.users.iter().map(|u| u.login.clone()).collect();
        let passwords: Vec<String> = state.users.iter().map(|u| u.password.clone()).collect();
        self.put(USERS_KEY, string_list(&logins));
        self.put(
            PASSWORDS_KEY,
            (!logins.is_empty()).then(|| Value::from(passwords)),
        );

        self.put(ZIP_URL_KEY, non_empty(state.zip_url.as_deref()));
        self.put(
            EXCLUDE_EXTRACTOR_KEY,
            (!state.include_extractor).then_some(Value::Bool(true)),
        );
        self.put(LANDING_PAGE_KEY, non_empty(state.landing_page.as_deref()));
        self.put(NAME_KEY, non_empty(state.name.as_deref()));
    }

    /// Forget every stored selection; other keys in the file are kept
    pub fn reset(&mut self) {
        self.entries.retain(|k, _| !k.starts_with(KEY_PREFIX));
    }

    pub fn save(&self) -> BlueprintResult<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content).map_err(|e| {
            BlueprintError::Selection(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }

    fn put(&mut self, key: &str, value: Option<Value>) {
        match value {
            Some(value) => {
                self.entries.insert(key.to_string(), value);
            }
            None => {
                self.entries.remove(key);
            }
        }
    }
}

fn truthy(value: &Value) -> bool {
    !crate::scanner::options::is_falsy(value)
}

fn strings(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Ids are stored as strings; bare numbers are accepted too
fn ids(value: &Value) -> Vec<u64> {
    strings(value)
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect()
}

fn string_list(items: &[String]) -> Option<Value> {
    (!items.is_empty()).then(|| Value::from(items.to_vec()))
}

fn id_list(items: &[u64]) -> Option<Value> {
    (!items.is_empty()).then(|| Value::from(items.iter().map(u64::to_string).collect::<Vec<_>>()))
}

fn object(map: &Map<String, Value>) -> Option<Value> {
    (!map.is_empty()).then(|| Value::Object(map.clone()))
}

fn non_empty(value: Option<&str>) -> Option<Value> {
    value
        .filter(|s| !s.is_empty())
        .map(|s| Value::String(s.to_string()))
}
