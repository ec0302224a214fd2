//! Operator selection state
//!
//! What the operator chose to include on top of the assembled blueprint.
//! The state is a plain versioned document; the merge engine receives it
//! as an argument and never reads storage itself.

use crate::blueprint::catalog::ContentCatalog;
use crate::blueprint::share::suggest_name;
use crate::di::Installation;
use crate::scanner::options::is_falsy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current selection document version
pub const SELECTION_VERSION: u32 = 1;

/// Site options a previous export leaves on the target so the extractor
/// running there starts from the same choices
pub const INITIAL_OPTIONS_OPTION: &str = "blueprint_extractor_initial_options";
pub const INITIAL_CONSTANTS_OPTION: &str = "blueprint_extractor_initial_constants";
pub const DEFAULT_CHECKED_OPTION: &str = "blueprint_extractor_default_checked";
pub const NAME_OPTION: &str = "blueprint_extractor_name";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSelection {
    pub login: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionState {
    pub version: u32,
    /// Plugin slugs to leave out
    pub ignore_plugins: Vec<String>,
    /// Keep the target's default theme
    pub ignore_theme: bool,
    pub include_global_styles: bool,
    /// Site options added on top of the core ones
    pub options: Map<String, Value>,
    /// `wp-config.php` constants to define
    pub constants: Map<String, Value>,
    pub pages: Vec<u64>,
    pub templates: Vec<u64>,
    pub template_parts: Vec<u64>,
    pub users: Vec<UserSelection>,
    /// Public URL of an uploads archive to unpack on the target
    pub zip_url: Option<String>,
    /// Install the extractor on the target, primed with this selection
    pub include_extractor: bool,
    pub landing_page: Option<String>,
    pub name: Option<String>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            version: SELECTION_VERSION,
            ignore_plugins: Vec::new(),
            ignore_theme: false,
            include_global_styles: false,
            options: Map::new(),
            constants: Map::new(),
            pages: Vec::new(),
            templates: Vec::new(),
            template_parts: Vec::new(),
            users: Vec::new(),
            zip_url: None,
            include_extractor: true,
            landing_page: None,
            name: None,
        }
    }
}

fn object_option(installation: &dyn Installation, name: &str) -> Map<String, Value> {
    match installation.option(name) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

impl SelectionState {
    /// Starting selection for an installation nothing was chosen on yet
    ///
    /// Options and constants come from the seeds a previous export left on
    /// the site; when it also asked for everything to be pre-selected, all
    /// discovered content is picked.
    pub fn seed(installation: &dyn Installation, catalog: &ContentCatalog) -> Self {
        let mut state = Self {
            options: object_option(installation, INITIAL_OPTIONS_OPTION),
            constants: object_option(installation, INITIAL_CONSTANTS_OPTION),
            ..Default::default()
        };

        let default_checked = installation
            .option(DEFAULT_CHECKED_OPTION)
            .is_some_and(|v| !is_falsy(&v));
        if default_checked {
            state.pages = catalog.pages.iter().map(|p| p.id).collect();
            state.templates = catalog.templates.iter().map(|p| p.id).collect();
            state.template_parts = catalog.template_parts.iter().map(|e| e.post.id).collect();
            state.users = catalog
                .users
                .iter()
                .map(|u| UserSelection {
                    login: u.login.clone(),
                    password: String::new(),
                })
                .collect();
            state.include_global_styles = catalog.global_styles.is_some();
        }

        let previous = match installation.option(NAME_OPTION) {
            Some(Value::String(name)) if !name.is_empty() => Some(name),
            _ => match installation.option("blogname") {
                Some(Value::String(name)) if !name.is_empty() => Some(name),
                _ => None,
            },
        };
        state.name = previous.map(|name| suggest_name(&name));

        state
    }

    pub fn ignores_plugin(&self, slug: &str) -> bool {
        self.ignore_plugins.iter().any(|s| s == slug)
    }

    /// Set an option from `NAME=VALUE`
    pub fn add_option(&mut self, name: &str, value: &str) {
        self.options
            .insert(name.to_string(), Value::String(value.to_string()));
    }

    pub fn add_constant(&mut self, name: &str, value: &str) {
        self.constants
            .insert(name.to_string(), Value::String(value.to_string()));
    }

    /// Select a user, replacing the password if already selected
    pub fn select_user(&mut self, login: &str, password: &str) {
        match self.users.iter_mut().find(|u| u.login == login) {
            Some(user) => user.password = password.to_string(),
            None => self.users.push(UserSelection {
                login: login.to_string(),
                password: password.to_string(),
            }),
        }
    }
}

/// Add `id` to a selection list once
pub fn select_id(ids: &mut Vec<u64>, id: u64) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::di::mocks::MockInstallation;
    use crate::snapshot::types::Post;
    use serde_json::json;

    fn site() -> MockInstallation {
        MockInstallation::new()
            .with_theme("twentytwentyfour", "Twenty Twenty-Four")
            .with_option("blogname", json!("My Site 3"))
            .with_post(Post::new(2, "page", "about", ""))
            .with_post(Post::new(10, "wp_template", "home", "").with_theme("twentytwentyfour"))
            .with_post(Post::new(30, "wp_global_styles", "s", "{}").with_theme("twentytwentyfour"))
            .with_user("jane", "Jane", "editor")
    }

    #[test]
    fn test_default_state() {
        let state = SelectionState::default();
        assert_eq!(state.version, SELECTION_VERSION);
        assert!(state.include_extractor);
        assert!(state.pages.is_empty());
    }

    #[test]
    fn test_seed_without_initial_options() {
        let site = site();
        let state = SelectionState::seed(&site, &ContentCatalog::discover(&site));

        assert!(state.options.is_empty());
        assert!(state.pages.is_empty());
        assert!(!state.include_global_styles);
        assert_eq!(state.name.as_deref(), Some("My Site 4"));
    }

    #[test]
    fn test_seed_from_previous_export() {
        let site = site()
            .with_option(INITIAL_OPTIONS_OPTION, json!({"shop_currency": "EUR"}))
            .with_option(INITIAL_CONSTANTS_OPTION, json!({"WP_DEBUG": "true"}))
            .with_option(DEFAULT_CHECKED_OPTION, json!(true))
            .with_option(NAME_OPTION, json!("Shop"));
        let state = SelectionState::seed(&site, &ContentCatalog::discover(&site));

        assert_eq!(state.options["shop_currency"], json!("EUR"));
        assert_eq!(state.constants["WP_DEBUG"], json!("true"));
        assert_eq!(state.pages, vec![2]);
        assert_eq!(state.templates, vec![10]);
        assert_eq!(state.users[0].login, "jane");
        assert!(state.include_global_styles);
        assert_eq!(state.name.as_deref(), Some("Shop V2"));
    }

    #[test]
    fn test_select_helpers() {
        let mut state = SelectionState::default();
        state.select_user("jane", "a");
        state.select_user("jane", "b");
        assert_eq!(state.users.len(), 1);
        assert_eq!(state.users[0].password, "b");

        select_id(&mut state.pages, 4);
        select_id(&mut state.pages, 4);
        assert_eq!(state.pages, vec![4]);

        state.add_option("a", "1");
        state.add_constant("B", "2");
        assert_eq!(state.options["a"], json!("1"));
        assert_eq!(state.constants["B"], json!("2"));
    }

    #[test]
    fn test_deserialize_partial_document() {
        let state: SelectionState =
            serde_json::from_str(r#"{"ignore_plugins": ["a"], "pages": [2]}"#).unwrap();
        assert!(state.ignores_plugin("a"));
        assert_eq!(state.version, SELECTION_VERSION);
        assert!(state.include_extractor);
    }
}
