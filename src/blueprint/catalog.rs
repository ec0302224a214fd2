//! Content the operator can pick from

use crate::content::{rewrite_template_part, RewrittenContent};
use crate::di::Installation;
use crate::snapshot::types::{
    Post, UserAccount, POST_TYPE_GLOBAL_STYLES, POST_TYPE_PAGE, POST_TYPE_TEMPLATE,
    POST_TYPE_TEMPLATE_PART,
};

/// The one account Playground already creates
pub const RESERVED_LOGIN: &str = "admin";

#[derive(Debug, Clone, PartialEq)]
pub struct TemplatePartEntry {
    pub post: Post,
    pub rewritten: RewrittenContent,
}

/// Everything selectable on the installation, in site order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentCatalog {
    pub site_url: String,
    pub pages: Vec<Post>,
    /// Templates of the active theme
    pub templates: Vec<Post>,
    /// Template parts of the active theme, navigation references rewritten
    pub template_parts: Vec<TemplatePartEntry>,
    /// First global styles post of the active theme
    pub global_styles: Option<Post>,
    pub users: Vec<UserAccount>,
}

impl ContentCatalog {
    pub fn discover(installation: &dyn Installation) -> Self {
        let stylesheet = installation
            .active_theme()
            .map(|theme| theme.stylesheet().to_string());
        let of_theme = |post_type: &str| -> Vec<Post> {
            match stylesheet {
                Some(ref stylesheet) => installation
                    .posts_of_type(post_type)
                    .into_iter()
                    .filter(|p| p.theme.as_deref() == Some(stylesheet.as_str()))
                    .collect(),
                None => Vec::new(),
            }
        };

        let template_parts = of_theme(POST_TYPE_TEMPLATE_PART)
            .into_iter()
            .map(|post| {
                let rewritten = rewrite_template_part(&post.content, installation);
                TemplatePartEntry { post, rewritten }
            })
            .collect();

        let catalog = Self {
            site_url: installation.site_url(),
            pages: installation.posts_of_type(POST_TYPE_PAGE),
            templates: of_theme(POST_TYPE_TEMPLATE),
            template_parts,
            global_styles: of_theme(POST_TYPE_GLOBAL_STYLES).into_iter().next(),
            users: installation
                .users()
                .into_iter()
                .filter(|u| u.login != RESERVED_LOGIN)
                .collect(),
        };

        tracing::debug!(
            pages = catalog.pages.len(),
            templates = catalog.templates.len(),
            template_parts = catalog.template_parts.len(),
            users = catalog.users.len(),
            "Discovered content"
        );
        catalog
    }

    pub fn page(&self, id: u64) -> Option<&Post> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn user(&self, login: &str) -> Option<&UserAccount> {
        self.users.iter().find(|u| u.login == login)
    }
}
