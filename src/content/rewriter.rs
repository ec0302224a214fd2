//! Template part reference rewriting
//!
//! A template part may embed a navigation block (`<!-- wp:navigation {"ref":42} /-->`)
//! whose menu lives in another post, and that menu links to pages by id.
//! Ids are meaningless on the target site, so they are swapped for tokens:
//! the menu id for `REFERENCE_{n}` (n counts menus in discovery order) and
//! each linked page id, inside the menu, for `NAV_ITEM_{id}`.

use crate::content::intent::PostFields;
use crate::di::Installation;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// A linked post the target looks up again by path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub name: String,
    pub post_type: String,
}

/// A post embedded by reference, with its nav links already tokenised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Id on the source site
    pub source_id: u64,
    pub post: PostFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RewrittenContent {
    pub content: String,
    pub references: BTreeMap<usize, Reference>,
    pub nav_items: BTreeMap<u64, NavItem>,
}

pub fn reference_token(index: usize) -> String {
    format!("REFERENCE_{}", index)
}

pub fn nav_item_token(id: u64) -> String {
    format!("NAV_ITEM_{}", id)
}

static NAVIGATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!-- wp:navigation\s+(.*?) /-->").expect("Invalid navigation regex")
});

static NAVIGATION_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!-- wp:navigation-link\s+(.*?) /-->").expect("Invalid navigation-link regex")
});

/// Numeric id in a block payload; numeric strings count too
fn numeric_field(payload: &str, field: &str) -> Option<u64> {
    let attrs: Value = serde_json::from_str(payload).ok()?;
    match attrs.get(field)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Replace whole-number occurrences of `id`; digits that are part of a
/// longer number or of an existing token are left alone
fn replace_id(content: &str, id: u64, token: &str) -> String {
    match Regex::new(&format!(r"\b{}\b", id)) {
        Ok(re) => re.replace_all(content, token).into_owned(),
        Err(_) => content.to_string(),
    }
}

/// Rewrite a template part body against the installation
///
/// Menus or pages that no longer exist are skipped and their ids stay in
/// place; the target then sees a dangling id rather than a dangling token.
pub fn rewrite_template_part(body: &str, installation: &dyn Installation) -> RewrittenContent {
    let mut out = RewrittenContent {
        content: body.to_string(),
        ..Default::default()
    };
    let mut seen_refs: Vec<u64> = Vec::new();

    for cap in NAVIGATION.captures_iter(body) {
        let Some(ref_id) = numeric_field(&cap[1], "ref") else {
            continue;
        };
        if seen_refs.contains(&ref_id) {
            continue;
        }
        seen_refs.push(ref_id);

        let Some(menu) = installation.post(ref_id) else {
            tracing::warn!("Navigation reference {} does not resolve to a post", ref_id);
            continue;
        };

        let mut menu_content = menu.content.clone();
        for link in NAVIGATION_LINK.captures_iter(&menu.content) {
            let Some(link_id) = numeric_field(&link[1], "id") else {
                continue;
            };
            if out.nav_items.contains_key(&link_id) {
                menu_content = replace_id(&menu_content, link_id, &nav_item_token(link_id));
                continue;
            }
            match installation.post(link_id) {
                Some(target) => {
                    out.nav_items.insert(
                        link_id,
                        NavItem {
                            name: target.name.clone(),
                            post_type: target.post_type.clone(),
                        },
                    );
                    menu_content = replace_id(&menu_content, link_id, &nav_item_token(link_id));
                }
                None => {
                    tracing::warn!("Navigation link {} does not resolve to a post", link_id);
                }
            }
        }

        let index = out.references.len();
        out.references.insert(
            index,
            Reference {
                source_id: ref_id,
                post: PostFields {
                    post_type: menu.post_type.clone(),
                    title: menu.title.clone(),
                    name: menu.name.clone(),
                    content: menu_content,
                },
            },
        );
        out.content = replace_id(&out.content, ref_id, &reference_token(index));
    }

    out
}
