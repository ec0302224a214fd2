//! Typed content creation intents
//!
//! Each `runPHP` step the extractor emits is modelled as one of these and
//! only turned into a PHP script when the blueprint is serialized.

use crate::content::php::{literal, relink, THEME_TERM, WP_LOAD};
use crate::content::rewriter::{
    nav_item_token, reference_token, NavItem, Reference, RewrittenContent,
};
use crate::snapshot::types::{
    Post, POST_TYPE_GLOBAL_STYLES, POST_TYPE_TEMPLATE, POST_TYPE_TEMPLATE_PART,
};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::Write as _;

const PURGE: &str = "foreach ( array( 'post', 'page', 'attachment', 'revision', 'nav_menu_item' ) \
    as $post_type ) { $posts = get_posts( \
    array('posts_per_page' => -1, 'post_type' => $post_type ) ); \
    foreach ($posts as $post) wp_delete_post($post->ID, true); }";

/// The post fields a creation script writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub post_type: String,
    pub title: String,
    pub name: String,
    pub content: String,
}

impl PostFields {
    pub fn from_post(post: &Post) -> Self {
        Self {
            post_type: post.post_type.clone(),
            title: post.title.clone(),
            name: post.name.clone(),
            content: post.content.clone(),
        }
    }

    fn with_content(&self, content: String) -> Self {
        Self {
            content,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIntent {
    /// Delete every post, page, attachment, revision and menu item
    PurgeContent,
    CreatePage {
        post: PostFields,
        site_url: String,
    },
    CreateTemplate {
        post: PostFields,
    },
    /// Template part whose body carries `REFERENCE_n` tokens, created after
    /// the referenced posts, whose bodies carry `NAV_ITEM_id` tokens
    CreateTemplatePart {
        post: PostFields,
        references: BTreeMap<usize, Reference>,
        nav_items: BTreeMap<u64, NavItem>,
        site_url: String,
    },
    CreateGlobalStyles {
        post: PostFields,
    },
    CreateUser {
        login: String,
        display_name: String,
        role: String,
        password: String,
    },
}

impl ContentIntent {
    pub fn create_page(post: &Post, site_url: &str) -> Self {
        Self::CreatePage {
            post: PostFields::from_post(post),
            site_url: site_url.to_string(),
        }
    }

    pub fn create_template(post: &Post) -> Self {
        Self::CreateTemplate {
            post: PostFields {
                post_type: POST_TYPE_TEMPLATE.to_string(),
                ..PostFields::from_post(post)
            },
        }
    }

    pub fn create_global_styles(post: &Post) -> Self {
        Self::CreateGlobalStyles {
            post: PostFields {
                post_type: POST_TYPE_GLOBAL_STYLES.to_string(),
                ..PostFields::from_post(post)
            },
        }
    }

    /// Template part intent from a body already passed through the rewriter
    pub fn create_template_part(post: &Post, rewritten: RewrittenContent, site_url: &str) -> Self {
        Self::CreateTemplatePart {
            post: PostFields::from_post(post).with_content(rewritten.content),
            references: rewritten.references,
            nav_items: rewritten.nav_items,
            site_url: site_url.to_string(),
        }
    }

    /// Render the target-side script
    pub fn render(&self) -> String {
        let mut code = String::from(WP_LOAD);
        match self {
            Self::PurgeContent => {
                code.push_str(PURGE);
            }
            Self::CreatePage { post, site_url } => {
                let _ = write!(code, "$post_content = {}; ", literal(&post.content));
                code.push_str(&relink("post_content", site_url));
                let _ = write!(
                    code,
                    "wp_insert_post( array( 'post_type' => {}, 'post_title' => {}, \
                     'post_content' => $post_content, 'post_name' => {}, \
                     'post_status' => 'publish' ) );",
                    literal(&post.post_type),
                    literal(&post.title),
                    literal(&post.name)
                );
            }
            Self::CreateTemplate { post } | Self::CreateGlobalStyles { post } => {
                code.push_str(THEME_TERM);
                let _ = write!(
                    code,
                    "$post_id = wp_insert_post( array( 'post_type' => {}, 'post_title' => {}, \
                     'post_name' => {}, 'post_content' => {}, 'post_status' => 'publish' ) ); \
                     wp_set_object_terms($post_id, $term_id, 'wp_theme');",
                    literal(&post.post_type),
                    literal(&post.title),
                    literal(&post.name),
                    literal(&post.content)
                );
            }
            Self::CreateTemplatePart {
                post,
                references,
                nav_items,
                site_url,
            } => render_template_part(&mut code, post, references, nav_items, site_url),
            Self::CreateUser {
                login,
                display_name,
                role,
                password,
            } => {
                let _ = write!(
                    code,
                    "$data = array( 'user_login' => {}, 'display_name' => {}, 'role' => {}, \
                     'user_pass' => {} ); wp_insert_user( $data );",
                    literal(login),
                    literal(display_name),
                    literal(role),
                    literal(password)
                );
            }
        }
        code
    }
}

// Tokens are substituted longest id first so `NAV_ITEM_7` never eats the
// prefix of `NAV_ITEM_71`, likewise for `REFERENCE_1` and `REFERENCE_10`.
fn render_template_part(
    code: &mut String,
    post: &PostFields,
    references: &BTreeMap<usize, Reference>,
    nav_items: &BTreeMap<u64, NavItem>,
    site_url: &str,
) {
    code.push_str(THEME_TERM);
    let _ = write!(
        code,
        "$template_part_content = {}; $nav_items = array(); ",
        literal(&post.content)
    );

    for (id, item) in nav_items.iter().rev() {
        let _ = write!(
            code,
            "$page = get_page_by_path( {}, OBJECT, {} ); \
             $nav_items[{}] = $page ? $page->ID : 0; ",
            literal(&item.name),
            literal(&item.post_type),
            literal(&nav_item_token(*id))
        );
    }

    for (index, reference) in references.iter().rev() {
        let _ = write!(
            code,
            "$reference_post_content = str_replace( array_keys( $nav_items ), \
             array_values( $nav_items ), {} ); ",
            literal(&reference.post.content)
        );
        code.push_str(&relink("reference_post_content", site_url));
        let _ = write!(
            code,
            "$reference_id = wp_insert_post( array( 'post_type' => {}, 'post_title' => {}, \
             'post_content' => $reference_post_content, 'post_name' => {}, \
             'post_status' => 'publish' ) ); \
             wp_set_object_terms($reference_id, $term_id, 'wp_theme'); ",
            literal(&reference.post.post_type),
            literal(&reference.post.title),
            literal(&reference.post.name)
        );
        let _ = write!(
            code,
            "$template_part_content = str_replace( {}, $reference_id, \
             $template_part_content ); ",
            literal(&reference_token(*index))
        );
    }

    code.push_str(&relink("template_part_content", site_url));
    let _ = write!(
        code,
        "$post_id = wp_insert_post( array( 'post_type' => {}, 'post_title' => {}, \
         'post_name' => {}, 'post_content' => $template_part_content, \
         'post_status' => 'publish' ) ); wp_set_object_terms($post_id, $term_id, 'wp_theme');",
        literal(POST_TYPE_TEMPLATE_PART),
        literal(&post.title),
        literal(&post.name)
    );
}

impl Serialize for ContentIntent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::rewriter::rewrite_template_part;
    use crate::di::mocks::MockInstallation;

    #[test]
    fn test_purge_script() {
        assert_eq!(
            ContentIntent::PurgeContent.render(),
            "<?php require_once '/wordpress/wp-load.php'; \
             foreach ( array( 'post', 'page', 'attachment', 'revision', 'nav_menu_item' ) \
             as $post_type ) { $posts = get_posts( \
             array('posts_per_page' => -1, 'post_type' => $post_type ) ); \
             foreach ($posts as $post) wp_delete_post($post->ID, true); }"
        );
    }

    #[test]
    fn test_page_script_escapes_and_relinks() {
        let post = Post::new(
            2,
            "page",
            "about",
            "<a href=\"https://example.com/x\">Bob's</a>",
        );
        let code = ContentIntent::create_page(&post, "https://example.com").render();

        assert!(code.contains(r#"$post_content = '<a href="https://example.com/x">Bob\'s</a>'; "#));
        assert!(code.contains("str_replace( 'https://example.com', home_url(), $post_content )"));
        assert!(code.contains("'post_type' => 'page'"));
        assert!(code.contains("'post_name' => 'about'"));
        assert!(code.ends_with("'post_status' => 'publish' ) );"));
    }

    #[test]
    fn test_template_attaches_theme_term() {
        let post = Post::new(9, "wp_template", "home", "<!-- wp:query /-->");
        let code = ContentIntent::create_template(&post).render();

        assert!(code.contains("wp_insert_term( $theme->get_stylesheet(), 'wp_theme' )"));
        assert!(code.contains("'post_type' => 'wp_template'"));
        assert!(code.ends_with("wp_set_object_terms($post_id, $term_id, 'wp_theme');"));
    }

    #[test]
    fn test_global_styles_post_type() {
        let post = Post::new(11, "wp_global_styles", "wp-global-styles-tt4", "{}");
        let code = ContentIntent::create_global_styles(&post).render();
        assert!(code.contains("'post_type' => 'wp_global_styles'"));
    }

    #[test]
    fn test_template_part_resolves_tokens_in_order() {
        let site = MockInstallation::new()
            .with_post(Post::new(
                42,
                "wp_navigation",
                "header-navigation",
                r#"<!-- wp:navigation-link {"id":7} /-->"#,
            ))
            .with_post(Post::new(7, "page", "about", ""));
        let part = Post::new(
            30,
            "wp_template_part",
            "header",
            r#"<!-- wp:navigation {"ref":42} /-->"#,
        );
        let rewritten = rewrite_template_part(&part.content, &site);
        let intent = ContentIntent::create_template_part(&part, rewritten, "https://example.com");
        let code = intent.render();

        let nav = code
            .find("$nav_items['NAV_ITEM_7'] = $page ? $page->ID : 0;")
            .unwrap();
        let reference = code.find("$reference_id = wp_insert_post(").unwrap();
        let substitute = code
            .find("str_replace( 'REFERENCE_0', $reference_id, $template_part_content )")
            .unwrap();
        let part_insert = code.find("$post_id = wp_insert_post(").unwrap();

        assert!(code.contains("get_page_by_path( 'about', OBJECT, 'page' )"));
        let body = r#"$template_part_content = '<!-- wp:navigation {"ref":REFERENCE_0} /-->';"#;
        assert!(code.contains(body));
        assert!(nav < reference);
        assert!(reference < substitute);
        assert!(substitute < part_insert);
        assert!(code.contains("'post_type' => 'wp_template_part'"));
    }

    #[test]
    fn test_template_part_longer_tokens_first() {
        let mut nav_items = BTreeMap::new();
        for id in [7, 71] {
            nav_items.insert(
                id,
                NavItem {
                    name: format!("p{}", id),
                    post_type: "page".to_string(),
                },
            );
        }
        let intent = ContentIntent::CreateTemplatePart {
            post: PostFields {
                post_type: "wp_template_part".to_string(),
                title: "Header".to_string(),
                name: "header".to_string(),
                content: String::new(),
            },
            references: BTreeMap::new(),
            nav_items,
            site_url: String::new(),
        };
        let code = intent.render();
        assert!(
            code.find("'NAV_ITEM_71'").unwrap() < code.find("'NAV_ITEM_7'").unwrap()
        );
        assert!(!code.contains("home_url()"));
    }

    #[test]
    fn test_user_script() {
        let code = ContentIntent::CreateUser {
            login: "jane".to_string(),
            display_name: "Jane O'Hara".to_string(),
            role: "editor".to_string(),
            password: "s3cr'et".to_string(),
        }
        .render();

        assert_eq!(
            code,
            "<?php require_once '/wordpress/wp-load.php'; $data = array( \
             'user_login' => 'jane', 'display_name' => 'Jane O\\'Hara', 'role' => 'editor', \
             'user_pass' => 's3cr\\'et' ); wp_insert_user( $data );"
        );
    }

    #[test]
    fn test_serializes_as_script_string() {
        let value = serde_json::to_value(ContentIntent::PurgeContent).unwrap();
        assert!(value.as_str().unwrap().starts_with("<?php require_once"));
    }
}
