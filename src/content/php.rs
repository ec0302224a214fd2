//! Rendering helpers for `runPHP` payloads

/// Every script starts by booting WordPress
pub const WP_LOAD: &str = "<?php require_once '/wordpress/wp-load.php'; ";

/// Leaves the active theme's `wp_theme` term id in `$term_id`, creating the
/// term when the theme has none yet
pub const THEME_TERM: &str = "$theme = wp_get_theme(); \
    $term = get_term_by( 'slug', $theme->get_stylesheet(), 'wp_theme'); \
    if ( ! $term ) { $term = wp_insert_term( $theme->get_stylesheet(), 'wp_theme' ); \
    $term_id = $term['term_id']; } else { $term_id = $term->term_id; } ";

/// Single-quoted PHP string literal
pub fn literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Statement rewriting absolute links to the source site so they point at
/// the target's `home_url()`; nothing when the source URL is unknown
pub fn relink(var: &str, site_url: &str) -> String {
    if site_url.is_empty() {
        return String::new();
    }
    format!(
        "${var} = str_replace( {}, home_url(), ${var} ); ",
        literal(site_url)
    )
}
