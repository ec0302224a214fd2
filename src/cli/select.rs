use blueprint::blueprint::selection::select_id;
use blueprint::blueprint::{ContentCatalog, SelectionState, SelectionStore};
use blueprint::core::{BlueprintError, BlueprintResult};
use blueprint::snapshot::Snapshot;
use clap::Args;
use std::path::Path;

/// Changes to the persisted selection
#[derive(Args, Debug, Clone, Default)]
pub struct SelectArgs {
    /// Leave a plugin out of the export
    #[arg(long, value_name = "SLUG")]
    pub exclude_plugin: Vec<String>,

    /// Put an excluded plugin back
    #[arg(long, value_name = "SLUG")]
    pub include_plugin: Vec<String>,

    /// Keep the target's default theme
    #[arg(long, conflicts_with = "include_theme")]
    pub ignore_theme: bool,

    #[arg(long)]
    pub include_theme: bool,

    /// Create the theme's global styles on the target
    #[arg(long, conflicts_with = "no_global_styles")]
    pub global_styles: bool,

    #[arg(long)]
    pub no_global_styles: bool,

    /// Page to recreate
    #[arg(long, value_name = "ID")]
    pub page: Vec<u64>,

    /// Template of the active theme to recreate
    #[arg(long, value_name = "ID")]
    pub template: Vec<u64>,

    /// Template part of the active theme to recreate
    #[arg(long, value_name = "ID")]
    pub template_part: Vec<u64>,

    /// Remove a page, template or template part from the selection
    #[arg(long, value_name = "ID")]
    pub deselect: Vec<u64>,

    /// User to create, as LOGIN or LOGIN:PASSWORD
    #[arg(long, value_name = "LOGIN[:PASSWORD]")]
    pub user: Vec<String>,

    #[arg(long, value_name = "LOGIN")]
    pub deselect_user: Vec<String>,

    /// wp-config.php constant to define
    #[arg(long, value_name = "NAME=VALUE")]
    pub constant: Vec<String>,

    /// Site option to set
    #[arg(long, value_name = "NAME=VALUE")]
    pub option: Vec<String>,

    /// Public URL of an uploads archive to unpack on the target
    #[arg(long, value_name = "URL")]
    pub zip_url: Option<String>,

    #[arg(long, value_name = "PATH")]
    pub landing_page: Option<String>,

    /// Name the extractor on the target offers for the next export
    #[arg(long)]
    pub name: Option<String>,

    /// Do not install the extractor on the target
    #[arg(long, conflicts_with = "with_extractor")]
    pub no_extractor: bool,

    #[arg(long)]
    pub with_extractor: bool,

    /// Forget every stored choice before applying the others
    #[arg(long)]
    pub reset: bool,
}

pub fn run(
    snapshot: &Snapshot,
    selection: Option<&Path>,
    args: &SelectArgs,
) -> BlueprintResult<()> {
    let mut store = match selection {
        Some(path) => SelectionStore::open(path)?,
        None => SelectionStore::open_default()?,
    };
    if args.reset {
        store.reset();
    }

    let catalog = ContentCatalog::discover(snapshot);
    let mut state = store.state(&SelectionState::seed(snapshot, &catalog));
    apply(&mut state, args, &catalog)?;

    store.record(&state);
    store.save()?;

    println!("✓ Selection saved to {}", store.path().display());
    print_summary(&state);
    Ok(())
}

fn apply(
    state: &mut SelectionState,
    args: &SelectArgs,
    catalog: &ContentCatalog,
) -> BlueprintResult<()> {
    for slug in &args.exclude_plugin {
        if !state.ignores_plugin(slug) {
            state.ignore_plugins.push(slug.clone());
        }
    }
    state
        .ignore_plugins
        .retain(|slug| !args.include_plugin.contains(slug));

    if args.ignore_theme {
        state.ignore_theme = true;
    } else if args.include_theme {
        state.ignore_theme = false;
    }
    if args.global_styles {
        state.include_global_styles = true;
    } else if args.no_global_styles {
        state.include_global_styles = false;
    }

    for id in &args.page {
        if catalog.page(*id).is_none() {
            tracing::warn!("No page with id {}", id);
            continue;
        }
        select_id(&mut state.pages, *id);
    }
    for id in &args.template {
        if !catalog.templates.iter().any(|p| p.id == *id) {
            tracing::warn!("No template with id {} in the active theme", id);
            continue;
        }
        select_id(&mut state.templates, *id);
    }
    for id in &args.template_part {
        if !catalog.template_parts.iter().any(|e| e.post.id == *id) {
            tracing::warn!("No template part with id {} in the active theme", id);
            continue;
        }
        select_id(&mut state.template_parts, *id);
    }
    for ids in [&mut state.pages, &mut state.templates, &mut state.template_parts] {
        ids.retain(|id| !args.deselect.contains(id));
    }

    for spec in &args.user {
        let (login, password) = spec.split_once(':').unwrap_or((spec.as_str(), ""));
        if catalog.user(login).is_none() {
            tracing::warn!("No user {} to select", login);
            continue;
        }
        state.select_user(login, password);
    }
    state
        .users
        .retain(|u| !args.deselect_user.contains(&u.login));

    for pair in &args.constant {
        let (name, value) = name_value(pair)?;
        state.add_constant(name, value);
    }
    for pair in &args.option {
        let (name, value) = name_value(pair)?;
        state.add_option(name, value);
    }

    if let Some(ref url) = args.zip_url {
        state.zip_url = Some(url.clone()).filter(|u| !u.is_empty());
    }
    if let Some(ref page) = args.landing_page {
        state.landing_page = Some(page.clone()).filter(|p| !p.is_empty());
    }
    if let Some(ref name) = args.name {
        state.name = Some(name.clone());
    }
    if args.no_extractor {
        state.include_extractor = false;
    } else if args.with_extractor {
        state.include_extractor = true;
    }

    Ok(())
}

fn name_value(pair: &str) -> BlueprintResult<(&str, &str)> {
    match pair.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(BlueprintError::Selection(format!(
            "Expected NAME=VALUE, got '{}'",
            pair
        ))),
    }
}

fn print_summary(state: &SelectionState) {
    if !state.ignore_plugins.is_empty() {
        println!("  Excluded plugins: {}", state.ignore_plugins.join(", "));
    }
    if state.ignore_theme {
        println!("  Theme: left out");
    }
    println!(
        "  Content: {} page(s), {} template(s), {} template part(s), {} user(s)",
        state.pages.len(),
        state.templates.len(),
        state.template_parts.len(),
        state.users.len()
    );
    if !state.constants.is_empty() || !state.options.is_empty() {
        println!(
            "  Settings: {} constant(s), {} option(s)",
            state.constants.len(),
            state.options.len()
        );
    }
    if let Some(ref url) = state.zip_url {
        println!("  Uploads archive: {}", url);
    }
}
