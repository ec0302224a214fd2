use blueprint::blueprint::share::{playground_link, to_pretty_json};
use blueprint::blueprint::{
    merge_selection, AssemblyOptions, ContentCatalog, ManifestAssembler, SelectionState,
    SelectionStore,
};
use blueprint::core::BlueprintResult;
use blueprint::di::ServiceContainer;
use blueprint::snapshot::Snapshot;
use std::path::Path;

/// Print the blueprint with the persisted selection applied
pub async fn run(
    container: &ServiceContainer,
    snapshot: &Snapshot,
    selection: Option<&Path>,
    link: bool,
) -> BlueprintResult<()> {
    let store = match selection {
        Some(path) => SelectionStore::open(path)?,
        None => SelectionStore::open_default()?,
    };

    let catalog = ContentCatalog::discover(snapshot);
    let state = store.state(&SelectionState::seed(snapshot, &catalog));

    let mut cache = container.locator_cache()?;
    let assembled = ManifestAssembler::new(snapshot, container.config(), container.metadata())
        .assemble(&mut cache, &AssemblyOptions::default())
        .await;

    let blueprint = merge_selection(&assembled, &state, &catalog, container.config());
    tracing::debug!("Exported {} steps", blueprint.steps.len());

    if link {
        println!(
            "{}",
            playground_link(&blueprint, container.config().playground_url())?
        );
    } else {
        println!("{}", to_pretty_json(&blueprint)?);
    }
    Ok(())
}
