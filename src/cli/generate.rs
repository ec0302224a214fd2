use blueprint::blueprint::share::to_pretty_json;
use blueprint::blueprint::{AssemblyOptions, ManifestAssembler};
use blueprint::core::BlueprintResult;
use blueprint::di::ServiceContainer;
use blueprint::snapshot::Snapshot;

/// Print the blueprint of the installation as it stands
pub async fn run(
    container: &ServiceContainer,
    snapshot: &Snapshot,
    options: AssemblyOptions,
) -> BlueprintResult<()> {
    let mut cache = container.locator_cache()?;
    let assembled = ManifestAssembler::new(snapshot, container.config(), container.metadata())
        .assemble(&mut cache, &options)
        .await;

    for slug in &assembled.ignored {
        eprintln!(
            "⚠️  {} is not available on wordpress.org and was left out",
            slug
        );
    }
    println!("{}", to_pretty_json(&assembled.blueprint)?);
    Ok(())
}
