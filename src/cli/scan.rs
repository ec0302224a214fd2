use blueprint::blueprint::{AssemblyOptions, ManifestAssembler};
use blueprint::core::BlueprintResult;
use blueprint::di::{Installation, ServiceContainer};
use blueprint::scanner::{scan_constants, scan_plugin_options};
use blueprint::snapshot::Snapshot;

/// List the constants `wp-config.php` defines with literal values
pub fn constants(snapshot: &Snapshot) -> BlueprintResult<()> {
    let Some(source) = snapshot.config_source() else {
        println!("No wp-config.php available. Pass --root or add wp_config to the snapshot.");
        return Ok(());
    };

    let constants = scan_constants(&source);
    if constants.is_empty() {
        println!("No constants found.");
        return Ok(());
    }

    for constant in constants {
        println!("{} = {}", constant.name, constant.value);
    }
    Ok(())
}

/// List the options each active plugin reads, with their current values
///
/// Plugins the blueprint cannot install are skipped along with `ignore`.
pub async fn options(
    container: &ServiceContainer,
    snapshot: &Snapshot,
    ignore: &[String],
) -> BlueprintResult<()> {
    let mut cache = container.locator_cache()?;
    let assembly = AssemblyOptions {
        ignore: ignore.to_vec(),
        ..Default::default()
    };
    let assembled = ManifestAssembler::new(snapshot, container.config(), container.metadata())
        .assemble(&mut cache, &assembly)
        .await;

    let mut skipped = ignore.to_vec();
    skipped.extend(assembled.ignored);

    let found = scan_plugin_options(snapshot, &skipped);
    if found.is_empty() {
        println!("No plugin options found.");
        return Ok(());
    }

    for plugin in found {
        println!("{}", plugin.slug);
        for (name, value) in &plugin.options {
            println!("  {} = {}", name, serde_json::to_string(value)?);
        }
    }
    Ok(())
}
