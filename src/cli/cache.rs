use blueprint::core::BlueprintResult;
use blueprint::di::ServiceContainer;

/// Drop every cached locator lookup
pub fn clean(container: &ServiceContainer) -> BlueprintResult<()> {
    let mut cache = container.locator_cache()?;

    if cache.is_empty() {
        println!("Locator cache is empty. Nothing to clean.");
        return Ok(());
    }

    let count = cache.len();
    cache.clear()?;

    println!("✓ Cleared {} cached lookup(s)", count);
    if let Some(path) = cache.path() {
        println!("  Removed: {}", path.display());
    }
    Ok(())
}
