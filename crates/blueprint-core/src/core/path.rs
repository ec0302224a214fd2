use crate::core::error::{BlueprintError, BlueprintResult};
use std::path::{Path, PathBuf};

/// Get the blueprint home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\blueprint
/// - Linux: ~/.config/blueprint
/// - macOS: ~/Library/Application Support/blueprint
pub fn blueprint_home() -> BlueprintResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| BlueprintError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("blueprint"))
}

/// Get the cache directory
///
/// Platform-specific locations:
/// - Windows: %LOCALAPPDATA%\blueprint\cache
/// - Linux: ~/.cache/blueprint
/// - macOS: ~/Library/Caches/blueprint
pub fn cache_dir() -> BlueprintResult<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .ok_or_else(|| BlueprintError::Path("Could not determine cache directory".to_string()))?;
    Ok(cache_dir.join("blueprint"))
}

/// Get the config file path (`<home>/config.yaml`)
pub fn config_file() -> BlueprintResult<PathBuf> {
    Ok(blueprint_home()?.join("config.yaml"))
}

/// Get the data directory holding state that survives between sessions
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\blueprint\data
/// - Linux: ~/.local/share/blueprint
/// - macOS: ~/Library/Application Support/blueprint
pub fn data_dir() -> BlueprintResult<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| BlueprintError::Path("Could not determine data directory".to_string()))?;
    Ok(data_dir.join("blueprint"))
}

/// Get the persisted selection file path
pub fn selection_file() -> BlueprintResult<PathBuf> {
    Ok(data_dir()?.join("selection.json"))
}

/// Location of `wp-config.php` inside a WordPress root
pub fn wp_config_file(wp_root: &Path) -> PathBuf {
    wp_root.join("wp-config.php")
}

/// Directory holding installed plugins inside a WordPress root
pub fn plugins_dir(wp_root: &Path) -> PathBuf {
    wp_root.join("wp-content").join("plugins")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> BlueprintResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
