pub mod cache;
pub mod export;
pub mod generate;
pub mod scan;
pub mod select;

use blueprint::config::Config;
use blueprint::core::BlueprintResult;
use blueprint::di::ServiceContainer;
use blueprint::snapshot::Snapshot;
use clap::Args;
use std::path::{Path, PathBuf};

/// Where the installation's state comes from
#[derive(Args, Debug, Clone)]
pub struct SiteArgs {
    /// Installation snapshot (YAML, or JSON by extension)
    #[arg(short, long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// WordPress root holding wp-config.php and wp-content/plugins
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

impl SiteArgs {
    pub fn load(&self) -> BlueprintResult<Snapshot> {
        Snapshot::load(&self.snapshot, self.root.clone())
    }
}

/// Build the service container from `--config` or the user's config file
pub fn container(config: Option<&Path>) -> BlueprintResult<ServiceContainer> {
    match config {
        Some(path) => ServiceContainer::from_config(Config::load_from(path)?),
        None => ServiceContainer::new(),
    }
}
