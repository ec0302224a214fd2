use blueprint::blueprint::AssemblyOptions;
use blueprint::core::{BlueprintError, BlueprintResult};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::select::SelectArgs;
use cli::SiteArgs;

#[derive(Parser)]
#[command(name = "blueprint")]
#[command(about = "Extract a WordPress Playground blueprint from a WordPress site")]
#[command(version)]
struct Cli {
    /// Config file to use instead of the user's config.yaml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the blueprint of the site as it stands
    Generate {
        #[command(flatten)]
        site: SiteArgs,
        /// Plugin or theme slugs to leave out
        #[arg(short, long, value_delimiter = ',')]
        ignore: Vec<String>,
        /// Leave every plugin out
        #[arg(long)]
        ignore_all_plugins: bool,
        /// Leave the theme out
        #[arg(long)]
        ignore_theme: bool,
    },
    /// Print the blueprint with the saved selection applied
    Export {
        #[command(flatten)]
        site: SiteArgs,
        /// Selection file to use instead of the user's one
        #[arg(long, value_name = "FILE")]
        selection: Option<PathBuf>,
        /// Print a Playground link instead of the JSON
        #[arg(long)]
        link: bool,
    },
    /// Change what the export includes
    Select {
        #[command(flatten)]
        site: SiteArgs,
        #[arg(long, value_name = "FILE")]
        selection: Option<PathBuf>,
        #[command(flatten)]
        changes: SelectArgs,
    },
    /// List what the scanners find on the site
    Scan {
        #[command(subcommand)]
        target: ScanTarget,
    },
    /// Manage the locator cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum ScanTarget {
    /// Constants defined in wp-config.php
    Constants {
        #[command(flatten)]
        site: SiteArgs,
    },
    /// Options read by active plugins
    Options {
        #[command(flatten)]
        site: SiteArgs,
        /// Plugin slugs to skip
        #[arg(short, long, value_delimiter = ',')]
        ignore: Vec<String>,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Remove every cached lookup
    Clean,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("blueprint=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n❌ {}", e);
            if let Some(hint) = hint(&e) {
                eprintln!("   {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> BlueprintResult<()> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Generate {
            site,
            ignore,
            ignore_all_plugins,
            ignore_theme,
        } => {
            let snapshot = site.load()?;
            let container = cli::container(config)?;
            let options = AssemblyOptions {
                ignore,
                ignore_all_plugins,
                ignore_theme,
            };
            cli::generate::run(&container, &snapshot, options).await
        }
        Commands::Export {
            site,
            selection,
            link,
        } => {
            let snapshot = site.load()?;
            let container = cli::container(config)?;
            cli::export::run(&container, &snapshot, selection.as_deref(), link).await
        }
        Commands::Select {
            site,
            selection,
            changes,
        } => {
            let snapshot = site.load()?;
            cli::select::run(&snapshot, selection.as_deref(), &changes)
        }
        Commands::Scan { target } => match target {
            ScanTarget::Constants { site } => cli::scan::constants(&site.load()?),
            ScanTarget::Options { site, ignore } => {
                let snapshot = site.load()?;
                let container = cli::container(config)?;
                cli::scan::options(&container, &snapshot, &ignore).await
            }
        },
        Commands::Cache { action } => match action {
            CacheAction::Clean => cli::cache::clean(&cli::container(config)?),
        },
    }
}

fn hint(error: &BlueprintError) -> Option<&'static str> {
    match error {
        BlueprintError::Snapshot(_) => {
            Some("Check the --snapshot file; it must be YAML, or JSON with a .json extension.")
        }
        BlueprintError::Config(_) => Some("Check the config file passed with --config."),
        BlueprintError::Selection(_) => {
            Some("Run `blueprint select --reset` to start from a fresh selection.")
        }
        _ => None,
    }
}
