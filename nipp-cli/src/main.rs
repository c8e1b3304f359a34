//! NIPP CLI - chart data for Northern Ireland property prices.

use clap::Parser;
use nipp_store::{DashboardConfig, DataStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "nipp-cli",
    version,
    about = "Northern Ireland property price data toolkit"
)]
struct Cli {
    /// TOML file with input paths (default: built-in layout)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Directory the configured paths are relative to
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: nipp_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(root) = cli.data_dir {
        config.root = root;
    }
    log::debug!("config: {:?}", config);

    let store = DataStore::new(config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    nipp_cmd::run(&store, cli.command, &mut out)
}
