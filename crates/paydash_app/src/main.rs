mod cli;
mod platform;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use paydash_core::View;
use paydash_logging::dash_info;

use cli::{Cli, Commands};
use platform::config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)?;
    if let Some(base_url) = cli.base_url.clone() {
        config.base_url = base_url;
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.poll_interval_ms = interval_ms;
    }
    config.validate()?;

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    platform::logging::initialize(config.log_destination, level);
    dash_info!("paydash starting, base_url={}", config.base_url);

    match &cli.command {
        Commands::Login { username, password } => {
            platform::app::run_login(&config, username, password)
        }
        Commands::Logout => platform::app::run_logout(&config),
        Commands::Whoami => platform::app::run_whoami(&config),
        Commands::Dashboard { once } => platform::app::run_view(&config, View::Dashboard, *once),
        Commands::Transactions { once } => {
            platform::app::run_view(&config, View::Transactions, *once)
        }
        Commands::Wallet { once } => platform::app::run_view(&config, View::Wallet, *once),
    }
}
