use clap::Parser;
use tracing::{info, warn};

mod cli;
mod commands;
mod render;

fn main() -> anyhow::Result<()> {
    // logs go to stderr so `cadence export` can be piped
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence=warn,cadence_ledger=warn".into()),
        )
        .init();

    let args = cli::Cli::parse();

    // load config: --config > CADENCE_CONFIG env > ~/.cadence/cadence.toml
    let config_path = args
        .config
        .clone()
        .or_else(|| std::env::var("CADENCE_CONFIG").ok());
    let config = cadence_core::CadenceConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        warn!("Config load failed ({}), using defaults", e);
        cadence_core::CadenceConfig::default()
    });

    if !config.display.color {
        console::set_colors_enabled(false);
    }

    let db_path = args
        .db
        .clone()
        .unwrap_or_else(|| config.database.path.clone().into());
    info!(path = %db_path.display(), "opening ledger");
    let ledger = cadence_ledger::Ledger::open(&db_path)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::dispatch(args.command, &ledger, &config.display, &mut out)
}
