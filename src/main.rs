mod cli;

use crate::cli::app::App;
use crate::cli::args::Cli;
use anyhow::{Context, Result};
use clap::Parser;
use legacyvault::{LegacyError, VaultConfig};
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = VaultConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.log_filter);

    let app = App::new(config, &cli);
    if let Err(err) = app.run(cli.command).await {
        if let Some(legacy_err) = err.downcast_ref::<LegacyError>() {
            if legacy_err.is_retryable() {
                error!(error = %legacy_err, "store failure, the command can be retried");
            }
        }
        return Err(err);
    }
    Ok(())
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
