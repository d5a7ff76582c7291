//! fitlog - Single-User Fitness Log
//!
//! Main entry point: configures logging, loads configuration, and hands
//! control to the interactive shell.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fitlog::config;
use fitlog::shell::Shell;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting fitlog v{}", env!("CARGO_PKG_VERSION"));

    let config = config::load_config()?;
    Shell::new(config).run()?;

    Ok(())
}
