//! HTTP server for the wage engine.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wage_engine::api::{create_router, AppState};
use wage_engine::config::ConfigLoader;

#[derive(Parser, Debug)]
#[command(name = "wage-engine")]
#[command(about = "Gross/net wage, withholding tax and severance calculations over HTTP")]
struct Args {
    /// Jurisdiction configuration directory.
    #[arg(short, long, default_value = "./config/cl", env = "WAGE_ENGINE_CONFIG")]
    config: PathBuf,

    /// Address to listen on.
    #[arg(short, long, default_value = "127.0.0.1:3000", env = "WAGE_ENGINE_BIND")]
    bind: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = ConfigLoader::load(&args.config)
        .with_context(|| format!("failed to load configuration from {}", args.config.display()))?;
    info!(
        jurisdiction = %config.jurisdiction().code,
        periods = config.periods().len(),
        latest = %config.latest().effective_date,
        "Legal parameters loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!(addr = %args.bind, "Listening");

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
