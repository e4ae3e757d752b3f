use std::sync::Arc;

use alert_dashboard::{
    auth::JwksVerifier,
    cmd::check::{self, CheckArgs},
    config::AppConfig,
    http_server::{self, ApiState},
    store::AlertStore,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding `app.yaml`.
    #[arg(long, global = true)]
    config_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serves the alert API.
    Run,
    /// Validates the alert dataset and prints a summary.
    Check(CheckArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    let subscriber =
        FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env()).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_server(cli.config_dir.as_deref()).await?,
        Commands::Check(args) => check::execute(args, cli.config_dir.as_deref())?,
    }

    Ok(())
}

async fn run_server(config_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!("Loading application configuration...");
    let config = AppConfig::new(config_dir)?;
    tracing::debug!(
        alerts_path = %config.alerts_path.display(),
        listen_address = %config.server.listen_address,
        allowed_origin = %config.server.allowed_origin,
        "Configuration loaded."
    );

    // The dataset is loaded once; a malformed record aborts startup.
    let store = AlertStore::load(&config.alerts_path)?;

    let verifier = JwksVerifier::from_config(&config.auth)?;
    tracing::info!(issuer = %config.auth.issuer_base_url, audience = %config.auth.audience, "Token verifier initialized.");

    let state = ApiState { config: Arc::new(config), store, verifier: Arc::new(verifier) };

    http_server::run_server_from_config(state).await?;
    tracing::info!("HTTP server stopped.");

    Ok(())
}
