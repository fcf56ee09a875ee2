//! Advisory service entry point

use std::net::SocketAddr;

use clap::Parser;

use agro_advisory::services::{RealPredictionClient, SqliteAdvisoryStore};
use agro_advisory::traits::AdvisoryStore;
use agro_advisory::{Advisor, AdvisoryError, AdvisoryResult, AdvisoryServer};

/// Command line arguments for the advisory server
#[derive(Parser, Debug)]
#[command(name = "agro-advisory")]
#[command(about = "Soil advisory relay between farmers and the prediction service")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Base URL of the external prediction service
    #[arg(long, env = "PREDICTION_URL", default_value = "http://localhost:5000")]
    prediction_url: String,

    /// SQLite database URL (use `sqlite::memory:` for an ephemeral store)
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://advisory.db")]
    database_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> AdvisoryResult<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    agro_advisory::logging::init_tracing(&args.log_level);

    let addr: SocketAddr = format!("0.0.0.0:{}", args.port)
        .parse()
        .map_err(|e| AdvisoryError::config(format!("invalid port: {e}")))?;

    tracing::info!(
        "starting advisory server on port {} (prediction service: {})",
        args.port,
        args.prediction_url
    );

    // Wire up collaborators
    let prediction_client = RealPredictionClient::new(&args.prediction_url);
    let store = SqliteAdvisoryStore::connect(&args.database_url).await?;
    store.initialize().await?;

    let advisor = Advisor::new(prediction_client, store);
    let server = AdvisoryServer::new(advisor);

    server.run(addr).await?;

    tracing::info!("advisory server stopped");
    Ok(())
}
