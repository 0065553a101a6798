//! SmartSlot API server binary.

use std::net::SocketAddr;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use smartslot_api::config::ApiConfig;
use smartslot_core::llm::LlmClient;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "smartslot_server", about = "SmartSlot API server")]
struct Args {
    /// Host to bind the HTTP listener.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/smartslot"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,smartslot_api=debug,smartslot_core=debug".parse().unwrap()
            }),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env()?;
    config.bind_addr = format!("{}:{}", args.host, args.port);
    config.database_url = args.database_url.clone();

    info!(database_url = %config.database_url, addr = %config.bind_addr, "starting smartslot_server");

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await?;

    info!("running database migrations");
    smartslot_api::migrate(&pool).await?;

    let llm = match &config.llm {
        Some(llm_config) => Some(LlmClient::new(llm_config.clone())?),
        None => {
            info!("no LLM provider configured; /ai routes will reject requests");
            None
        }
    };

    let state = smartslot_api::AppState::new(pool, config.clone(), llm);
    let app = smartslot_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    info!(addr = %local_addr, "REST API listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
