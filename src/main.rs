//! AgriServe API Server
//!
//! HTTP API serving the agricultural prediction models with advisory
//! enrichment and best-effort prediction logging.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use agriserve::models::ModelRegistry;
use agriserve::routes;
use agriserve::state::{AppState, ServerConfig};
use agriserve::store::SupabaseStore;

/// Timeout for outbound calls (weather proxy, store writes).
const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(10);

/// AgriServe API Server
#[derive(Parser, Debug)]
#[command(name = "agriserve")]
#[command(version)]
#[command(about = "Agriculture platform API server")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Directory containing the model artifacts
    #[arg(long, env = "MODELS_DIR", default_value = "models")]
    models_dir: PathBuf,

    /// Base URL of the hosted store
    #[arg(long, env = "SUPABASE_URL")]
    supabase_url: Option<String>,

    /// API key for the hosted store
    #[arg(long, env = "SUPABASE_KEY")]
    supabase_key: Option<String>,

    /// API key for the weather provider
    #[arg(long, env = "OPENWEATHER_API_KEY")]
    weather_api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    info!("AgriServe API Server v{}", env!("CARGO_PKG_VERSION"));
    info!("  Models dir: {:?}", cli.models_dir);

    let http = reqwest::Client::builder()
        .timeout(OUTBOUND_TIMEOUT)
        .build()?;

    let registry = ModelRegistry::load(&cli.models_dir);

    let store = match (cli.supabase_url, cli.supabase_key) {
        (Some(url), Some(key)) => {
            info!("Persistence store configured");
            Some(SupabaseStore::new(url, key, http.clone()))
        }
        _ => {
            info!("Persistence store not configured, prediction logging disabled");
            None
        }
    };

    if cli.weather_api_key.is_none() {
        info!("Weather API key not configured, weather endpoint disabled");
    }

    let config = ServerConfig {
        models_dir: cli.models_dir,
        weather_api_key: cli.weather_api_key,
    };

    let state = Arc::new(AppState::new(config, registry, store, http));
    let app = routes::router(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
