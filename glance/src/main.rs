use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glance::api::{create_router, AppState};
use glance::auth::StaticCredentialStore;
use glance::config::Config;
use glance::drive::{DriveClient, DriveResolver};
use glance::llm::{ContentAnalyzer, LlmProvider};

#[derive(Parser)]
#[command(name = "glance")]
#[command(about = "Image and document analysis backend")]
struct Args {
    /// Interface to bind (overrides GLANCE_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides GLANCE_PORT)
    #[arg(long)]
    port: Option<u16>,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "glance=info,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();
    init_tracing();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    match &config.llm {
        Some(llm_config) => tracing::info!("Initializing LLM provider: {}...", llm_config.model),
        None => tracing::warn!("Neither LLM_MODEL nor GOOGLE_API_KEY is set"),
    }
    let llm = LlmProvider::new(config.llm.as_ref());
    if !llm.is_available() {
        tracing::warn!("LLM unavailable - analysis requests will fail");
    }
    let backend = llm.backend().clone();

    let drive = DriveClient::from_config(&config.drive).await;
    if !drive.is_enabled() {
        tracing::warn!("Google Drive disabled - Drive links will be reported as inaccessible");
    }

    let credentials = StaticCredentialStore::from_config(&config.auth);
    tracing::info!("Loaded {} user(s)", credentials.len());

    let state = AppState::new(
        config.clone(),
        Arc::new(llm),
        Arc::new(drive),
        Arc::new(credentials),
    )?
    .with_llm_backend(backend);

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Glance starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/health", addr);
    tracing::info!("  API docs:     http://{}/api/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
