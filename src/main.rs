//! Janlens HTTP server entrypoint.

use std::net::SocketAddr;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use janlens::config::Config;
use janlens::gateway::{AppState, create_router_with_state};
use janlens::lookup::JancodeLookupClient;
use janlens::pipeline::Estimator;
use janlens::vision::OpenAiVisionModel;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        model = %config.openai_model,
        "Janlens starting"
    );

    if config.openai_api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set; vision calls will be rejected upstream");
    }
    if config.lookup_app_id.is_empty() {
        tracing::warn!("JANLENS_LOOKUP_APP_ID is not set; lookup calls will be rejected upstream");
    }

    let vision = OpenAiVisionModel::new(
        config.openai_url.clone(),
        config.openai_api_key.clone(),
        config.openai_model.clone(),
        config.model_timeout,
    )?;

    let lookup = JancodeLookupClient::new(
        config.lookup_url.clone(),
        config.lookup_app_id.clone(),
        config.limits.max_results_per_keyword,
        config.search_timeout,
    )?;

    let estimator = Estimator::new(vision, lookup, config.limits, config.search_timeout);
    let app = create_router_with_state(AppState::new(estimator));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Janlens shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("JANLENS_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
