use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recommender::api::{create_router, AppState};
use recommender::config::{Config, LogFormat, LoggingConfig};
use recommender::llm::LlmProvider;

#[derive(Parser)]
#[command(name = "recommender")]
#[command(about = "Recommend clearer, testable defining objectives")]
struct Args {
    /// Listen address, overrides HOST
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides PORT
    #[arg(long)]
    port: Option<u16>,
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "recommender=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    init_tracing(&LoggingConfig::from_env());

    let mut config = Config::from_env()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if config.server.api_key.is_none() {
        tracing::warn!(
            "API_KEY is not set; the recommendation endpoint will refuse every request."
        );
    }
    if config.llm.model_id.is_none() {
        tracing::warn!(
            "BEDROCK_MODEL_ID is not set; the recommendation endpoint will report a configuration error."
        );
    }

    let llm = LlmProvider::from_config(&config.server, &config.llm)?;
    tracing::info!(
        env = %config.server.env,
        backend = llm.backend().kind(),
        model_id = llm.model_id().unwrap_or("<unset>"),
        "LLM transport ready"
    );

    let state = AppState::new(config.clone(), llm);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let prefix = &config.server.env;
    tracing::info!("Recommender starting on http://{}", addr);
    tracing::info!("  Endpoint:     POST http://{}/{}/recommendation", addr, prefix);
    tracing::info!("  Health check: http://{}/{}/health", addr, prefix);
    tracing::info!("  API docs:     http://{}/{}/docs", addr, prefix);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests...");
}
