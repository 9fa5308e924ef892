//! Serve command - ingests the corpus, builds the workflow, and serves HTTP

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::AppConfig;
use crate::domain::ingestion::ChunkingConfig;
use crate::domain::workflow::QaWorkflow;
use crate::infrastructure::encyclopedia::WikipediaClient;
use crate::infrastructure::ingestion::DocumentLoader;
use crate::infrastructure::llm::{HttpClient, OpenAiProvider};
use crate::infrastructure::logging;
use crate::infrastructure::retrieval::InMemoryIndexStore;

/// Run the server
///
/// Ingestion and workflow construction complete before the listener binds,
/// so the first request never races initialization.
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let workflow = build_workflow(&config).await?;
    workflow.build();

    let state = AppState::ready(workflow);
    let app = create_router(state);

    let addr = build_socket_addr(&config)?;
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

async fn build_workflow(config: &AppConfig) -> anyhow::Result<Arc<QaWorkflow>> {
    let api_key = config.llm.api_key.clone().ok_or_else(|| {
        anyhow::anyhow!("llm.api_key is not configured (set APP__LLM__API_KEY)")
    })?;

    let chunking = ChunkingConfig::new(config.retrieval.chunk_size, config.retrieval.chunk_overlap);
    let loader = DocumentLoader::new(HttpClient::new()).with_chunking(chunking);

    let passages = loader
        .load(
            Path::new(&config.documents.dir),
            &config.documents.fallback_urls,
        )
        .await?;

    let store = InMemoryIndexStore::from_passages(passages).with_top_k(config.retrieval.top_k);
    info!(chunks = store.len(), "Corpus indexed");

    let provider = match &config.llm.base_url {
        Some(base_url) => OpenAiProvider::with_base_url(
            HttpClient::new(),
            &api_key,
            &config.llm.model,
            base_url,
        ),
        None => OpenAiProvider::new(HttpClient::new(), &api_key, &config.llm.model),
    };

    let provider = match config.llm.temperature {
        Some(temperature) => provider.with_default_temperature(temperature),
        None => provider,
    };

    let encyclopedia = WikipediaClient::new(HttpClient::new());

    let workflow = QaWorkflow::new(
        Arc::new(provider),
        Arc::new(store),
        Arc::new(encyclopedia),
    )
    .with_agent_max_iterations(config.agent.max_iterations);

    Ok(Arc::new(workflow))
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
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
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
