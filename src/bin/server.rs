//! Empathy Engine server binary.
//!
//! Loads the emotion classifier once at startup, then serves the analysis
//! API until interrupted. Pass a TOML config path as the first argument to
//! override the defaults.

use empathy_engine::classifier::OnnxClassifier;
use empathy_engine::config::EngineConfig;
use empathy_engine::server::AnalysisServer;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::from_file(std::path::Path::new(&path))?,
        None => EngineConfig::default(),
    };

    tracing::info!(
        "loading emotion model {} (this may take a while on first run)",
        config.model.model_id
    );
    let classifier = tokio::task::spawn_blocking({
        let model_config = config.model.clone();
        move || OnnxClassifier::new(&model_config)
    })
    .await??;

    let server = AnalysisServer::start(Arc::new(classifier), &config).await?;
    tracing::info!("empathy engine ready on port {}", server.port());

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    server.shutdown();
    Ok(())
}
