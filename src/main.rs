use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;

use categorizer::infrastructure::model::ModelManager;
use categorizer::infrastructure::observability::{TracingConfig, init_tracing};
use categorizer::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(TracingConfig::default(), settings.server.port);

    // Model loading must never stop the server: a failed load leaves
    // the service in degraded pass-through mode.
    let mut model_manager = ModelManager::new();
    let loaded = model_manager.load_models(
        Path::new(&settings.model.model_path),
        Path::new(&settings.model.encoder_path),
    );
    if !loaded {
        tracing::warn!("Model artifacts failed to load - serving without predictions");
    }

    let state = AppState {
        categorization_service: Arc::new(model_manager.into_service()),
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
