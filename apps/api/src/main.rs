mod classifier;
mod compose;
mod config;
mod errors;
mod layout;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::classifier::{LinearTextModel, TextClassifier};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unusable env values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvgen API v{}", env!("CARGO_PKG_VERSION"));

    // Load the text classifier, if configured
    let classifier: Option<Arc<dyn TextClassifier>> = match &config.classifier_model_path {
        Some(path) => {
            let model = LinearTextModel::load(path, config.uncertain_tau).with_context(|| {
                format!("failed to load classifier model from {}", path.display())
            })?;
            Some(Arc::new(model) as Arc<dyn TextClassifier>)
        }
        None => {
            warn!("CLASSIFIER_MODEL_PATH not set; /api/v1/classify will answer 503");
            None
        }
    };

    info!(
        policy = ?config.form_array_policy,
        fallback_website = config.fallback_website_url.as_deref().unwrap_or("-"),
        "CV composer configured"
    );

    // Build app state
    let state = AppState::new(config.clone(), classifier);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
