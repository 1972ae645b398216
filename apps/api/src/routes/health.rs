use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and classifier status.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let classifier = match &state.classifier {
        Some(c) => json!({
            "loaded": true,
            "model": c.name(),
            "uncertain_tau": c.uncertain_tau()
        }),
        None => json!({
            "loaded": false,
            "model": null,
            "uncertain_tau": state.config.uncertain_tau
        }),
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "cvgen-api",
        "classifier": classifier
    }))
}
