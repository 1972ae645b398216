//! Axum route handler for the Classify API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classifier::{check_length, combine_text, Label};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub label: Label,
    pub score: f64,
    pub len_chars: usize,
    pub model: String,
    pub uncertain_tau: f64,
    pub uncertain: bool,
}

/// POST /api/v1/classify
///
/// Labels a title and body as real or fake. 503 when no model is configured.
pub async fn handle_classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    let classifier = state
        .classifier
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("no classifier model is loaded".to_string()))?;

    let combined = combine_text(&request.title, &request.text);
    let len_chars = check_length(&combined)?;
    let prediction = classifier.classify(&combined).await?;

    if prediction.uncertain {
        warn!(
            margin = prediction.margin,
            tau = classifier.uncertain_tau(),
            len_chars,
            "classification inside uncertain band; reporting real"
        );
    }

    Ok(Json(ClassifyResponse {
        label: prediction.label,
        score: round4(prediction.score),
        len_chars,
        model: classifier.name().to_string(),
        uncertain_tau: classifier.uncertain_tau(),
        uncertain: prediction.uncertain,
    }))
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
