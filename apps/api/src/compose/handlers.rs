//! Axum route handlers for the CV API.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::compose::{compose_cv, ComposeOptions, CvArtifact, SectionCounts};
use crate::errors::AppError;
use crate::layout::DisplayList;
use crate::models::cv::CvInput;
use crate::models::form::CvForm;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

pub const ARTIFACT_ID_HEADER: &str = "x-artifact-id";

#[derive(Debug, Serialize)]
pub struct LayoutPreviewResponse {
    pub id: String,
    pub file_name: String,
    pub generated_at: DateTime<Utc>,
    pub sections: SectionCounts,
    pub pages: usize,
    pub document: DisplayList,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cv
///
/// Builds the CV and returns it as a PDF download.
pub async fn handle_build_cv(
    State(state): State<AppState>,
    Json(input): Json<CvInput>,
) -> Result<(HeaderMap, Bytes), AppError> {
    render_pdf(input, state.compose_options.clone()).await
}

/// POST /api/v1/cv/form
///
/// Same as `/api/v1/cv`, but takes the parallel-array form payload. Arrays of
/// unequal length are handled per the configured `FORM_ARRAY_POLICY`.
pub async fn handle_build_cv_form(
    State(state): State<AppState>,
    Json(form): Json<CvForm>,
) -> Result<(HeaderMap, Bytes), AppError> {
    let input = form.into_input(state.config.form_array_policy)?;
    render_pdf(input, state.compose_options.clone()).await
}

/// POST /api/v1/cv/layout
///
/// Returns the recorded display list instead of PDF bytes.
pub async fn handle_layout_preview(
    State(state): State<AppState>,
    Json(input): Json<CvInput>,
) -> Result<Json<LayoutPreviewResponse>, AppError> {
    let options = state.compose_options.clone();
    let artifact = build(input, options).await?;

    Ok(Json(LayoutPreviewResponse {
        pages: artifact.page_count(),
        id: artifact.id,
        file_name: artifact.file_name,
        generated_at: artifact.generated_at,
        sections: artifact.sections,
        document: artifact.document,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Composition is CPU-bound; run it off the async executor.
async fn build(input: CvInput, options: ComposeOptions) -> Result<CvArtifact, AppError> {
    let artifact = tokio::task::spawn_blocking(move || compose_cv(&input, &options))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in compose: {e}")))??;
    Ok(artifact)
}

async fn render_pdf(input: CvInput, options: ComposeOptions) -> Result<(HeaderMap, Bytes), AppError> {
    let (artifact, pdf) = tokio::task::spawn_blocking(move || {
        let artifact = compose_cv(&input, &options)?;
        let pdf = artifact.to_pdf()?;
        Ok::<_, AppError>((artifact, pdf))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    Ok((download_headers(&artifact)?, Bytes::from(pdf)))
}

fn download_headers(artifact: &CvArtifact) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid disposition header: {e}")))?,
    );
    headers.insert(
        ARTIFACT_ID_HEADER,
        HeaderValue::from_str(&artifact.id)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid artifact id header: {e}")))?,
    );
    Ok(headers)
}
