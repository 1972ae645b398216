pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::classifier::handlers as classify;
use crate::compose::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // CV API
        .route("/api/v1/cv", post(handlers::handle_build_cv))
        .route("/api/v1/cv/form", post(handlers::handle_build_cv_form))
        .route("/api/v1/cv/layout", post(handlers::handle_layout_preview))
        // Classify API
        .route("/api/v1/classify", post(classify::handle_classify))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::classifier::{LinearTextModel, TextClassifier};
    use crate::compose::handlers::ARTIFACT_ID_HEADER;
    use crate::config::Config;
    use crate::models::form::FormArrayPolicy;

    const MODEL: &str = r#"{
        "name": "LinearSVC_TFIDF",
        "intercept": 0.0,
        "weights": {"report": 2.0, "hoax": -2.0}
    }"#;

    fn app(config: Config, with_model: bool) -> Router {
        let classifier = with_model.then(|| {
            Arc::new(LinearTextModel::from_json(MODEL, config.uncertain_tau).unwrap())
                as Arc<dyn TextClassifier>
        });
        build_router(AppState::new(config, classifier))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn cv_json() -> Value {
        json!({
            "personal": {
                "name": "Jane Doe",
                "email": "jane@example.com",
                "summary": "Backend engineer."
            },
            "experience": [{
                "organization": "Acme",
                "location": "Berlin",
                "role": "Engineer",
                "start_date": "2020",
                "description": "- Built things"
            }],
            "languages": [{
                "language": "German",
                "listening": "C1",
                "reading": "C1",
                "spoken_production": "B1",
                "spoken_interaction": "B2"
            }],
            "soft_skills": "Teamwork, Leadership"
        })
    }

    #[tokio::test]
    async fn test_health_reports_classifier() {
        let response = app(Config::default(), true)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["classifier"]["loaded"], true);
        assert_eq!(body["classifier"]["model"], "LinearSVC_TFIDF");
    }

    #[tokio::test]
    async fn test_build_cv_returns_pdf_download() {
        let response = app(Config::default(), false)
            .oneshot(post_json("/api/v1/cv", cv_json()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");

        let id = response.headers()[ARTIFACT_ID_HEADER]
            .to_str()
            .unwrap()
            .to_string();
        assert!(id.starts_with("Jane_Doe_"));
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert_eq!(disposition, format!("attachment; filename=\"{id}.pdf\""));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_missing_name_is_bad_request() {
        let response = app(Config::default(), false)
            .oneshot(post_json("/api/v1/cv", json!({"personal": {"name": " "}})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_layout_preview_returns_display_list() {
        let response = app(Config::default(), false)
            .oneshot(post_json("/api/v1/cv/layout", cv_json()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["sections"]["experience"], 1);
        let generated_at = body["generated_at"].as_str().unwrap();
        assert!(
            generated_at.parse::<chrono::DateTime<chrono::Utc>>().is_ok(),
            "generated_at is not RFC 3339: {generated_at}"
        );
        assert_eq!(body["sections"]["soft_skills"], 2);
        assert!(body["pages"].as_u64().unwrap() >= 1);
        assert_eq!(
            body["document"]["pages"].as_array().unwrap().len() as u64,
            body["pages"].as_u64().unwrap()
        );
    }

    fn uneven_form() -> Value {
        json!({
            "name": "Jane Doe",
            "exp_company": ["Acme", "Globex", "Initech"],
            "exp_position": ["Engineer", "Lead"],
            "exp_location": ["Berlin", "Berlin", "Berlin"],
            "exp_start": ["2020", "2021", "2022"],
            "exp_end": ["", "", ""],
            "exp_description": ["a", "b", "c"]
        })
    }

    #[tokio::test]
    async fn test_form_mismatch_rejected_under_strict_policy() {
        let response = app(Config::default(), false)
            .oneshot(post_json("/api/v1/cv/form", uneven_form()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.contains("experience"), "message: {message}");
    }

    #[tokio::test]
    async fn test_form_mismatch_truncated_when_configured() {
        let config = Config {
            form_array_policy: FormArrayPolicy::Truncate,
            ..Config::default()
        };
        let response = app(config, false)
            .oneshot(post_json("/api/v1/cv/form", uneven_form()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_classify_without_model_is_unavailable() {
        let response = app(Config::default(), false)
            .oneshot(post_json(
                "/api/v1/classify",
                json!({"title": "Report", "text": "official report confirms"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_classify_returns_label_and_score() {
        let response = app(Config::default(), true)
            .oneshot(post_json(
                "/api/v1/classify",
                json!({"title": "Report", "text": "official report confirms"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["label"], "real");
        assert_eq!(body["len_chars"], 31);
        assert_eq!(body["model"], "LinearSVC_TFIDF");
        assert_eq!(body["uncertain"], false);
        let score = body["score"].as_f64().unwrap();
        assert!(score > 0.5 && score < 1.0);
    }

    #[tokio::test]
    async fn test_classify_short_input_is_bad_request() {
        let response = app(Config::default(), true)
            .oneshot(post_json("/api/v1/classify", json!({"title": "hi", "text": ""})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = app(Config::default(), false)
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
