use std::sync::Arc;

use crate::classifier::TextClassifier;
use crate::compose::ComposeOptions;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable text classifier. `None` when `CLASSIFIER_MODEL_PATH` is unset.
    pub classifier: Option<Arc<dyn TextClassifier>>,
    /// Page setup and fallback link used by every CV build.
    pub compose_options: ComposeOptions,
}

impl AppState {
    pub fn new(config: Config, classifier: Option<Arc<dyn TextClassifier>>) -> Self {
        let compose_options = ComposeOptions {
            fallback_website: config.fallback_website_url.clone(),
            ..ComposeOptions::default()
        };
        AppState {
            config,
            classifier,
            compose_options,
        }
    }
}
