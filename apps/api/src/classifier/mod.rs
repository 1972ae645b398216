//! Text Classifier: pluggable, trait-based scorer that labels a title and body
//! as `real` or `fake` from a linear decision margin.
//!
//! Default: `LinearTextModel` (bag-of-words tf-idf weights loaded from JSON).
//!
//! `AppState` holds an `Option<Arc<dyn TextClassifier>>`; the classify endpoint
//! answers 503 when no model was configured at startup.

pub mod handlers;
pub mod linear;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use linear::LinearTextModel;

pub const MIN_CHARS: usize = 10;
pub const MAX_CHARS: usize = 10_000;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Input too short. Provide at least {min} characters (got {len}).")]
    InputTooShort { len: usize, min: usize },

    #[error("Input too long. Max {max} characters (got {len}).")]
    InputTooLong { len: usize, max: usize },

    #[error("could not load classifier model: {0}")]
    ModelLoad(String),

    #[error("malformed classifier model: {0}")]
    ModelFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Fake,
    Real,
}

/// One classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Label,
    /// Logistic squash of the margin. Monotonic, not a calibrated probability.
    pub score: f64,
    pub margin: f64,
    /// `|margin| < tau`; the label is forced to `real` in that band.
    pub uncertain: bool,
}

impl Prediction {
    pub fn from_margin(margin: f64, uncertain_tau: f64) -> Self {
        let (label, uncertain) = decide(margin, uncertain_tau);
        Prediction {
            label,
            score: squash(margin),
            margin,
            uncertain,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap classifier backends without touching the handler.
///
/// Carried in `AppState` as `Arc<dyn TextClassifier>`.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Model name reported to clients.
    fn name(&self) -> &str;

    fn uncertain_tau(&self) -> f64;

    /// Classifies already combined text. Length bounds are enforced here.
    async fn classify(&self, text: &str) -> Result<Prediction, ClassifierError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

/// Trims title and body and joins them with one space.
pub fn combine_text(title: &str, text: &str) -> String {
    format!("{} {}", title.trim(), text.trim()).trim().to_string()
}

/// Enforces `MIN_CHARS..=MAX_CHARS`, counted in characters.
pub fn check_length(text: &str) -> Result<usize, ClassifierError> {
    let len = text.chars().count();
    if len < MIN_CHARS {
        return Err(ClassifierError::InputTooShort { len, min: MIN_CHARS });
    }
    if len > MAX_CHARS {
        return Err(ClassifierError::InputTooLong { len, max: MAX_CHARS });
    }
    Ok(len)
}

pub fn squash(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}

/// Positive margin is `real`. Inside the uncertain band the label is `real`
/// regardless of sign.
pub fn decide(margin: f64, uncertain_tau: f64) -> (Label, bool) {
    if margin.abs() < uncertain_tau {
        return (Label::Real, true);
    }
    let label = if margin > 0.0 { Label::Real } else { Label::Fake };
    (label, false)
}
