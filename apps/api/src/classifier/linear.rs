use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::classifier::{check_length, ClassifierError, Prediction, TextClassifier};

/// Serialized model artifact.
#[derive(Debug, Deserialize)]
struct ModelFile {
    name: String,
    #[serde(default)]
    intercept: f64,
    weights: HashMap<String, f64>,
    #[serde(default)]
    idf: HashMap<String, f64>,
}

/// Linear classifier over L2-normalised tf-idf term features.
///
/// `margin = Σ w[t] · x[t] + intercept`; terms without a weight contribute
/// nothing, terms without an idf entry use 1.0.
#[derive(Debug, Clone)]
pub struct LinearTextModel {
    name: String,
    intercept: f64,
    weights: HashMap<String, f64>,
    idf: HashMap<String, f64>,
    uncertain_tau: f64,
}

impl LinearTextModel {
    pub fn load(path: &Path, uncertain_tau: f64) -> Result<Self, ClassifierError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ClassifierError::ModelLoad(format!("{}: {e}", path.display())))?;
        let model = Self::from_json(&raw, uncertain_tau)?;
        info!(
            model = %model.name,
            terms = model.weights.len(),
            path = %path.display(),
            "classifier model loaded"
        );
        Ok(model)
    }

    pub fn from_json(raw: &str, uncertain_tau: f64) -> Result<Self, ClassifierError> {
        let file: ModelFile =
            serde_json::from_str(raw).map_err(|e| ClassifierError::ModelFormat(e.to_string()))?;

        if file.name.trim().is_empty() {
            return Err(ClassifierError::ModelFormat("model name is empty".to_string()));
        }
        if file.weights.is_empty() {
            return Err(ClassifierError::ModelFormat("model has no weights".to_string()));
        }
        if !file.intercept.is_finite()
            || file.weights.values().chain(file.idf.values()).any(|v| !v.is_finite())
        {
            return Err(ClassifierError::ModelFormat(
                "model contains non-finite coefficients".to_string(),
            ));
        }

        Ok(LinearTextModel {
            name: file.name,
            intercept: file.intercept,
            weights: file.weights,
            idf: file.idf,
            uncertain_tau,
        })
    }

    /// Signed distance from the decision boundary.
    pub fn margin(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let features = self.features(&tokens);
        let dot: f64 = features
            .iter()
            .filter_map(|(term, x)| self.weights.get(*term).map(|w| w * x))
            .sum();
        dot + self.intercept
    }

    fn features<'a>(&self, tokens: &'a [String]) -> HashMap<&'a str, f64> {
        let mut tf: HashMap<&str, f64> = HashMap::new();
        for token in tokens {
            *tf.entry(token.as_str()).or_insert(0.0) += 1.0;
        }
        for (term, value) in tf.iter_mut() {
            *value *= self.idf.get(*term).copied().unwrap_or(1.0);
        }
        let norm = tf.values().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in tf.values_mut() {
                *value /= norm;
            }
        }
        tf
    }
}

#[async_trait]
impl TextClassifier for LinearTextModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn uncertain_tau(&self) -> f64 {
        self.uncertain_tau
    }

    async fn classify(&self, text: &str) -> Result<Prediction, ClassifierError> {
        check_length(text)?;
        Ok(Prediction::from_margin(self.margin(text), self.uncertain_tau))
    }
}

/// Lowercased alphanumeric runs of at least two characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}
