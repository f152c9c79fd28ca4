//! NLI-based zero-shot classifier using ONNX Runtime
//!
//! Implements zero-shot classification the bart-large-mnli way: each
//! candidate label is turned into the hypothesis "This example is {label}."
//! and scored against the input text (the premise) with a natural language
//! inference model. The entailment logits are softmaxed across labels to
//! give a probability-like distribution.
//!
//! The model is loaded lazily on the first call, keeping startup fast in
//! code paths that never reach the classifier (empty inputs, pre-filtered
//! fragments).
//!
//! Configuration via environment variables:
//! - `SKILLSCAN_MODEL_PATH`: base directory with `model.onnx` and
//!   `tokenizer.json` (default: `./models/nli`)
//! - `SKILLSCAN_NLI_THREADS`: ONNX intra-op thread count (default: 2)

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use ort::session::Session;
use ort::value::Value;
use parking_lot::Mutex;
use tokenizers::Tokenizer;

use super::{Classification, ZeroShotClassifier};

/// Index of the entailment logit in the MNLI head
/// (contradiction / neutral / entailment).
const ENTAILMENT_INDEX: usize = 2;

/// Configuration for the NLI classifier.
#[derive(Debug, Clone)]
pub struct NliConfig {
    /// Path to the ONNX model file.
    pub model_path: PathBuf,
    /// Path to the tokenizer file.
    pub tokenizer_path: PathBuf,
    /// Maximum premise+hypothesis sequence length.
    pub max_length: usize,
    /// Template the label is substituted into to form the hypothesis.
    pub hypothesis_template: String,
}

impl Default for NliConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl NliConfig {
    /// Build configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        let base = std::env::var("SKILLSCAN_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./models/nli"));

        Self {
            model_path: base.join("model.onnx"),
            tokenizer_path: base.join("tokenizer.json"),
            max_length: 512,
            hypothesis_template: "This example is {}.".to_string(),
        }
    }

    /// Configuration with explicit paths (tests, programmatic use).
    pub fn with_paths(model_path: PathBuf, tokenizer_path: PathBuf) -> Self {
        Self {
            model_path,
            tokenizer_path,
            max_length: 512,
            hypothesis_template: "This example is {}.".to_string(),
        }
    }

    fn hypothesis_for(&self, label: &str) -> String {
        self.hypothesis_template.replace("{}", label)
    }
}

/// Lazily initialized ONNX session and tokenizer.
struct LazyModel {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
}

impl LazyModel {
    fn load(config: &NliConfig) -> Result<Self> {
        let num_threads = std::env::var("SKILLSCAN_NLI_THREADS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(2);

        tracing::info!(
            "Loading NLI model from {:?} with {} threads",
            config.model_path,
            num_threads
        );

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .with_intra_threads(num_threads)
            .context("Failed to set intra threads")?
            .commit_from_file(&config.model_path)
            .context("Failed to load NLI model")?;

        let tokenizer = Tokenizer::from_file(&config.tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {e}"))?;

        tracing::info!("NLI model loaded");

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }

    /// Entailment logit for one (premise, hypothesis) pair.
    fn entailment_logit(&self, premise: &str, hypothesis: &str, max_length: usize) -> Result<f32> {
        let encoding = self
            .tokenizer
            .encode((premise, hypothesis), true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {e}"))?;

        let input_ids: Vec<i64> = encoding
            .get_ids()
            .iter()
            .take(max_length)
            .map(|&id| id as i64)
            .collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .take(max_length)
            .map(|&m| m as i64)
            .collect();
        let seq_len = input_ids.len();

        let input_ids_value = Value::from_array((vec![1, seq_len], input_ids))?;
        let attention_mask_value = Value::from_array((vec![1, seq_len], attention_mask))?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![
            "input_ids" => &input_ids_value,
            "attention_mask" => &attention_mask_value,
        ])?;

        let (_shape, logits) = outputs[0].try_extract_tensor::<f32>()?;
        logits
            .get(ENTAILMENT_INDEX)
            .copied()
            .context("NLI output missing entailment logit")
    }
}

/// Zero-shot classifier backed by an ONNX NLI model.
pub struct NliClassifier {
    config: NliConfig,
    lazy_model: OnceLock<std::result::Result<Arc<LazyModel>, String>>,
}

impl NliClassifier {
    /// Create a classifier; the model is not loaded until the first
    /// [`ZeroShotClassifier::classify`] call.
    pub fn new(config: NliConfig) -> Self {
        Self {
            config,
            lazy_model: OnceLock::new(),
        }
    }

    /// Whether the model has been loaded yet (diagnostics).
    pub fn is_model_loaded(&self) -> bool {
        matches!(self.lazy_model.get(), Some(Ok(_)))
    }

    fn ensure_model_loaded(&self) -> Result<&Arc<LazyModel>> {
        let result = self.lazy_model.get_or_init(|| {
            LazyModel::load(&self.config)
                .map(Arc::new)
                .map_err(|e| e.to_string())
        });

        match result {
            Ok(model) => Ok(model),
            Err(e) => Err(anyhow::anyhow!("Failed to load NLI model: {e}")),
        }
    }
}

impl ZeroShotClassifier for NliClassifier {
    fn classify(&self, text: &str, labels: &[&str]) -> Result<Classification> {
        let model = self.ensure_model_loaded()?;

        let mut logits = Vec::with_capacity(labels.len());
        for label in labels {
            let hypothesis = self.config.hypothesis_for(label);
            logits.push(model.entailment_logit(text, &hypothesis, self.config.max_length)?);
        }

        let scores = softmax(&logits);

        let mut ranked: Vec<(String, f32)> = labels
            .iter()
            .map(|l| l.to_string())
            .zip(scores)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(Classification {
            labels: ranked.iter().map(|(l, _)| l.clone()).collect(),
            scores: ranked.iter().map(|(_, s)| *s).collect(),
        })
    }
}

/// Numerically stable softmax over entailment logits.
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum == 0.0 {
        return vec![0.0; logits.len()];
    }
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hypothesis_template_substitution() {
        let config = NliConfig::with_paths("m.onnx".into(), "t.json".into());
        assert_eq!(
            config.hypothesis_for("AI skill"),
            "This example is AI skill."
        );
    }

    #[test]
    fn softmax_sums_to_one_and_preserves_order() {
        let scores = softmax(&[2.0, 1.0, 0.5]);
        let sum: f32 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(scores[0] > scores[1] && scores[1] > scores[2]);
    }

    #[test]
    fn lazy_classifier_does_not_load_at_construction() {
        let classifier =
            NliClassifier::new(NliConfig::with_paths("missing.onnx".into(), "missing.json".into()));
        assert!(!classifier.is_model_loaded());
    }
}
