//! Zero-shot text classification
//!
//! The cascade consumes a zero-shot classifier capability: given a text and
//! an ordered label set, produce one score per label. Two label sets are
//! used — a cheap 2-label AI/Not-AI pass and an expensive ~50-label
//! discriminating pass (see [`labels`]).
//!
//! [`nli::NliClassifier`] is the production implementation (ONNX,
//! bart-large-mnli style); tests supply stubs through the
//! [`ZeroShotClassifier`] trait. [`cache::CachedClassifier`] memoizes either.

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod cache;
pub mod labels;
pub mod nli;

pub use cache::CachedClassifier;

/// Result of one zero-shot call: labels ranked by descending score, with the
/// matching probability-like scores (summing to ≤ 1 over the label set).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Labels ranked best-first.
    pub labels: Vec<String>,
    /// Scores aligned with `labels`.
    pub scores: Vec<f32>,
}

impl Classification {
    /// Score for a label, if the classifier returned it.
    pub fn score_for(&self, label: &str) -> Option<f32> {
        self.labels
            .iter()
            .position(|l| l == label)
            .and_then(|idx| self.scores.get(idx).copied())
    }

    /// The top-ranked label, if any.
    pub fn top_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }
}

/// Zero-shot classification capability.
///
/// Implementations must be deterministic for a fixed (text, labels) input:
/// the memoizing cache treats a hit as identical to a fresh call.
pub trait ZeroShotClassifier: Send + Sync {
    /// Classify `text` against the ordered candidate `labels`.
    fn classify(&self, text: &str, labels: &[&str]) -> Result<Classification>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_lookup_by_label() {
        let result = Classification {
            labels: vec!["Artificial Intelligence".into(), "Not AI".into()],
            scores: vec![0.8, 0.2],
        };
        assert_eq!(result.score_for("Artificial Intelligence"), Some(0.8));
        assert_eq!(result.score_for("Not AI"), Some(0.2));
        assert_eq!(result.score_for("Missing"), None);
        assert_eq!(result.top_label(), Some("Artificial Intelligence"));
    }
}
