//! Memoizing wrapper around a zero-shot classifier
//!
//! The classifier call is the dominant cost of the pipeline (one inference
//! per chunk per stage), and the same chunk text recurs across records. This
//! wrapper memoizes results keyed by the exact (text, label-set) pair in a
//! capacity-bounded LRU map. A hit is semantically identical to a fresh
//! call; the underlying classifier is deterministic for fixed inputs.
//!
//! Wrapped in a `Mutex` because `LruCache` needs exclusive access even for
//! reads (to update recency order), so the wrapper is safe to share across
//! worker threads processing independent records.

use std::num::NonZeroUsize;
use std::sync::Arc;

use anyhow::Result;
use lru::LruCache;
use parking_lot::Mutex;

use super::labels::{AI_LABEL, AI_RELATED_LABELS, AI_SKILL_LABEL, CANDIDATE_LABELS};
use super::{Classification, ZeroShotClassifier};
use crate::constants::CLASSIFIER_CACHE_CAPACITY;

type CacheKey = (String, Vec<String>);

/// A zero-shot classifier with an LRU-memoized call surface and the two
/// stage-specific checks built on top of it.
pub struct CachedClassifier<C> {
    inner: C,
    cache: Mutex<LruCache<CacheKey, Arc<Classification>>>,
}

impl<C: ZeroShotClassifier> CachedClassifier<C> {
    /// Wrap `inner` with the default cache capacity.
    pub fn new(inner: C) -> Self {
        Self::with_capacity(inner, CLASSIFIER_CACHE_CAPACITY)
    }

    /// Wrap `inner` with an explicit cache capacity. Zero is clamped to 1;
    /// the cache always holds at least the most recent result.
    pub fn with_capacity(inner: C, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Classify through the cache. At most one underlying inference call per
    /// distinct (text, label-set) pair while the entry stays resident.
    pub fn classify(&self, text: &str, labels: &[&str]) -> Result<Arc<Classification>> {
        let key: CacheKey = (
            text.to_string(),
            labels.iter().map(|l| l.to_string()).collect(),
        );

        if let Some(hit) = self.cache.lock().get(&key) {
            tracing::debug!(text_len = text.len(), "classifier cache hit");
            return Ok(Arc::clone(hit));
        }

        let result = Arc::new(self.inner.classify(text, labels)?);
        self.cache.lock().put(key, Arc::clone(&result));
        Ok(result)
    }

    /// Stage 1: binary AI-vs-not check.
    ///
    /// Returns `(is_ai, confidence)` where `confidence` is the raw
    /// "Artificial Intelligence" score (0.0 when the label is absent from
    /// the response) and `is_ai` is true iff it meets `threshold`.
    /// Empty or whitespace-only text short-circuits to `(false, 0.0)`
    /// without an inference call.
    pub fn classify_ai(&self, text: &str, threshold: f32) -> Result<(bool, f32)> {
        if text.trim().is_empty() {
            return Ok((false, 0.0));
        }

        let result = self.classify(text, &AI_RELATED_LABELS)?;
        let confidence = result.score_for(AI_LABEL).unwrap_or(0.0);
        Ok((confidence >= threshold, confidence))
    }

    /// Stage 2: discriminating check against the wide label set.
    ///
    /// True iff "AI skill" appears among the returned labels with a score of
    /// at least `min_score`. Empty input is false without an inference call.
    pub fn is_ai_skill(&self, phrase: &str, min_score: f32) -> Result<bool> {
        if phrase.trim().is_empty() {
            return Ok(false);
        }

        let result = self.classify(phrase, CANDIDATE_LABELS)?;
        Ok(result
            .score_for(AI_SKILL_LABEL)
            .is_some_and(|score| score >= min_score))
    }

    /// Number of resident cache entries (diagnostics).
    pub fn cache_len(&self) -> usize {
        self.cache.lock().len()
    }

    /// The wrapped classifier.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts underlying calls; scores "Artificial Intelligence" 0.9 when
    /// the text mentions learning, else 0.1.
    struct CountingStub {
        calls: AtomicUsize,
    }

    impl CountingStub {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl ZeroShotClassifier for CountingStub {
        fn classify(&self, text: &str, labels: &[&str]) -> Result<Classification> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let positive = if text.contains("learning") { 0.9 } else { 0.1 };
            let mut scored: Vec<(String, f32)> = labels
                .iter()
                .map(|l| {
                    let score = if *l == AI_LABEL || *l == AI_SKILL_LABEL {
                        positive
                    } else {
                        (1.0 - positive) / (labels.len() - 1) as f32
                    };
                    (l.to_string(), score)
                })
                .collect();
            scored.sort_by(|a, b| b.1.total_cmp(&a.1));
            Ok(Classification {
                labels: scored.iter().map(|(l, _)| l.clone()).collect(),
                scores: scored.iter().map(|(_, s)| *s).collect(),
            })
        }
    }

    /// Answers every request with a single unrelated label, the way a
    /// misconfigured model responds when the expected label set is dropped
    /// or renamed upstream.
    struct LabelOmittingStub;

    impl ZeroShotClassifier for LabelOmittingStub {
        fn classify(&self, _text: &str, _labels: &[&str]) -> Result<Classification> {
            Ok(Classification {
                labels: vec!["Not AI-related".to_string()],
                scores: vec![1.0],
            })
        }
    }

    #[test]
    fn identical_calls_hit_the_cache() {
        let cached = CachedClassifier::new(CountingStub::new());

        let first = cached.classify("deep learning", &AI_RELATED_LABELS).unwrap();
        let second = cached.classify("deep learning", &AI_RELATED_LABELS).unwrap();

        assert_eq!(*first, *second);
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cached.cache_len(), 1);
    }

    #[test]
    fn different_label_sets_are_distinct_keys() {
        let cached = CachedClassifier::new(CountingStub::new());

        cached.classify("deep learning", &AI_RELATED_LABELS).unwrap();
        cached.classify("deep learning", CANDIDATE_LABELS).unwrap();

        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cached.cache_len(), 2);
    }

    #[test]
    fn capacity_bound_evicts_oldest() {
        let cached = CachedClassifier::with_capacity(CountingStub::new(), 2);

        cached.classify("a", &AI_RELATED_LABELS).unwrap();
        cached.classify("b", &AI_RELATED_LABELS).unwrap();
        cached.classify("c", &AI_RELATED_LABELS).unwrap();
        assert_eq!(cached.cache_len(), 2);

        // "a" was evicted, so this is a fresh inference call.
        cached.classify("a", &AI_RELATED_LABELS).unwrap();
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn empty_text_short_circuits_without_inference() {
        let cached = CachedClassifier::new(CountingStub::new());

        assert_eq!(cached.classify_ai("", 0.6).unwrap(), (false, 0.0));
        assert_eq!(cached.classify_ai("   ", 0.6).unwrap(), (false, 0.0));
        assert!(!cached.is_ai_skill("", 0.15).unwrap());
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn binary_check_thresholds_on_ai_score() {
        let cached = CachedClassifier::new(CountingStub::new());

        let (is_ai, confidence) = cached.classify_ai("machine learning", 0.6).unwrap();
        assert!(is_ai);
        assert!((confidence - 0.9).abs() < 1e-6);

        let (is_ai, confidence) = cached.classify_ai("medieval history", 0.6).unwrap();
        assert!(!is_ai);
        assert!((confidence - 0.1).abs() < 1e-6);
    }

    #[test]
    fn discriminating_check_thresholds_on_skill_score() {
        let cached = CachedClassifier::new(CountingStub::new());

        assert!(cached.is_ai_skill("transfer learning", 0.15).unwrap());
        assert!(!cached.is_ai_skill("baroque composition", 0.15).unwrap());
    }

    #[test]
    fn response_missing_ai_label_degrades_to_zero() {
        let cached = CachedClassifier::new(LabelOmittingStub);

        // Both stage checks treat an absent label as score 0.0 rather than
        // erroring out of the record.
        assert_eq!(
            cached.classify_ai("deep learning", 0.6).unwrap(),
            (false, 0.0)
        );
        assert!(!cached.is_ai_skill("deep learning", 0.15).unwrap());
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let cached = CachedClassifier::with_capacity(CountingStub::new(), 0);

        cached.classify("a", &AI_RELATED_LABELS).unwrap();
        cached.classify("b", &AI_RELATED_LABELS).unwrap();
        assert_eq!(cached.cache_len(), 1);
    }
}
