//! Statistical keyphrase extraction with diversity control
//!
//! Pulls candidate 1–4-token phrases out of longer text: stopword-bounded
//! n-gram candidates are scored by embedding similarity to the source text,
//! then selected with maximal marginal relevance so near-duplicate phrases
//! are not all returned.
//!
//! Extraction alone does not decide AI relevance; every phrase returned here
//! is re-validated through the full cascade by the caller
//! (see [`crate::cascade`]).

use std::collections::HashSet;
use std::sync::LazyLock;

use anyhow::Result;
use ordered_float::OrderedFloat;
use regex::Regex;
use stop_words::{get, LANGUAGE};

use crate::constants::{KEYPHRASE_MAX_NGRAM, MMR_DIVERSITY};
use crate::embedding::Embedder;
use crate::similarity::cosine_similarity;

/// Word tokens, including pure-number tokens (which delimit runs below).
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9][A-Za-z0-9'\-]*").unwrap());

/// A candidate phrase with its relevance score against the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPhrase {
    pub phrase: String,
    pub score: f32,
}

/// Embedding-based keyphrase extractor.
pub struct KeyphraseExtractor<E> {
    embedder: E,
    stopwords: HashSet<String>,
    max_ngram: usize,
    diversity: f32,
}

impl<E: Embedder> KeyphraseExtractor<E> {
    /// Extractor with English stopwords and default n-gram/diversity
    /// settings.
    pub fn new(embedder: E) -> Self {
        let stopwords = get(LANGUAGE::English)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect();
        Self {
            embedder,
            stopwords,
            max_ngram: KEYPHRASE_MAX_NGRAM,
            diversity: MMR_DIVERSITY,
        }
    }

    /// Override the diversity weight (0.0 = pure relevance).
    pub fn with_diversity(mut self, diversity: f32) -> Self {
        self.diversity = diversity;
        self
    }

    /// Extract up to `top_n` keyphrases from `text`.
    ///
    /// Empty or whitespace-only text yields an empty list. Candidates are
    /// lowercase n-grams of content-word runs (stopwords and numeric tokens
    /// delimit runs and never appear inside a phrase), ranked by cosine
    /// similarity to the full text and selected with maximal marginal
    /// relevance.
    pub fn extract(&self, text: &str, top_n: usize) -> Result<Vec<ScoredPhrase>> {
        if text.trim().is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }

        let candidates = self.candidates(text);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let doc_embedding = self.embedder.encode(text)?;
        let candidate_refs: Vec<&str> = candidates.iter().map(String::as_str).collect();
        let candidate_embeddings = self.embedder.encode_batch(&candidate_refs)?;

        let relevance: Vec<f32> = candidate_embeddings
            .iter()
            .map(|emb| cosine_similarity(&doc_embedding, emb))
            .collect();

        let selected = mmr_select(&relevance, &candidate_embeddings, top_n, self.diversity);

        Ok(selected
            .into_iter()
            .map(|idx| ScoredPhrase {
                phrase: candidates[idx].clone(),
                score: relevance[idx],
            })
            .collect())
    }

    /// Generate candidate n-grams bounded by stopwords and numeric tokens.
    fn candidates(&self, text: &str) -> Vec<String> {
        let tokens: Vec<String> = WORD
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect();

        let mut runs: Vec<Vec<&str>> = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        for token in &tokens {
            if self.stopwords.contains(token) || token.chars().all(|c| c.is_ascii_digit()) {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            } else {
                current.push(token.as_str());
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for run in &runs {
            for n in 1..=self.max_ngram.min(run.len()) {
                for window in run.windows(n) {
                    let phrase = window.join(" ");
                    if seen.insert(phrase.clone()) {
                        candidates.push(phrase);
                    }
                }
            }
        }

        candidates
    }
}

/// Maximal-marginal-relevance selection.
///
/// Greedily picks the candidate maximizing
/// `(1 - diversity) * relevance - diversity * max_similarity_to_selected`,
/// starting from the most relevant candidate.
fn mmr_select(
    relevance: &[f32],
    embeddings: &[Vec<f32>],
    top_n: usize,
    diversity: f32,
) -> Vec<usize> {
    let mut selected: Vec<usize> = Vec::new();
    let mut remaining: Vec<usize> = (0..relevance.len()).collect();

    while selected.len() < top_n && !remaining.is_empty() {
        let best = if selected.is_empty() {
            *remaining
                .iter()
                .max_by_key(|&&i| OrderedFloat(relevance[i]))
                .unwrap()
        } else {
            *remaining
                .iter()
                .max_by_key(|&&i| {
                    let redundancy = selected
                        .iter()
                        .map(|&s| OrderedFloat(cosine_similarity(&embeddings[i], &embeddings[s])))
                        .max()
                        .map(|v| v.0)
                        .unwrap_or(0.0);
                    OrderedFloat((1.0 - diversity) * relevance[i] - diversity * redundancy)
                })
                .unwrap()
        };

        selected.push(best);
        remaining.retain(|&i| i != best);
    }

    selected
}
