//! Documented constants for the classification cascade
//!
//! All tunable parameters live here with justification for their values.
//! Centralizing constants prevents magic numbers and makes tuning easier.
//! Call sites take these through [`crate::config::CascadeConfig`] so tests
//! can override per call without mutating shared state.

// =============================================================================
// CASCADE THRESHOLDS
// =============================================================================

/// Default stage-1 binary cutoff: "Artificial Intelligence" score required
/// for a chunk to proceed to the discriminating stage.
///
/// Justification:
/// - 0.60 is comfortably above the 0.50 coin-flip point of a 2-label
///   zero-shot call, so weakly-AI text does not flood stage 2
/// - Low enough that legitimate but tersely-worded AI text ("neural
///   rendering") still gets a stage-2 hearing
pub const AI_RELATED_THRESHOLD: f32 = 0.60;

/// Stricter stage-1 cutoff used when screening interest tags and paragraphs.
///
/// Interests and prose carry far more incidental mentions of AI than
/// publication titles do, so those call sites raise the bar.
pub const SCREENING_THRESHOLD: f32 = 0.75;

/// Minimum "AI skill" score in the discriminating (many-label) stage.
///
/// Justification:
/// - By stage 2 the text has already cleared the coarse binary filter, so
///   this stage only needs "AI skill" to out-compete the specific negative
///   label it is closest to, not clear an absolute bar
/// - With ~50 candidate labels the probability mass is spread thin; 0.15 is
///   several times the uniform share (~0.02)
pub const SKILL_MIN_CONFIDENCE: f32 = 0.15;

/// Stage-1 confidence at or above which stage 2 is skipped entirely.
///
/// An unambiguous binary signal makes the 50-way classification redundant
/// and occasionally noisy; short-circuiting also saves the most expensive
/// call in the pipeline.
pub const OVERRIDE_HIGH_CONFIDENCE: f32 = 0.99;

// =============================================================================
// CLASSIFIER CACHE
// =============================================================================

/// Maximum number of memoized (text, label-set) classification results.
///
/// One inference call per chunk per stage dominates pipeline cost, and the
/// same chunk text recurs across records (shared boilerplate phrases,
/// repeated interests). 10k entries of short strings plus score vectors is
/// a few MB at most; least-recently-used eviction beyond that.
pub const CLASSIFIER_CACHE_CAPACITY: usize = 10_000;

// =============================================================================
// KEYPHRASE EXTRACTION
// =============================================================================

/// Number of candidate phrases requested per extraction.
pub const KEYPHRASE_TOP_N: usize = 5;

/// Maximum tokens per candidate phrase (n-gram upper bound).
pub const KEYPHRASE_MAX_NGRAM: usize = 4;

/// Diversity weight for maximal-marginal-relevance selection.
///
/// 0.0 would return the `top_n` candidates most similar to the document
/// (near-duplicates included); 1.0 would maximize mutual dissimilarity and
/// ignore relevance. 0.3 keeps relevance primary while suppressing
/// "deep learning" / "deep learning models" style near-duplicates.
pub const MMR_DIVERSITY: f32 = 0.3;

// =============================================================================
// LANGUAGE FILTERING
// =============================================================================

/// Token count below which text is assumed English.
///
/// Language identifiers are unreliable on very short strings; without this
/// floor, meaningful acronyms like "AI" or "NLP" would be rejected.
pub const SHORT_TEXT_TOKEN_FLOOR: usize = 3;
