//! The two-stage relevance cascade
//!
//! One shared evaluation primitive — stage-1 binary check, high-confidence
//! override, stage-2 discriminating check — applied at chunk granularity,
//! with three thin aggregation policies on top for the three source shapes
//! (interest tags, prose paragraphs, publication titles). Keeping the
//! cascade logic in one place avoids re-deriving the override/stage ordering
//! three times with drift risk.
//!
//! Aggregation differences, by design:
//! - interests: any passing chunk accepts the whole interest; keyphrases are
//!   extracted from the full original interest text, and the raw interest
//!   text is kept as the sole skill when extraction yields nothing
//! - paragraphs: per-sentence; a passing sentence with zero extracted
//!   keyphrases is discarded entirely (raw sentences are too noisy to serve
//!   as skill labels, unlike short curated interest tags)
//! - publications: per-sentence over the title; skills from all passing
//!   sentences are unioned onto the publication, and publications that
//!   accumulate no skills are dropped

use anyhow::Result;

use crate::classifier::{CachedClassifier, ZeroShotClassifier};
use crate::config::CascadeConfig;
use crate::embedding::Embedder;
use crate::keyphrase::KeyphraseExtractor;
use crate::records::{Interest, ParagraphMatch, Publication};
use crate::skills::remove_substring_phrases;
use crate::text::{clean_text, is_english, is_year_or_numeric, split_chunks, split_into_sentences};

/// The full classification pipeline: cached classifier, keyphrase
/// extractor, and the cascade thresholds.
pub struct SkillPipeline<C, E> {
    classifier: CachedClassifier<C>,
    extractor: KeyphraseExtractor<E>,
    config: CascadeConfig,
}

impl<C: ZeroShotClassifier, E: Embedder> SkillPipeline<C, E> {
    pub fn new(classifier: C, embedder: E, config: CascadeConfig) -> Self {
        Self {
            classifier: CachedClassifier::new(classifier),
            extractor: KeyphraseExtractor::new(embedder),
            config,
        }
    }

    /// The memoized classifier (diagnostics and direct stage access).
    pub fn classifier(&self) -> &CachedClassifier<C> {
        &self.classifier
    }

    /// Evaluate one chunk through the cascade.
    ///
    /// Stage 1 at `threshold`; a stage-1 confidence at or above the override
    /// cutoff accepts immediately without the expensive many-label call;
    /// otherwise stage 1 must pass and stage 2 decides.
    pub fn evaluate_chunk(&self, chunk: &str, threshold: f32) -> Result<bool> {
        let (is_ai, confidence) = self.classifier.classify_ai(chunk, threshold)?;

        if confidence >= self.config.override_confidence {
            tracing::debug!(chunk, confidence, "stage-1 override accept");
            return Ok(true);
        }
        if !is_ai {
            return Ok(false);
        }

        let accepted = self
            .classifier
            .is_ai_skill(chunk, self.config.skill_min_confidence)?;
        tracing::debug!(chunk, confidence, accepted, "stage-2 decision");
        Ok(accepted)
    }

    /// Whether any chunk of `fragment` passes the cascade.
    ///
    /// Year/numeric chunks are skipped before classification: a citation
    /// year can never be an AI skill, and skipping it keeps the rest of an
    /// otherwise-relevant sentence in play.
    fn fragment_passes(&self, fragment: &str, threshold: f32) -> Result<bool> {
        for chunk in split_chunks(fragment) {
            if is_year_or_numeric(&chunk) {
                continue;
            }
            if self.evaluate_chunk(&chunk, threshold)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Re-validate candidate phrases through the full cascade.
    ///
    /// A phrase surviving keyphrase extraction is not presumed AI-relevant
    /// merely because it came from AI-relevant source text; each one is
    /// normalized, language-filtered, and pushed through the same
    /// stage-1/override/stage-2 bar. Survivors are substring-deduplicated.
    fn refine_phrases<I>(&self, phrases: I, threshold: f32) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut refined = Vec::new();

        for raw in phrases {
            let Some(cleaned) = clean_text(&raw) else {
                continue;
            };
            let normalized = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
            if normalized.is_empty() || !is_english(&normalized) {
                continue;
            }
            if self.evaluate_chunk(&normalized, threshold)? {
                refined.push(normalized);
            }
        }

        Ok(remove_substring_phrases(refined))
    }

    /// Extract keyphrases from `text` and keep the ones that independently
    /// clear the cascade.
    pub fn extract_skills(&self, text: &str, threshold: f32) -> Result<Vec<String>> {
        let scored = self.extractor.extract(text, self.config.top_n)?;
        self.refine_phrases(scored.into_iter().map(|p| p.phrase), threshold)
    }

    /// Filter interest tags, returning the accepted ones with their skills.
    ///
    /// An interest is accepted if any of its chunks passes the cascade;
    /// keyphrases are then extracted from the full original interest text.
    /// If extraction yields nothing, the raw interest text itself is kept as
    /// the sole skill: interest tags are short, curated text and acceptable
    /// as labels.
    pub fn filter_ai_interests(
        &self,
        interests: &[String],
        threshold: f32,
    ) -> Result<Vec<Interest>> {
        let mut accepted = Vec::new();

        for interest in interests {
            let trimmed = interest.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !self.fragment_passes(trimmed, threshold)? {
                continue;
            }

            let mut skills = self.extract_skills(trimmed, threshold)?;
            if skills.is_empty() {
                skills = vec![trimmed.to_string()];
            }
            accepted.push(Interest {
                text: trimmed.to_string(),
                skills,
            });
        }

        Ok(accepted)
    }

    /// Filter prose paragraphs at sentence granularity.
    ///
    /// Non-English sentences are skipped before evaluation. A sentence that
    /// passes the cascade but yields zero keyphrases is discarded — no
    /// raw-text fallback here, unlike interests.
    pub fn filter_ai_paragraphs(
        &self,
        paragraphs: &[String],
        threshold: f32,
    ) -> Result<Vec<ParagraphMatch>> {
        let mut accepted = Vec::new();

        for paragraph in paragraphs {
            for sentence in split_into_sentences(paragraph) {
                if !is_english(&sentence) {
                    continue;
                }
                if !self.fragment_passes(&sentence, threshold)? {
                    continue;
                }

                let skills = self.extract_skills(&sentence, threshold)?;
                if skills.is_empty() {
                    continue;
                }
                accepted.push(ParagraphMatch {
                    text: sentence,
                    skills,
                });
            }
        }

        Ok(accepted)
    }

    /// Filter publications by title, attaching extracted skills.
    ///
    /// Skills from all passing sentences within one title are unioned onto
    /// the publication; a publication is kept only if it accumulated at
    /// least one skill.
    pub fn filter_ai_publications(
        &self,
        publications: Vec<Publication>,
        threshold: f32,
    ) -> Result<Vec<Publication>> {
        let mut accepted = Vec::new();

        for mut publication in publications {
            let title = publication.title.trim().to_string();
            if title.is_empty() {
                continue;
            }

            let mut collected: Vec<String> = Vec::new();
            for sentence in split_into_sentences(&title) {
                if !is_english(&sentence) {
                    continue;
                }
                if !self.fragment_passes(&sentence, threshold)? {
                    continue;
                }
                collected.extend(self.extract_skills(&sentence, threshold)?);
            }

            if collected.is_empty() {
                continue;
            }

            let mut seen = std::collections::HashSet::new();
            publication.skills = collected
                .into_iter()
                .filter(|s| seen.insert(s.clone()))
                .collect();
            accepted.push(publication);
        }

        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::labels::{AI_LABEL, AI_SKILL_LABEL};
    use crate::classifier::Classification;
    use crate::embedding::HashEmbedder;

    /// Marker-driven stub: binary AI score is high when the text contains
    /// an AI marker word; the discriminating stage follows the same rule.
    /// Optionally panics if the many-label stage is reached at all.
    struct StubClassifier {
        override_markers: Vec<&'static str>,
        ai_markers: Vec<&'static str>,
        forbid_discriminating: bool,
    }

    impl StubClassifier {
        fn new() -> Self {
            Self {
                override_markers: Vec::new(),
                ai_markers: vec!["learning", "neural", "robotics"],
                forbid_discriminating: false,
            }
        }
    }

    impl ZeroShotClassifier for StubClassifier {
        fn classify(&self, text: &str, labels: &[&str]) -> Result<Classification> {
            let lowered = text.to_lowercase();
            let score = if self.override_markers.iter().any(|m| lowered.contains(m)) {
                0.995
            } else if self.ai_markers.iter().any(|m| lowered.contains(m)) {
                0.9
            } else {
                0.05
            };

            if labels.len() == 2 {
                return Ok(Classification {
                    labels: vec![AI_LABEL.to_string(), "Not AI".to_string()],
                    scores: vec![score, 1.0 - score],
                });
            }

            assert!(
                !self.forbid_discriminating,
                "discriminating stage must not run for {text:?}"
            );
            let skill_score = if score > 0.5 { 0.4 } else { 0.0 };
            Ok(Classification {
                labels: vec![AI_SKILL_LABEL.to_string(), "Generic research".to_string()],
                scores: vec![skill_score, 1.0 - skill_score],
            })
        }
    }

    fn pipeline(classifier: StubClassifier) -> SkillPipeline<StubClassifier, HashEmbedder> {
        SkillPipeline::new(classifier, HashEmbedder::default(), CascadeConfig::default())
    }

    #[test]
    fn override_skips_discriminating_stage() {
        let pipeline = pipeline(StubClassifier {
            override_markers: vec!["unmistakably"],
            forbid_discriminating: true,
            ..StubClassifier::new()
        });

        // Marker scores 0.995 >= 0.99: accepted with stage 2 forbidden.
        assert!(pipeline
            .evaluate_chunk("unmistakably ai text", 0.6)
            .unwrap());
    }

    #[test]
    fn stage1_failure_rejects_without_stage2() {
        let pipeline = pipeline(StubClassifier {
            forbid_discriminating: true,
            ..StubClassifier::new()
        });

        assert!(!pipeline.evaluate_chunk("medieval poetry", 0.6).unwrap());
    }

    #[test]
    fn stage2_decides_when_stage1_passes_without_override() {
        let pipeline = pipeline(StubClassifier::new());
        assert!(pipeline.evaluate_chunk("deep learning", 0.6).unwrap());
    }

    #[test]
    fn interest_falls_back_to_raw_text_when_extraction_is_empty() {
        // The full interest passes, but every extracted candidate is a
        // sub-span that fails stage 1 on its own, so extraction comes back
        // empty and the raw interest text becomes the sole skill.
        let pipeline = pipeline(StubClassifier {
            ai_markers: vec!["learning for robots"],
            ..StubClassifier::new()
        });

        let accepted = pipeline
            .filter_ai_interests(&["learning for robots".to_string()], 0.6)
            .unwrap();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].skills, vec!["learning for robots".to_string()]);
    }

    #[test]
    fn empty_interest_strings_are_skipped() {
        let pipeline = pipeline(StubClassifier::new());
        let accepted = pipeline
            .filter_ai_interests(&["   ".to_string(), String::new()], 0.6)
            .unwrap();
        assert!(accepted.is_empty());
    }

    #[test]
    fn paragraph_sentence_without_phrases_is_discarded() {
        // The sentence passes stage 1 as a whole, but no extracted
        // candidate clears the cascade on its own, so the sentence is
        // dropped rather than kept raw.
        let pipeline = pipeline(StubClassifier {
            ai_markers: vec!["neural analysis of the historical archives"],
            ..StubClassifier::new()
        });

        let accepted = pipeline
            .filter_ai_paragraphs(
                &["Neural analysis of the historical archives is presented.".to_string()],
                0.6,
            )
            .unwrap();
        assert!(accepted.is_empty());
    }

    #[test]
    fn publications_without_skills_are_dropped() {
        let pipeline = pipeline(StubClassifier::new());
        let publications = vec![
            Publication::titled("Medieval poetry in the low countries"),
            Publication::titled("Neural networks for image segmentation"),
        ];

        let accepted = pipeline.filter_ai_publications(publications, 0.6).unwrap();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].title, "Neural networks for image segmentation");
        assert!(!accepted[0].skills.is_empty());
    }
}
