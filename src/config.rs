//! Configuration for the classification cascade
//!
//! All cascade tunables in one value type with environment variable
//! overrides. Sensible defaults, configurable in production.

use std::env;

use crate::constants::{
    AI_RELATED_THRESHOLD, KEYPHRASE_TOP_N, OVERRIDE_HIGH_CONFIDENCE, SCREENING_THRESHOLD,
    SKILL_MIN_CONFIDENCE,
};

/// Thresholds and limits governing the two-stage cascade.
///
/// Passed by value into [`crate::cascade::SkillPipeline`]; tests construct
/// their own instead of mutating shared state.
#[derive(Debug, Clone, Copy)]
pub struct CascadeConfig {
    /// Stage-1 binary cutoff ("Artificial Intelligence" score).
    pub binary_threshold: f32,
    /// Stricter stage-1 cutoff used when screening interests and
    /// paragraphs.
    pub screening_threshold: f32,
    /// Minimum "AI skill" score in the discriminating stage.
    pub skill_min_confidence: f32,
    /// Stage-1 confidence at which stage 2 is skipped.
    pub override_confidence: f32,
    /// Candidate phrases requested per keyphrase extraction.
    pub top_n: usize,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            binary_threshold: AI_RELATED_THRESHOLD,
            screening_threshold: SCREENING_THRESHOLD,
            skill_min_confidence: SKILL_MIN_CONFIDENCE,
            override_confidence: OVERRIDE_HIGH_CONFIDENCE,
            top_n: KEYPHRASE_TOP_N,
        }
    }
}

impl CascadeConfig {
    /// Load from environment variables, falling back to defaults.
    ///
    /// - `SKILLSCAN_AI_THRESHOLD`: stage-1 binary cutoff
    /// - `SKILLSCAN_SCREENING_THRESHOLD`: stage-1 cutoff for
    ///   interest/paragraph screening
    /// - `SKILLSCAN_SKILL_MIN_CONFIDENCE`: stage-2 minimum score
    /// - `SKILLSCAN_OVERRIDE_CONFIDENCE`: stage-2 skip threshold
    /// - `SKILLSCAN_KEYPHRASE_TOP_N`: phrases per extraction
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = parse_var("SKILLSCAN_AI_THRESHOLD") {
            config.binary_threshold = v;
        }
        if let Some(v) = parse_var("SKILLSCAN_SCREENING_THRESHOLD") {
            config.screening_threshold = v;
        }
        if let Some(v) = parse_var("SKILLSCAN_SKILL_MIN_CONFIDENCE") {
            config.skill_min_confidence = v;
        }
        if let Some(v) = parse_var("SKILLSCAN_OVERRIDE_CONFIDENCE") {
            config.override_confidence = v;
        }
        if let Ok(val) = env::var("SKILLSCAN_KEYPHRASE_TOP_N") {
            if let Ok(n) = val.parse() {
                config.top_n = n;
            }
        }

        config
    }
}

fn parse_var(name: &str) -> Option<f32> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = CascadeConfig::default();
        assert_eq!(config.binary_threshold, AI_RELATED_THRESHOLD);
        assert_eq!(config.screening_threshold, SCREENING_THRESHOLD);
        assert_eq!(config.skill_min_confidence, SKILL_MIN_CONFIDENCE);
        assert_eq!(config.override_confidence, OVERRIDE_HIGH_CONFIDENCE);
    }

    #[test]
    fn env_overrides_screening_threshold_only() {
        // No other test touches this variable, so set/remove is safe even
        // with the parallel test runner.
        env::set_var("SKILLSCAN_SCREENING_THRESHOLD", "0.9");
        let config = CascadeConfig::from_env();
        env::remove_var("SKILLSCAN_SCREENING_THRESHOLD");

        assert_eq!(config.screening_threshold, 0.9);
        assert_eq!(config.binary_threshold, AI_RELATED_THRESHOLD);
        assert_eq!(config.skill_min_confidence, SKILL_MIN_CONFIDENCE);
    }
}
