//! skillscan CLI
//!
//! Reads staff profile records from a JSON file, runs each record's
//! interests, paragraphs, and publications through the classification
//! cascade, and writes the per-person skill output as JSON to stdout.
//!
//! Usage: `skillscan <profiles.json>`
//!
//! Input: an array of `{name, interests, paragraphs, publications}`
//! objects. Records that fail mid-classification are skipped with a
//! warning; processing continues with the next record.

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use skillscan::cascade::SkillPipeline;
use skillscan::classifier::nli::{NliClassifier, NliConfig};
use skillscan::config::CascadeConfig;
use skillscan::embedding::{EmbedConfig, OnnxEmbedder};
use skillscan::records::{Interest, ParagraphMatch, Publication};
use skillscan::skills::combine_all_ai_skills;

/// One staff profile as supplied by the scraping collaborators.
#[derive(Debug, Deserialize)]
struct ProfileRecord {
    name: String,
    #[serde(default)]
    interests: Vec<String>,
    #[serde(default)]
    paragraphs: Vec<String>,
    #[serde(default)]
    publications: Vec<Publication>,
}

/// Per-person classification output.
#[derive(Debug, Serialize)]
struct ProfileReport {
    name: String,
    is_ai_related: bool,
    ai_skills: Vec<String>,
    interests: Vec<Interest>,
    paragraphs: Vec<ParagraphMatch>,
    publications: Vec<Publication>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .context("usage: skillscan <profiles.json>")?;

    let raw = fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;
    let profiles: Vec<ProfileRecord> =
        serde_json::from_str(&raw).context("failed to parse profile records")?;

    let config = CascadeConfig::from_env();
    let pipeline = SkillPipeline::new(
        NliClassifier::new(NliConfig::from_env()),
        OnnxEmbedder::new(EmbedConfig::from_env()),
        config,
    );

    let mut reports = Vec::with_capacity(profiles.len());
    for profile in profiles {
        tracing::info!(name = %profile.name, "processing profile");
        match classify_profile(&pipeline, &profile, config) {
            Ok(report) => reports.push(report),
            Err(e) => {
                // Classifier faults abort the record, not the run.
                tracing::warn!(name = %profile.name, "skipping profile: {e:#}");
            }
        }
    }

    serde_json::to_writer_pretty(std::io::stdout().lock(), &reports)
        .context("failed to write report")?;
    println!();
    Ok(())
}

fn classify_profile(
    pipeline: &SkillPipeline<NliClassifier, OnnxEmbedder>,
    profile: &ProfileRecord,
    config: CascadeConfig,
) -> Result<ProfileReport> {
    // Interests and paragraphs are screened at the stricter threshold;
    // publication titles use the configured default.
    let interests = pipeline.filter_ai_interests(&profile.interests, config.screening_threshold)?;
    let paragraphs =
        pipeline.filter_ai_paragraphs(&profile.paragraphs, config.screening_threshold)?;
    let publications =
        pipeline.filter_ai_publications(profile.publications.clone(), config.binary_threshold)?;

    let ai_skills = combine_all_ai_skills(&interests, &publications, &paragraphs);

    Ok(ProfileReport {
        name: profile.name.clone(),
        is_ai_related: !ai_skills.is_empty(),
        ai_skills,
        interests,
        paragraphs,
        publications,
    })
}
