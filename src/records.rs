//! Record types carried through the pipeline
//!
//! Explicit value types instead of loosely-shaped maps: callers know which
//! fields are required (`title`, `text`) and which are optional metadata
//! carried through untouched.

use serde::{Deserialize, Serialize};

/// An interest tag that passed the cascade, with its extracted skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interest {
    /// The original interest text, trimmed.
    #[serde(rename = "interest_text")]
    pub text: String,
    /// Skill phrases extracted from the interest (never empty: the raw
    /// interest text is the fallback).
    pub skills: Vec<String>,
}

/// A prose sentence that passed the cascade, with its extracted skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphMatch {
    /// The sentence the skills were extracted from.
    #[serde(rename = "paragraph_text")]
    pub text: String,
    /// Skill phrases (never empty: sentences with no extractable phrases
    /// are dropped).
    pub skills: Vec<String>,
}

/// A publication record. `title` is required; other metadata is optional
/// and carried through unchanged. `skills` is filled by the cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Publication {
    /// A publication with only a title set.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            authors: Vec::new(),
            skills: Vec::new(),
        }
    }
}
