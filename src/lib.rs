//! skillscan library
//!
//! Classifies free text about academic staff — interest tags, prose
//! paragraphs, publication titles — as AI-related or not, and produces a
//! normalized "AI skill" phrase set per person.
//!
//! # Pipeline
//! - Text normalization: spacing repair, numeric-domination rejection,
//!   sentence/chunk segmentation, language and year filters
//! - Two-stage zero-shot cascade: cheap binary AI/Not-AI screen, a
//!   high-confidence override, then a wide discriminating pass with "AI
//!   skill" against ~50 negative domain labels
//! - Keyphrase extraction with diversity control, each phrase re-validated
//!   through the same cascade
//! - Consolidation: substring-subsumption dedup per phrase list, value
//!   union across source shapes
//!
//! Classification results are memoized in a capacity-bounded LRU cache;
//! inference runs locally through ONNX Runtime.

pub mod cascade;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod keyphrase;
pub mod records;
pub mod similarity;
pub mod skills;
pub mod text;

pub use cascade::SkillPipeline;
pub use classifier::{CachedClassifier, Classification, ZeroShotClassifier};
pub use config::CascadeConfig;
pub use embedding::Embedder;
pub use records::{Interest, ParagraphMatch, Publication};
pub use skills::{combine_all_ai_skills, remove_substring_phrases};
