//! Sentence embeddings for keyphrase scoring
//!
//! Keyphrase extraction ranks candidate n-grams by semantic similarity to
//! their source text, which needs sentence embeddings. The production
//! implementation runs a MiniLM-class model through ONNX Runtime with mean
//! pooling and L2 normalization; [`HashEmbedder`] is a deterministic
//! fallback for environments without model files (and for tests).
//!
//! Configuration via environment variables:
//! - `SKILLSCAN_EMBED_MODEL_PATH`: base directory with `model.onnx` and
//!   `tokenizer.json` (default: `./models/embed`)
//! - `SKILLSCAN_EMBED_THREADS`: ONNX intra-op thread count (default: 2)

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use ort::session::Session;
use ort::value::Value;
use parking_lot::Mutex;
use tokenizers::Tokenizer;

/// Embedding generation capability.
pub trait Embedder: Send + Sync {
    /// Generate an L2-normalized embedding for `text`.
    fn encode(&self, text: &str) -> Result<Vec<f32>>;

    /// Embedding dimensionality.
    fn dimension(&self) -> usize;

    /// Batch encode (default: sequential).
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|text| self.encode(text)).collect()
    }
}

/// Configuration for the ONNX sentence embedder.
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    /// Path to the ONNX model file.
    pub model_path: PathBuf,
    /// Path to the tokenizer file.
    pub tokenizer_path: PathBuf,
    /// Maximum sequence length.
    pub max_length: usize,
    /// Output embedding dimension.
    pub dimension: usize,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl EmbedConfig {
    /// Build configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        let base = std::env::var("SKILLSCAN_EMBED_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./models/embed"));

        Self {
            model_path: base.join("model.onnx"),
            tokenizer_path: base.join("tokenizer.json"),
            max_length: 256,
            dimension: 384,
        }
    }
}

struct LazyModel {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
}

impl LazyModel {
    fn load(config: &EmbedConfig) -> Result<Self> {
        let num_threads = std::env::var("SKILLSCAN_EMBED_THREADS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(2);

        tracing::info!(
            "Loading embedding model from {:?} with {} threads",
            config.model_path,
            num_threads
        );

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .with_intra_threads(num_threads)
            .context("Failed to set intra threads")?
            .commit_from_file(&config.model_path)
            .context("Failed to load embedding model")?;

        let tokenizer = Tokenizer::from_file(&config.tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {e}"))?;

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }
}

/// ONNX-backed sentence embedder with lazy model loading.
pub struct OnnxEmbedder {
    config: EmbedConfig,
    lazy_model: OnceLock<std::result::Result<Arc<LazyModel>, String>>,
}

impl OnnxEmbedder {
    /// Create an embedder; the model loads on the first `encode` call.
    pub fn new(config: EmbedConfig) -> Self {
        Self {
            config,
            lazy_model: OnceLock::new(),
        }
    }

    fn ensure_model_loaded(&self) -> Result<&Arc<LazyModel>> {
        let result = self.lazy_model.get_or_init(|| {
            LazyModel::load(&self.config)
                .map(Arc::new)
                .map_err(|e| e.to_string())
        });

        match result {
            Ok(model) => Ok(model),
            Err(e) => Err(anyhow::anyhow!("Failed to load embedding model: {e}")),
        }
    }
}

impl Embedder for OnnxEmbedder {
    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        if text.is_empty() {
            return Ok(vec![0.0; self.config.dimension]);
        }

        let model = self.ensure_model_loaded()?;

        let encoding = model
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {e}"))?;

        let max_length = self.config.max_length;
        let mut input_ids = vec![0i64; max_length];
        let mut attention = vec![0i64; max_length];
        let token_type_ids = vec![0i64; max_length];

        for (i, &id) in encoding.get_ids().iter().take(max_length).enumerate() {
            input_ids[i] = id as i64;
        }
        for (i, &mask) in encoding
            .get_attention_mask()
            .iter()
            .take(max_length)
            .enumerate()
        {
            attention[i] = mask as i64;
        }

        let input_ids_value = Value::from_array((vec![1, max_length], input_ids))?;
        let attention_value = Value::from_array((vec![1, max_length], attention.clone()))?;
        let token_type_value = Value::from_array((vec![1, max_length], token_type_ids))?;

        let mut session = model.session.lock();
        let outputs = session.run(ort::inputs![
            "input_ids" => &input_ids_value,
            "attention_mask" => &attention_value,
            "token_type_ids" => &token_type_value,
        ])?;

        let (_shape, token_embeddings) = outputs[0].try_extract_tensor::<f32>()?;

        // Mean pooling over attended positions, then L2 normalize.
        let dim = self.config.dimension;
        let mut pooled = vec![0.0f32; dim];
        let mut mask_sum = 0.0f32;

        for (seq_idx, &att) in attention.iter().enumerate() {
            if att == 1 {
                for (dim_idx, value) in pooled.iter_mut().enumerate() {
                    *value += token_embeddings[seq_idx * dim + dim_idx];
                }
                mask_sum += 1.0;
            }
        }

        if mask_sum > 0.0 {
            for value in &mut pooled {
                *value /= mask_sum;
            }
        }

        normalize(&mut pooled);
        Ok(pooled)
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}

/// Deterministic hash-based embedder.
///
/// Word and character-bigram hashes distributed over the embedding space;
/// far weaker than a trained model but deterministic and dependency-free.
/// Used when model files are unavailable and as the test embedder.
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(384)
    }
}

impl Embedder for HashEmbedder {
    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut embedding = vec![0.0f32; self.dimension];

        for word in text.to_lowercase().split_whitespace() {
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            let hash = hasher.finish();
            for bit in 0..64usize {
                let index = (hash as usize).wrapping_add(bit * 31) % self.dimension;
                embedding[index] += ((hash >> bit) & 1) as f32 * 0.1;
            }
        }

        let chars: Vec<char> = text.to_lowercase().chars().collect();
        for window in chars.windows(2) {
            let mut hasher = DefaultHasher::new();
            window.hash(&mut hasher);
            let hash = hasher.finish();
            for bit in 0..32usize {
                let index = (hash as usize).wrapping_add(bit) % self.dimension;
                embedding[index] += ((hash >> bit) & 1) as f32 * 0.05;
            }
        }

        normalize(&mut embedding);
        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// L2 normalize in place; zero vectors are left untouched.
fn normalize(embedding: &mut [f32]) {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in embedding {
            *value /= norm;
        }
    }
}
