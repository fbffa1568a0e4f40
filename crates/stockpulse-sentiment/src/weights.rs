//! Pretrained weights artifact for the sentiment network.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::SentimentError;

/// Number of sentiment classes the head projects onto.
pub(crate) const CLASS_COUNT: usize = 3;

/// Deserialized model weights, exported offline as JSON.
///
/// The vocabulary maps surface tokens to embedding row indices; `pad_id` and
/// `unk_id` must be valid rows. Class labels are listed in the head's output
/// order, the same order as `output_weights` rows and `output_bias`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelWeights {
    pub vocab: HashMap<String, usize>,
    pub pad_id: usize,
    pub unk_id: usize,
    pub embed_dim: usize,
    pub max_tokens: usize,
    pub labels: Vec<String>,
    /// One row per vocabulary id, each of length `embed_dim`.
    pub embedding: Vec<Vec<f64>>,
    /// `CLASS_COUNT` rows, each of length `embed_dim`.
    pub output_weights: Vec<Vec<f64>>,
    pub output_bias: Vec<f64>,
}

impl ModelWeights {
    /// Reads and validates a weights artifact from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Io`]/[`SentimentError::Parse`] if the file
    /// cannot be read or decoded, or [`SentimentError::Weights`] if the
    /// dimensions are inconsistent.
    pub fn from_file(path: &Path) -> Result<Self, SentimentError> {
        let raw = std::fs::read_to_string(path)?;
        let weights: ModelWeights = serde_json::from_str(&raw)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Checks the artifact's internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Weights`] naming the first inconsistency.
    pub fn validate(&self) -> Result<(), SentimentError> {
        let fail = |reason: String| Err(SentimentError::Weights(reason));

        if self.max_tokens == 0 {
            return fail("max_tokens must be positive".to_string());
        }
        if self.embed_dim == 0 {
            return fail("embed_dim must be positive".to_string());
        }
        if self.vocab.is_empty() {
            return fail("vocabulary is empty".to_string());
        }
        if self.labels.len() != CLASS_COUNT {
            return fail(format!(
                "expected {CLASS_COUNT} class labels, found {}",
                self.labels.len()
            ));
        }
        for special in [("pad_id", self.pad_id), ("unk_id", self.unk_id)] {
            if special.1 >= self.embedding.len() {
                return fail(format!(
                    "{} {} has no embedding row (table has {})",
                    special.0,
                    special.1,
                    self.embedding.len()
                ));
            }
        }
        if let Some((token, &id)) = self
            .vocab
            .iter()
            .find(|(_, &id)| id >= self.embedding.len())
        {
            return fail(format!(
                "vocab token \"{token}\" maps to id {id} beyond the embedding table ({} rows)",
                self.embedding.len()
            ));
        }
        if let Some(row) = self
            .embedding
            .iter()
            .position(|row| row.len() != self.embed_dim)
        {
            return fail(format!(
                "embedding row {row} has length {}, expected {}",
                self.embedding[row].len(),
                self.embed_dim
            ));
        }
        if self.output_weights.len() != CLASS_COUNT {
            return fail(format!(
                "expected {CLASS_COUNT} output weight rows, found {}",
                self.output_weights.len()
            ));
        }
        if let Some(row) = self
            .output_weights
            .iter()
            .position(|row| row.len() != self.embed_dim)
        {
            return fail(format!(
                "output weight row {row} has length {}, expected {}",
                self.output_weights[row].len(),
                self.embed_dim
            ));
        }
        if self.output_bias.len() != CLASS_COUNT {
            return fail(format!(
                "expected {CLASS_COUNT} output bias values, found {}",
                self.output_bias.len()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_weights() -> ModelWeights {
        let mut vocab = HashMap::new();
        vocab.insert("[PAD]".to_string(), 0);
        vocab.insert("[UNK]".to_string(), 1);
        vocab.insert("soar".to_string(), 2);
        ModelWeights {
            vocab,
            pad_id: 0,
            unk_id: 1,
            embed_dim: 2,
            max_tokens: 8,
            labels: vec![
                "positive".to_string(),
                "negative".to_string(),
                "neutral".to_string(),
            ],
            embedding: vec![vec![0.0, 0.0], vec![0.0, 0.0], vec![1.0, 0.0]],
            output_weights: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]],
            output_bias: vec![0.0, 0.0, 0.0],
        }
    }

    #[test]
    fn minimal_weights_validate() {
        assert!(minimal_weights().validate().is_ok());
    }

    #[test]
    fn rejects_vocab_id_beyond_embedding_table() {
        let mut weights = minimal_weights();
        weights.vocab.insert("orphan".to_string(), 99);
        let err = weights.validate().unwrap_err();
        assert!(matches!(err, SentimentError::Weights(_)), "got: {err:?}");
    }

    #[test]
    fn rejects_ragged_embedding_rows() {
        let mut weights = minimal_weights();
        weights.embedding[2] = vec![1.0];
        assert!(weights.validate().is_err());
    }

    #[test]
    fn rejects_wrong_label_count() {
        let mut weights = minimal_weights();
        weights.labels.pop();
        assert!(weights.validate().is_err());
    }

    #[test]
    fn parses_json_artifact() {
        let raw = r#"{
            "vocab": {"[PAD]": 0, "[UNK]": 1, "rally": 2},
            "pad_id": 0,
            "unk_id": 1,
            "embed_dim": 2,
            "max_tokens": 16,
            "labels": ["positive", "negative", "neutral"],
            "embedding": [[0.0, 0.0], [0.0, 0.0], [0.3, -0.1]],
            "output_weights": [[1.0, 0.0], [0.0, 1.0], [0.2, 0.2]],
            "output_bias": [0.0, 0.1, -0.1]
        }"#;
        let weights: ModelWeights = serde_json::from_str(raw).unwrap();
        assert!(weights.validate().is_ok());
        assert_eq!(weights.vocab.len(), 3);
    }
}
