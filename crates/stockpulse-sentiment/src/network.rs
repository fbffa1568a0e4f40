//! Forward pass for the pretrained sentiment head.

use crate::error::SentimentError;
use crate::weights::CLASS_COUNT;

/// Embedding table plus linear head over the three sentiment classes.
///
/// The forward pass mean-pools the embeddings of non-pad tokens and projects
/// the pooled vector through the head to obtain per-class logits.
#[derive(Debug, Clone)]
pub(crate) struct SentimentNet {
    embedding: Vec<Vec<f64>>,
    output_weights: Vec<Vec<f64>>,
    output_bias: Vec<f64>,
    embed_dim: usize,
    pad_id: usize,
}

impl SentimentNet {
    pub(crate) fn new(
        embedding: Vec<Vec<f64>>,
        output_weights: Vec<Vec<f64>>,
        output_bias: Vec<f64>,
        embed_dim: usize,
        pad_id: usize,
    ) -> Self {
        Self {
            embedding,
            output_weights,
            output_bias,
            embed_dim,
            pad_id,
        }
    }

    /// Computes per-class logits for an encoded headline.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Dimension`] if a token id has no embedding
    /// row or the encoding holds only pad tokens.
    pub(crate) fn forward(&self, token_ids: &[usize]) -> Result<[f64; CLASS_COUNT], SentimentError> {
        let mut pooled = vec![0.0_f64; self.embed_dim];
        let mut token_count = 0usize;

        for &id in token_ids {
            if id == self.pad_id {
                continue;
            }
            let row = self.embedding.get(id).ok_or_else(|| {
                SentimentError::Dimension(format!(
                    "token id {id} has no embedding row (table has {})",
                    self.embedding.len()
                ))
            })?;
            for (acc, value) in pooled.iter_mut().zip(row) {
                *acc += value;
            }
            token_count += 1;
        }

        if token_count == 0 {
            return Err(SentimentError::Dimension(
                "encoding contains only pad tokens".to_string(),
            ));
        }

        #[allow(clippy::cast_precision_loss)]
        let denom = token_count as f64;
        for value in &mut pooled {
            *value /= denom;
        }

        let mut logits = [0.0_f64; CLASS_COUNT];
        for (class, (weights, bias)) in self
            .output_weights
            .iter()
            .zip(&self.output_bias)
            .enumerate()
        {
            logits[class] = dot(weights, &pooled) + bias;
        }
        Ok(logits)
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Normalized exponential over the logits, stabilized by subtracting the max.
pub(crate) fn softmax(logits: &[f64; CLASS_COUNT]) -> [f64; CLASS_COUNT] {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut probs = [0.0_f64; CLASS_COUNT];
    let mut sum = 0.0_f64;
    for (prob, logit) in probs.iter_mut().zip(logits) {
        *prob = (logit - max).exp();
        sum += *prob;
    }
    for prob in &mut probs {
        *prob /= sum;
    }
    probs
}

/// Index and probability of the most likely class.
pub(crate) fn argmax(probs: &[f64; CLASS_COUNT]) -> (usize, f64) {
    let mut best = 0usize;
    for class in 1..CLASS_COUNT {
        if probs[class] > probs[best] {
            best = class;
        }
    }
    (best, probs[best])
}
