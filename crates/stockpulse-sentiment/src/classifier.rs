//! Headline classifier with the confidence-floor override policy.

use std::path::Path;

use crate::error::SentimentError;
use crate::network::{argmax, softmax, SentimentNet};
use crate::tokenizer::WordTokenizer;
use crate::types::{Classification, Sentiment};
use crate::weights::{ModelWeights, CLASS_COUNT};

/// Argmax probabilities below this floor have their label overridden to
/// neutral. The reported confidence is not adjusted by the override.
pub const CONFIDENCE_FLOOR: f64 = 0.60;

/// Pretrained three-class sentiment classifier.
///
/// Built once at process start from a weights artifact and passed by
/// reference; nothing is mutated per call.
#[derive(Debug)]
pub struct SentimentClassifier {
    tokenizer: WordTokenizer,
    net: SentimentNet,
    labels: [Sentiment; CLASS_COUNT],
}

impl SentimentClassifier {
    /// Loads and validates a classifier from a weights artifact on disk.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] if the file cannot be read, parsed, or
    /// fails validation.
    pub fn from_file(path: &Path) -> Result<Self, SentimentError> {
        Self::from_weights(ModelWeights::from_file(path)?)
    }

    /// Builds a classifier from already-deserialized weights.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Weights`] if the dimensions are inconsistent
    /// or the class labels are not the three distinct sentiment classes.
    pub fn from_weights(weights: ModelWeights) -> Result<Self, SentimentError> {
        weights.validate()?;

        let mut labels = [Sentiment::Neutral; CLASS_COUNT];
        for (slot, raw) in labels.iter_mut().zip(&weights.labels) {
            *slot = Sentiment::from_class_label(raw).ok_or_else(|| {
                SentimentError::Weights(format!("unknown class label \"{raw}\""))
            })?;
        }
        if labels[0] == labels[1] || labels[0] == labels[2] || labels[1] == labels[2] {
            return Err(SentimentError::Weights(format!(
                "class labels must be distinct, found {:?}",
                weights.labels
            )));
        }

        let tokenizer = WordTokenizer::new(
            weights.vocab,
            weights.max_tokens,
            weights.pad_id,
            weights.unk_id,
        );
        let net = SentimentNet::new(
            weights.embedding,
            weights.output_weights,
            weights.output_bias,
            weights.embed_dim,
            tokenizer.pad_id(),
        );

        Ok(Self {
            tokenizer,
            net,
            labels,
        })
    }

    /// Classifies one headline. Never fails.
    ///
    /// The emitted label is the model's argmax class, overridden to neutral
    /// when the argmax probability is below [`CONFIDENCE_FLOOR`]; the
    /// reported confidence stays the argmax probability in both cases. Any
    /// internal fault is converted to the `error` sentinel with confidence
    /// exactly `0.0`.
    #[must_use]
    pub fn classify(&self, headline: &str) -> Classification {
        match self.infer(headline) {
            Ok((class, confidence)) => {
                let sentiment = if confidence < CONFIDENCE_FLOOR {
                    Sentiment::Neutral
                } else {
                    self.labels[class]
                };
                Classification {
                    sentiment,
                    confidence,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "classification fault — emitting error sentinel");
                Classification {
                    sentiment: Sentiment::Error,
                    confidence: 0.0,
                }
            }
        }
    }

    /// Tokenize, run the forward pass, and return the argmax class index with
    /// its probability.
    fn infer(&self, headline: &str) -> Result<(usize, f64), SentimentError> {
        let token_ids = self.tokenizer.encode(headline)?;
        let logits = self.net.forward(&token_ids)?;
        let probs = softmax(&logits);
        Ok(argmax(&probs))
    }
}
