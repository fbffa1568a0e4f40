//! Vocabulary tokenizer for headline text.

use std::collections::HashMap;

use crate::error::SentimentError;

/// Whole-word tokenizer over a fixed vocabulary.
///
/// Normalization lowercases and strips every non-alphanumeric character, so
/// `"NVDA soars!"` and `"nvda soars"` encode identically. Out-of-vocabulary
/// words map to the `[UNK]` id. Encodings are fixed-length: truncated to
/// `max_tokens`, padded with the `[PAD]` id.
#[derive(Debug, Clone)]
pub(crate) struct WordTokenizer {
    vocab: HashMap<String, usize>,
    max_tokens: usize,
    pad_id: usize,
    unk_id: usize,
}

impl WordTokenizer {
    pub(crate) fn new(
        vocab: HashMap<String, usize>,
        max_tokens: usize,
        pad_id: usize,
        unk_id: usize,
    ) -> Self {
        Self {
            vocab,
            max_tokens,
            pad_id,
            unk_id,
        }
    }

    pub(crate) fn pad_id(&self) -> usize {
        self.pad_id
    }

    /// Encodes a headline to exactly `max_tokens` vocabulary ids.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::EmptyInput`] when normalization leaves no
    /// tokens (empty, whitespace-only, or all-punctuation input).
    pub(crate) fn encode(&self, text: &str) -> Result<Vec<usize>, SentimentError> {
        let mut ids: Vec<usize> = normalize(text)
            .split_whitespace()
            .take(self.max_tokens)
            .map(|word| self.vocab.get(word).copied().unwrap_or(self.unk_id))
            .collect();

        if ids.is_empty() {
            return Err(SentimentError::EmptyInput);
        }

        ids.resize(self.max_tokens, self.pad_id);
        Ok(ids)
    }
}

/// Lowercases and replaces every non-alphanumeric character with a space.
fn normalize(text: &str) -> String {
    text.chars()
        .map(|ch| {
            if ch.is_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect()
}
