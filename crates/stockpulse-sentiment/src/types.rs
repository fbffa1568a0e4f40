use serde::{Deserialize, Serialize};

/// Sentiment label attached to a classified headline.
///
/// `Error` marks headlines the classifier could not process; its confidence
/// is always exactly `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Error,
}

impl Sentiment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Error => "error",
        }
    }

    /// Maps a model class label to its sentiment. `Error` is a pipeline
    /// sentinel, never a model class.
    pub(crate) fn from_class_label(label: &str) -> Option<Self> {
        match label {
            "positive" => Some(Sentiment::Positive),
            "negative" => Some(Sentiment::Negative),
            "neutral" => Some(Sentiment::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one headline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub sentiment: Sentiment,
    /// The model's argmax probability in [0, 1]. Stays the argmax probability
    /// even when the label was overridden to neutral; exactly `0.0` when
    /// `sentiment` is [`Sentiment::Error`].
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Positive).unwrap(),
            "\"positive\""
        );
        assert_eq!(serde_json::to_string(&Sentiment::Error).unwrap(), "\"error\"");
    }

    #[test]
    fn class_label_mapping_rejects_error() {
        assert_eq!(
            Sentiment::from_class_label("neutral"),
            Some(Sentiment::Neutral)
        );
        assert_eq!(Sentiment::from_class_label("error"), None);
        assert_eq!(Sentiment::from_class_label("bullish"), None);
    }
}
