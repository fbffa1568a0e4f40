//! Three-class headline sentiment classification.
//!
//! Wraps a pretrained text classifier: a vocabulary tokenizer, an embedding
//! table with a linear head, and a softmax over the three market-sentiment
//! classes. Weights are exported offline and loaded once at process start;
//! training is out of scope here.
//!
//! [`SentimentClassifier::classify`] never fails: low-confidence calls are
//! overridden to neutral, and internal faults become an `error` sentinel.

mod classifier;
mod error;
mod network;
mod tokenizer;
mod types;
mod weights;

pub use classifier::{SentimentClassifier, CONFIDENCE_FLOOR};
pub use error::SentimentError;
pub use types::{Classification, Sentiment};
pub use weights::ModelWeights;
