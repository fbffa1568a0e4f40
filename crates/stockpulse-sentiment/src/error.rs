use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("failed to read model weights: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model weights: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model weights: {0}")]
    Weights(String),

    #[error("headline produced no tokens")]
    EmptyInput,

    #[error("inference dimension error: {0}")]
    Dimension(String),
}
