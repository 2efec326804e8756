use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to word provider failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("word provider answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("word provider sent malformed json: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("word provider sent no word")]
    EmptyResponse,
    #[error("'{0}' is not a playable word")]
    InvalidWord(String),
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
    #[error("input stream closed")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, Error>;
