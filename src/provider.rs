use crate::error::{Error, Result};
use crate::{debug_log, info_log};

pub const DEFAULT_WORD_URL: &str = "https://random-word-api.herokuapp.com/word?number=1";

/// Source of the word for a round.
#[allow(async_fn_in_trait)]
pub trait WordProvider {
    async fn fetch_word(&self) -> Result<String>;
}

/// Fetches a random word over HTTP. The endpoint answers with a JSON array
/// whose first element is the word.
pub struct HttpWordProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpWordProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpWordProvider {
    fn default() -> Self {
        Self::new(DEFAULT_WORD_URL)
    }
}

impl WordProvider for HttpWordProvider {
    async fn fetch_word(&self) -> Result<String> {
        info_log!("Fetching word from {}", self.url);
        let response = self.client.get(self.url.as_str()).send().await?;
        let status = response.status();
        debug_log!("Word provider answered {}", status);
        if !status.is_success() {
            return Err(Error::Status(status));
        }
        let body = response.text().await?;
        parse_word_response(&body)
    }
}

/// Always hands out the same word.
#[derive(Debug, Clone)]
pub struct StaticWordProvider {
    word: String,
}

impl StaticWordProvider {
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }
}

impl WordProvider for StaticWordProvider {
    async fn fetch_word(&self) -> Result<String> {
        validate_word(&self.word)
    }
}

pub fn parse_word_response(body: &str) -> Result<String> {
    let words: Vec<String> = serde_json::from_str(body)?;
    let word = words.into_iter().next().ok_or(Error::EmptyResponse)?;
    validate_word(&word)
}

/// Normalises to lowercase and rejects anything that is not a plain word.
pub fn validate_word(word: &str) -> Result<String> {
    let word = word.trim().to_lowercase();
    if word.is_empty() || !word.chars().all(|c| c.is_alphabetic()) {
        return Err(Error::InvalidWord(word));
    }
    Ok(word)
}
