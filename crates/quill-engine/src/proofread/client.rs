use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::proofread::wire::CheckResponse;

/// Public LanguageTool endpoint
pub const DEFAULT_API_URL: &str = "https://api.languagetool.org/v2/check";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("network error: {0}")]
    Network(String),
    #[error("service responded with HTTP {0}")]
    Status(u16),
    #[error("could not decode service response: {0}")]
    Decode(String),
}

/// Anything that can proofread a flat text in a given language
pub trait TextAnalyzer {
    fn check(&self, text: &str, language: &str) -> Result<CheckResponse, CheckError>;
}

/// Blocking client for a LanguageTool-compatible `/v2/check` endpoint
#[derive(Debug, Clone)]
pub struct LanguageToolClient {
    client: Client,
    url: String,
}

impl LanguageToolClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CheckError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|err| CheckError::Network(err.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TextAnalyzer for LanguageToolClient {
    fn check(&self, text: &str, language: &str) -> Result<CheckResponse, CheckError> {
        log::debug!(
            "Checking {} chars ({language}) against {}",
            text.chars().count(),
            self.url
        );
        let response = self
            .client
            .post(&self.url)
            .form(&[
                ("text", text),
                ("language", language),
                ("enabledOnly", "false"),
            ])
            .send()
            .map_err(|err| CheckError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::Status(status.as_u16()));
        }

        response
            .json::<CheckResponse>()
            .map_err(|err| CheckError::Decode(err.to_string()))
    }
}
