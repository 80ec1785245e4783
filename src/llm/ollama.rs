//! Ollama text-generation client.
//!
//! One synchronous, non-streaming request per summary against the local
//! Ollama `/api/generate` endpoint. "Service down" and "service
//! misbehaving" are distinct failure kinds so an operator can tell a dead
//! daemon from a broken model.

use crate::defaults::{GENERATE_TIMEOUT_SECS, OLLAMA_EXCERPT_CHARS, SUMMARY_TEMPERATURE};
use crate::error::{MeetscribeError, Result, excerpt};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Trait for summary generation.
///
/// Seam between the pipeline and the text-generation service; allows mock
/// implementations in tests.
pub trait Summarizer: Send + Sync {
    /// Generate a summary from a fully-rendered prompt.
    ///
    /// The returned text is trimmed and non-empty.
    fn summarize(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Blocking client for a local Ollama instance.
pub struct OllamaClient {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Create a client with the default generation timeout.
    pub fn new(base_url: &str, model: &str) -> Result<Self> {
        Self::with_timeout(base_url, model, Duration::from_secs(GENERATE_TIMEOUT_SECS))
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(base_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MeetscribeError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    /// Full URL of the generation endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

impl Summarizer for OllamaClient {
    fn summarize(&self, prompt: &str) -> Result<String> {
        let endpoint = self.endpoint();
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: SUMMARY_TEMPERATURE,
            },
        };

        let response = self
            .client
            .post(&endpoint)
            .json(&body)
            .send()
            .map_err(|e| MeetscribeError::SummarizationUnreachable {
                file: String::new(),
                endpoint: endpoint.clone(),
                message: format!("{e}. Is Ollama running?"),
            })?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| MeetscribeError::SummarizationFailed {
                file: String::new(),
                message: format!("failed to read response body: {e}"),
            })?;

        if status != reqwest::StatusCode::OK {
            return Err(MeetscribeError::SummarizationFailed {
                file: String::new(),
                message: format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    excerpt(&text, OLLAMA_EXCERPT_CHARS)
                ),
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| MeetscribeError::SummarizationFailed {
                file: String::new(),
                message: format!(
                    "invalid JSON response: {e}: {}",
                    excerpt(&text, OLLAMA_EXCERPT_CHARS)
                ),
            })?;

        let out = parsed.response.trim().to_string();
        if out.is_empty() {
            // The service accepted the request but produced nothing usable.
            return Err(MeetscribeError::SummarizationFailed {
                file: String::new(),
                message: "service returned an empty response".to_string(),
            });
        }

        Ok(out)
    }
}

/// Mock summarizer for testing.
///
/// Records every prompt it receives so tests can assert on template
/// rendering.
pub struct MockSummarizer {
    response: String,
    failure: Option<MockFailure>,
    prompts: std::sync::Mutex<Vec<String>>,
}

enum MockFailure {
    Failed(String),
    Unreachable(String),
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self {
            response: "mock summary".to_string(),
            failure: None,
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Configure the mock to return a specific summary.
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock to fail like a service returning an error status.
    pub fn with_http_failure(mut self, message: &str) -> Self {
        self.failure = Some(MockFailure::Failed(message.to_string()));
        self
    }

    /// Configure the mock to fail like a service that is not running.
    pub fn with_unreachable(mut self, endpoint: &str) -> Self {
        self.failure = Some(MockFailure::Unreachable(endpoint.to_string()));
        self
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl Default for MockSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Summarizer for MockSummarizer {
    fn summarize(&self, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        match &self.failure {
            None => Ok(self.response.clone()),
            Some(MockFailure::Failed(message)) => Err(MeetscribeError::SummarizationFailed {
                file: String::new(),
                message: message.clone(),
            }),
            Some(MockFailure::Unreachable(endpoint)) => {
                Err(MeetscribeError::SummarizationUnreachable {
                    file: String::new(),
                    endpoint: endpoint.clone(),
                    message: "connection refused. Is Ollama running?".to_string(),
                })
            }
        }
    }
}
