//! Summarization: prompt rendering and the Ollama generation client.

pub mod ollama;
pub mod prompt;

pub use ollama::{MockSummarizer, OllamaClient, Summarizer};
