//! Error types for meetscribe.
//!
//! Pipeline failures are file-scoped: one failing input must never abort the
//! processing of other files, so every stage failure is a distinct variant
//! carrying the offending file's name and a bounded excerpt of the
//! underlying cause.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeetscribeError {
    // Configuration errors
    #[error("Failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Prompt template is missing the {placeholder} placeholder")]
    PromptMissingPlaceholder { placeholder: String },

    // Audio normalization errors
    #[error("{tool} is unavailable: {message}")]
    ToolUnavailable { tool: String, message: String },

    #[error("Audio conversion failed for {file}: {message}")]
    ConversionFailed { file: String, message: String },

    // Transcription errors
    #[error("Transcription model not found at {path}")]
    ModelNotFound { path: String },

    #[error("Transcription failed for {file}: {message}")]
    TranscriptionFailed { file: String, message: String },

    // Summarization errors
    #[error("Cannot reach summarization service at {endpoint} for {file}: {message}")]
    SummarizationUnreachable {
        file: String,
        endpoint: String,
        message: String,
    },

    #[error("Summarization failed for {file}: {message}")]
    SummarizationFailed { file: String, message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

impl MeetscribeError {
    /// Rebind the offending input file name on file-scoped variants.
    ///
    /// Stage components only know the artifact they were handed (the clean
    /// WAV, the rendered prompt); the orchestrator knows which input media
    /// file the run belongs to and attaches its name here before the error
    /// crosses the pipeline boundary. Run-scoped variants pass through
    /// unchanged.
    pub fn for_file(self, name: &str) -> Self {
        match self {
            Self::ConversionFailed { message, .. } => Self::ConversionFailed {
                file: name.to_string(),
                message,
            },
            Self::TranscriptionFailed { message, .. } => Self::TranscriptionFailed {
                file: name.to_string(),
                message,
            },
            Self::SummarizationUnreachable {
                endpoint, message, ..
            } => Self::SummarizationUnreachable {
                file: name.to_string(),
                endpoint,
                message,
            },
            Self::SummarizationFailed { message, .. } => Self::SummarizationFailed {
                file: name.to_string(),
                message,
            },
            other => other,
        }
    }
}

/// Truncate diagnostic output to at most `max_chars` characters.
///
/// External tools and services can produce arbitrarily large output; error
/// payloads carried through the pipeline stay bounded. Cuts on a char
/// boundary so multi-byte text never panics.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, MeetscribeError>;
