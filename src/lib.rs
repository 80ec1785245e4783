//! meetscribe - local meeting transcription and summarization.
//!
//! Converts recorded meetings into a clean audio track, a transcript, and a
//! summary using ffmpeg, Whisper, and a local Ollama instance. No cloud
//! dependency; files stay on disk.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod scan;
pub mod stt;

// Core traits (stage seams)
pub use audio::normalizer::{AudioNormalizer, CommandRunner, SystemCommandRunner};
pub use llm::ollama::Summarizer;
pub use stt::transcriber::Transcriber;

// Pipeline
pub use pipeline::{ArtifactPaths, Pipeline, PipelineConfig, PipelineResult, Stage};

// Error handling
pub use error::{MeetscribeError, Result};

// Config
pub use config::Config;

// File scanning
pub use scan::{MediaFile, list_media_files};
