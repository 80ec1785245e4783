//! Speech-to-text: the Transcriber trait, Whisper implementation, and model
//! file resolution.

pub mod models;
pub mod transcriber;
pub mod whisper;

pub use transcriber::{MockTranscriber, Transcriber};
pub use whisper::{WhisperConfig, WhisperTranscriber};
