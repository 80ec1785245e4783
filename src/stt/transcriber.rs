//! The Transcriber trait and a mock implementation for tests.

use crate::error::{MeetscribeError, Result};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Trait for speech-to-text transcription of a canonical audio file.
///
/// Allows swapping implementations (real Whisper vs mock). Model loading is
/// expensive; implementations load once at construction so one instance can
/// be shared across many files via `Arc`.
pub trait Transcriber: Send + Sync {
    /// Transcribe a canonical (mono, 16kHz) WAV file to plain text.
    ///
    /// The returned text is trimmed and guaranteed non-empty; an empty
    /// recognition result is an error, because a silent mis-transcription
    /// is worse than an explicit failure.
    fn transcribe_file(&self, wav: &Path) -> Result<String>;

    /// Name of the loaded model.
    fn model_name(&self) -> &str;
}

/// Implement Transcriber for Arc<T> to allow sharing across files.
impl<T: Transcriber + ?Sized> Transcriber for Arc<T> {
    fn transcribe_file(&self, wav: &Path) -> Result<String> {
        (**self).transcribe_file(wav)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Mock transcriber for testing.
///
/// Records how often it was invoked so tests can assert that a failed
/// conversion never reaches the transcription stage.
#[derive(Debug)]
pub struct MockTranscriber {
    model_name: String,
    response: String,
    should_fail: bool,
    calls: AtomicUsize,
}

impl MockTranscriber {
    /// Create a new mock transcriber with default settings.
    pub fn new(model_name: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            response: "mock transcription".to_string(),
            should_fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Configure the mock to return a specific transcript.
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock to fail on transcribe.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Number of times `transcribe_file` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe_file(&self, wav: &Path) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            Err(MeetscribeError::TranscriptionFailed {
                file: crate::scan::display_name(wav),
                message: "mock transcription failure".to_string(),
            })
        } else {
            Ok(self.response.clone())
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
