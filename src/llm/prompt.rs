//! Prompt template rendering.
//!
//! A template is plain text containing exactly one substitution token,
//! replaced verbatim with the full transcript before the prompt is sent to
//! the summarization service.

use crate::defaults::TRANSCRIPT_PLACEHOLDER;
use crate::error::{MeetscribeError, Result};

/// Replace the transcript placeholder with the transcript text.
pub fn render(template: &str, transcript: &str) -> String {
    template.replace(TRANSCRIPT_PLACEHOLDER, transcript)
}

/// Check that a template contains the transcript placeholder.
///
/// Validated once at startup so a broken template fails the run before any
/// transcription time is spent.
pub fn validate(template: &str) -> Result<()> {
    if template.contains(TRANSCRIPT_PLACEHOLDER) {
        Ok(())
    } else {
        Err(MeetscribeError::PromptMissingPlaceholder {
            placeholder: TRANSCRIPT_PLACEHOLDER.to_string(),
        })
    }
}
