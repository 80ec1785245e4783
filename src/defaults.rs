//! Default configuration constants for meetscribe.
//!
//! Shared constants used across configuration types and pipeline stages,
//! kept in one place so the normalizer, transcriber, and summarizer agree
//! on formats and limits.

/// Executable name of the external audio tool.
pub const FFMPEG_BIN: &str = "ffmpeg";

/// Canonical audio sample rate in Hz.
///
/// Whisper models are trained on 16kHz audio; feeding other rates degrades
/// accuracy, so every input is resampled to this rate before transcription.
pub const SAMPLE_RATE: u32 = 16000;

/// Audio filter applied during normalization.
///
/// Loudness normalization compensates for quiet or far-mic meeting
/// recordings before they reach the speech model.
pub const LOUDNORM_FILTER: &str = "loudnorm";

/// Suffix of the canonical audio artifact.
pub const CLEAN_WAV_SUFFIX: &str = ".clean.wav";

/// Suffix of the transcript artifact.
pub const TRANSCRIPT_SUFFIX: &str = ".transcript.txt";

/// Suffix of the summary artifact.
pub const SUMMARY_SUFFIX: &str = ".summary.md";

/// Default Whisper model name.
///
/// "medium" is a reasonable accuracy/speed trade-off for meeting audio.
/// Use "large-v2" for more accuracy at the cost of speed.
pub const DEFAULT_MODEL: &str = "medium";

/// Default transcription language code.
///
/// The language is always passed explicitly rather than auto-detected,
/// trading a little robustness for determinism and speed.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default base URL of the local Ollama service.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default Ollama model used for summarization.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";

/// Request timeout for one summarization call, in seconds.
///
/// Long transcripts on modest hardware can take minutes to summarize;
/// the timeout only exists to bound a hung service.
pub const GENERATE_TIMEOUT_SECS: u64 = 600;

/// Sampling temperature for summarization.
///
/// Low temperature favors consistent, focused summaries over creative
/// variation.
pub const SUMMARY_TEMPERATURE: f32 = 0.2;

/// Maximum characters of ffmpeg stderr carried in a conversion error.
pub const FFMPEG_EXCERPT_CHARS: usize = 800;

/// Maximum characters of an Ollama response body carried in an error.
pub const OLLAMA_EXCERPT_CHARS: usize = 500;

/// Placeholder token replaced with the transcript when rendering a prompt.
pub const TRANSCRIPT_PLACEHOLDER: &str = "{{TRANSCRIPT}}";

/// Default per-file size guardrail in megabytes.
pub const DEFAULT_MAX_FILE_MB: u64 = 2048;

/// File extensions considered media inputs during a directory scan.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "wav", "mp3", "m4a", "mp4", "mkv", "mov", "webm", "flac", "aac", "ogg",
];

/// Built-in prompt template used when no template file is configured.
pub const DEFAULT_PROMPT_TEMPLATE: &str = include_str!("../prompts/summary.txt");
