//! Whisper-based speech-to-text transcription.
//!
//! Implements the Transcriber trait using whisper-rs. Decoding is greedy
//! with temperature 0 and an explicitly configured language, so the same
//! audio always produces the same transcript.
//!
//! # Feature Gate
//!
//! This module requires the `whisper` feature (enabled by default) and
//! cmake to build.

#[cfg(feature = "whisper")]
use crate::audio::wav;
use crate::error::{MeetscribeError, Result};
use crate::scan::display_name;
use crate::stt::models::resolve_model_path;
use crate::stt::transcriber::Transcriber;
use std::path::{Path, PathBuf};

#[cfg(feature = "whisper")]
use std::sync::{Mutex, Once};
#[cfg(feature = "whisper")]
use whisper_rs::{
    FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, install_logging_hooks,
};

#[cfg(feature = "whisper")]
static LOGGING_HOOKS_INSTALLED: Once = Once::new();

/// Configuration for the Whisper transcriber.
#[derive(Debug, Clone)]
pub struct WhisperConfig {
    /// Model identifier ("medium", "large-v2") or a path to a ggml .bin file
    pub model: String,
    /// Language code (e.g. "en", "de"); always passed explicitly
    pub language: String,
    /// Number of threads for inference (None = whisper default)
    pub threads: Option<usize>,
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            model: crate::defaults::DEFAULT_MODEL.to_string(),
            language: crate::defaults::DEFAULT_LANGUAGE.to_string(),
            threads: None,
        }
    }
}

/// Whisper-based transcriber implementation.
///
/// Loading the model is the expensive part and happens once in `new`; the
/// instance is then shared across files via `Arc`. The context is wrapped
/// in a Mutex because a single model instance must not run two inferences
/// concurrently.
#[cfg(feature = "whisper")]
pub struct WhisperTranscriber {
    context: Mutex<WhisperContext>,
    config: WhisperConfig,
    model_name: String,
}

#[cfg(feature = "whisper")]
impl std::fmt::Debug for WhisperTranscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperTranscriber")
            .field("config", &self.config)
            .field("model_name", &self.model_name)
            .field("context", &"<WhisperContext>")
            .finish()
    }
}

/// Whisper-based transcriber placeholder (without the whisper feature).
///
/// Stub that errors when used; enable the `whisper` feature for real
/// transcription.
#[cfg(not(feature = "whisper"))]
#[derive(Debug)]
pub struct WhisperTranscriber {
    config: WhisperConfig,
    model_name: String,
}

fn resolve_existing_model(config: &WhisperConfig) -> Result<(PathBuf, String)> {
    let model_path = resolve_model_path(&config.model);
    if !model_path.exists() {
        return Err(MeetscribeError::ModelNotFound {
            path: model_path.to_string_lossy().to_string(),
        });
    }
    let model_name = model_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string();
    Ok((model_path, model_name))
}

#[cfg(feature = "whisper")]
impl WhisperTranscriber {
    /// Create a new Whisper transcriber, loading the model into memory.
    ///
    /// # Errors
    /// Returns `MeetscribeError::ModelNotFound` if the model file doesn't
    /// exist, `MeetscribeError::TranscriptionFailed` if loading fails.
    pub fn new(config: WhisperConfig) -> Result<Self> {
        // Install logging hooks to suppress whisper.cpp output (only once)
        LOGGING_HOOKS_INSTALLED.call_once(|| {
            install_logging_hooks();
        });

        let (model_path, model_name) = resolve_existing_model(&config)?;

        let context_params = WhisperContextParameters::default();
        let context = WhisperContext::new_with_params(
            model_path
                .to_str()
                .ok_or_else(|| MeetscribeError::TranscriptionFailed {
                    file: String::new(),
                    message: "invalid UTF-8 in model path".to_string(),
                })?,
            context_params,
        )
        .map_err(|e| MeetscribeError::TranscriptionFailed {
            file: String::new(),
            message: format!("failed to load Whisper model: {e}"),
        })?;

        Ok(Self {
            context: Mutex::new(context),
            config,
            model_name,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &WhisperConfig {
        &self.config
    }
}

#[cfg(not(feature = "whisper"))]
impl WhisperTranscriber {
    /// Create a new Whisper transcriber (stub implementation).
    pub fn new(config: WhisperConfig) -> Result<Self> {
        let (_, model_name) = resolve_existing_model(&config)?;
        Ok(Self { config, model_name })
    }

    /// Get the configuration
    pub fn config(&self) -> &WhisperConfig {
        &self.config
    }
}

#[cfg(feature = "whisper")]
impl Transcriber for WhisperTranscriber {
    fn transcribe_file(&self, wav_path: &Path) -> Result<String> {
        let file = display_name(wav_path);
        let samples = wav::read_samples(wav_path)?;
        let audio_f32 = wav::to_f32(&samples);

        let context =
            self.context
                .lock()
                .map_err(|e| MeetscribeError::TranscriptionFailed {
                    file: file.clone(),
                    message: format!("failed to acquire context lock: {e}"),
                })?;

        let mut state = context
            .create_state()
            .map_err(|e| MeetscribeError::TranscriptionFailed {
                file: file.clone(),
                message: format!("failed to create Whisper state: {e}"),
            })?;

        // Greedy decoding at temperature 0 for reproducible transcripts.
        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_temperature(0.0);
        params.set_language(Some(&self.config.language));

        if let Some(threads) = self.config.threads {
            params.set_n_threads(threads as i32);
        }

        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        state
            .full(params, &audio_f32)
            .map_err(|e| MeetscribeError::TranscriptionFailed {
                file: file.clone(),
                message: format!("Whisper inference failed: {e}"),
            })?;

        let mut transcription = String::new();
        for segment in state.as_iter() {
            transcription.push_str(&segment.to_string());
        }

        let text = transcription.trim().to_string();
        if text.is_empty() {
            return Err(MeetscribeError::TranscriptionFailed {
                file,
                message: "Whisper returned an empty transcript".to_string(),
            });
        }

        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(not(feature = "whisper"))]
impl Transcriber for WhisperTranscriber {
    fn transcribe_file(&self, wav_path: &Path) -> Result<String> {
        Err(MeetscribeError::TranscriptionFailed {
            file: display_name(wav_path),
            message: concat!(
                "Whisper feature not enabled. This binary was built without speech recognition.\n",
                "To fix: cargo build --release (whisper is enabled by default)\n",
                "If the build fails with cmake errors, install: sudo apt install cmake"
            )
            .to_string(),
        })
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
