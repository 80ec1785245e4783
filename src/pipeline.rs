//! The per-file processing pipeline: normalize → transcribe → summarize.
//!
//! Strictly linear and blocking for one input file: each stage runs to
//! completion before the next starts, the first failure aborts the file
//! with a classified error, and all artifacts land at deterministic paths
//! derived from the input's base name. Failures are file-scoped; the
//! caller decides whether to continue with other files.

use crate::audio::normalizer::{AudioNormalizer, CommandRunner, SystemCommandRunner};
use crate::defaults::{CLEAN_WAV_SUFFIX, SUMMARY_SUFFIX, TRANSCRIPT_SUFFIX};
use crate::error::{MeetscribeError, Result};
use crate::llm::ollama::{OllamaClient, Summarizer};
use crate::llm::prompt;
use crate::scan::display_name;
use crate::stt::transcriber::Transcriber;
use crate::stt::whisper::{WhisperConfig, WhisperTranscriber};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Tunable parameters for one pipeline run.
///
/// Immutable for the duration of a run and passed explicitly; defaults live
/// in [`crate::defaults`] and are never mutated globally.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub whisper_model: String,
    pub language: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub prompt_template: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            whisper_model: crate::defaults::DEFAULT_MODEL.to_string(),
            language: crate::defaults::DEFAULT_LANGUAGE.to_string(),
            ollama_url: crate::defaults::DEFAULT_OLLAMA_URL.to_string(),
            ollama_model: crate::defaults::DEFAULT_OLLAMA_MODEL.to_string(),
            prompt_template: crate::defaults::DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }
}

/// Deterministic artifact paths for one input file.
///
/// All three artifacts share the input's stem and differ only by a fixed
/// suffix, so re-running the same input overwrites in place instead of
/// creating numbered duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub clean_wav: PathBuf,
    pub transcript: PathBuf,
    pub summary: PathBuf,
}

impl ArtifactPaths {
    /// Derive the three artifact paths from the input's base name.
    pub fn for_input(input: &Path, output_dir: &Path) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        Self {
            clean_wav: output_dir.join(format!("{stem}{CLEAN_WAV_SUFFIX}")),
            transcript: output_dir.join(format!("{stem}{TRANSCRIPT_SUFFIX}")),
            summary: output_dir.join(format!("{stem}{SUMMARY_SUFFIX}")),
        }
    }
}

/// Bundle of artifact paths returned on success.
///
/// Invariant: all three paths exist on disk with non-empty content when a
/// `PipelineResult` is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    pub clean_wav: PathBuf,
    pub transcript_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Per-file stage progression.
///
/// A file moves Normalizing → Transcribing → Summarizing; any stage can
/// fail terminally, no stage is skipped, and no stage is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Normalizing,
    Transcribing,
    Summarizing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Normalizing => "normalizing",
            Stage::Transcribing => "transcribing",
            Stage::Summarizing => "summarizing",
        };
        f.write_str(name)
    }
}

/// Sequences the three stages for one input file.
///
/// Holds the loaded speech model and the service client, so constructing a
/// pipeline once and reusing it across files amortizes the expensive model
/// load.
pub struct Pipeline<R: CommandRunner = SystemCommandRunner> {
    normalizer: AudioNormalizer<R>,
    transcriber: Arc<dyn Transcriber>,
    summarizer: Box<dyn Summarizer>,
    prompt_template: String,
}

impl Pipeline<SystemCommandRunner> {
    /// Build a production pipeline from a config.
    ///
    /// Validates the prompt template and loads the Whisper model up front,
    /// so configuration problems surface before any file is touched.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        prompt::validate(&config.prompt_template)?;
        let transcriber = WhisperTranscriber::new(WhisperConfig {
            model: config.whisper_model.clone(),
            language: config.language.clone(),
            threads: None,
        })?;
        let summarizer = OllamaClient::new(&config.ollama_url, &config.ollama_model)?;
        Ok(Self::new(
            AudioNormalizer::system(),
            Arc::new(transcriber),
            Box::new(summarizer),
            config.prompt_template.clone(),
        ))
    }
}

impl<R: CommandRunner> Pipeline<R> {
    /// Assemble a pipeline from explicit stage components.
    pub fn new(
        normalizer: AudioNormalizer<R>,
        transcriber: Arc<dyn Transcriber>,
        summarizer: Box<dyn Summarizer>,
        prompt_template: String,
    ) -> Self {
        Self {
            normalizer,
            transcriber,
            summarizer,
            prompt_template,
        }
    }

    /// Probe for the external audio tool without processing anything.
    pub fn check_tools(&self) -> Result<()> {
        self.normalizer.probe()
    }

    /// Run the three stages for one input media file.
    ///
    /// Returns the artifact paths on success, or the first stage's
    /// classified failure unchanged. No retry, no partial-result salvage —
    /// except that the transcript is durably written before summarization
    /// starts, so a summarizer outage never loses it.
    pub fn run(&self, input: &Path, output_dir: &Path) -> Result<PipelineResult> {
        let file = display_name(input);

        // Fail fast before creating any output entry.
        self.normalizer.probe()?;

        fs::create_dir_all(output_dir)?;
        let paths = ArtifactPaths::for_input(input, output_dir);

        info!(stage = %Stage::Normalizing, %file, "converting to clean mono 16kHz WAV");
        self.normalizer.to_clean_wav(input, &paths.clean_wav)?;

        info!(
            stage = %Stage::Transcribing,
            %file,
            model = self.transcriber.model_name(),
            "running speech recognition"
        );
        let transcript = self
            .transcriber
            .transcribe_file(&paths.clean_wav)
            .map_err(|e| e.for_file(&file))?;
        if transcript.trim().is_empty() {
            return Err(MeetscribeError::TranscriptionFailed {
                file,
                message: "transcriber returned an empty transcript".to_string(),
            });
        }
        // Transcription is the most expensive stage; persist its output
        // before the network call so a summarizer failure cannot lose it.
        fs::write(&paths.transcript, &transcript)?;

        let rendered = prompt::render(&self.prompt_template, &transcript);

        info!(stage = %Stage::Summarizing, %file, "requesting summary");
        let summary = self
            .summarizer
            .summarize(&rendered)
            .map_err(|e| e.for_file(&file))?;
        fs::write(&paths.summary, &summary)?;

        info!(%file, summary = %paths.summary.display(), "pipeline complete");
        Ok(PipelineResult {
            clean_wav: paths.clean_wav,
            transcript_path: paths.transcript,
            summary_path: paths.summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths_share_the_input_stem() {
        let paths = ArtifactPaths::for_input(Path::new("/in/meeting1.mp4"), Path::new("/out"));
        assert_eq!(paths.clean_wav, PathBuf::from("/out/meeting1.clean.wav"));
        assert_eq!(
            paths.transcript,
            PathBuf::from("/out/meeting1.transcript.txt")
        );
        assert_eq!(paths.summary, PathBuf::from("/out/meeting1.summary.md"));
    }

    #[test]
    fn test_artifact_paths_keep_dots_in_stem() {
        let paths = ArtifactPaths::for_input(Path::new("2026.03.01 standup.mkv"), Path::new("o"));
        assert_eq!(
            paths.transcript,
            PathBuf::from("o/2026.03.01 standup.transcript.txt")
        );
    }

    #[test]
    fn test_artifact_paths_are_deterministic() {
        let a = ArtifactPaths::for_input(Path::new("x.mp4"), Path::new("/out"));
        let b = ArtifactPaths::for_input(Path::new("x.mp4"), Path::new("/out"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Normalizing.to_string(), "normalizing");
        assert_eq!(Stage::Transcribing.to_string(), "transcribing");
        assert_eq!(Stage::Summarizing.to_string(), "summarizing");
    }

    #[test]
    fn test_pipeline_config_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.whisper_model, "medium");
        assert_eq!(config.language, "en");
        assert_eq!(config.ollama_url, "http://127.0.0.1:11434");
        assert_eq!(config.ollama_model, "llama3");
        assert!(config.prompt_template.contains("{{TRANSCRIPT}}"));
    }
}
