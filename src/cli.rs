//! Command-line interface definitions.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "meetscribe",
    version,
    about = "Local meeting transcription and summarization (ffmpeg + Whisper + Ollama)"
)]
pub struct Cli {
    /// Specific media files to process (defaults to every file found in the input directory)
    pub files: Vec<PathBuf>,

    /// Directory scanned for input media
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory receiving the .clean.wav / .transcript.txt / .summary.md artifacts
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Whisper model name ("small", "medium", "large-v2") or path to a ggml .bin file
    #[arg(short, long)]
    pub model: Option<String>,

    /// Transcription language code (e.g. "en")
    #[arg(short, long)]
    pub language: Option<String>,

    /// Base URL of the local Ollama service
    #[arg(long, value_name = "URL")]
    pub ollama_url: Option<String>,

    /// Ollama model used for summarization
    #[arg(long)]
    pub ollama_model: Option<String>,

    /// Prompt template file containing the {{TRANSCRIPT}} placeholder
    #[arg(long, value_name = "FILE")]
    pub prompt: Option<PathBuf>,

    /// Alternate config file location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// List discovered media files and exit
    #[arg(long)]
    pub list: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply CLI flags on top of a loaded configuration.
    ///
    /// Flags win over both the config file and environment overrides.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(dir) = &self.input_dir {
            config.paths.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.paths.output_dir = dir.clone();
        }
        if let Some(model) = &self.model {
            config.stt.model = model.clone();
        }
        if let Some(language) = &self.language {
            config.stt.language = language.clone();
        }
        if let Some(url) = &self.ollama_url {
            config.ollama.url = url.clone();
        }
        if let Some(model) = &self.ollama_model {
            config.ollama.model = model.clone();
        }
        if let Some(prompt) = &self.prompt {
            config.paths.prompt_file = Some(prompt.clone());
        }
        config
    }
}
