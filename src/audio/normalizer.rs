//! Audio normalization via an external ffmpeg subprocess.
//!
//! Converts arbitrary input media into the canonical transcription format:
//! mono, 16kHz, loudness-normalized WAV. The `CommandRunner` trait enables
//! full testability without ffmpeg installed.

use crate::defaults::{FFMPEG_BIN, FFMPEG_EXCERPT_CHARS, LOUDNORM_FILTER, SAMPLE_RATE};
use crate::error::{MeetscribeError, Result, excerpt};
use crate::scan::display_name;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// Trait for executing external commands.
///
/// Object-safe, Send + Sync for use in concurrent contexts.
/// Enables testability by allowing mock implementations.
pub trait CommandRunner: Send + Sync {
    /// Execute a command with arguments and wait for it to finish.
    fn run(&self, program: &str, args: &[&str]) -> std::io::Result<Output>;
}

/// Production runner using std::process::Command.
///
/// Blocks the calling thread for the full lifetime of the subprocess.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> std::io::Result<Output> {
        Command::new(program).args(args).output()
    }
}

/// Converts input media into canonical audio for transcription.
///
/// Normalization parameters are fixed, not configurable: the downstream
/// speech model's accuracy depends on channel count and sample rate, so
/// there is nothing for the user to tune here.
pub struct AudioNormalizer<R: CommandRunner> {
    runner: R,
}

impl AudioNormalizer<SystemCommandRunner> {
    /// Create a normalizer backed by the real ffmpeg binary.
    pub fn system() -> Self {
        Self::new(SystemCommandRunner::new())
    }
}

impl<R: CommandRunner> AudioNormalizer<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Check that ffmpeg can be executed at all.
    ///
    /// Runs before any per-file work so a missing tool fails the whole run
    /// up front, instead of after a transcription attempt that could never
    /// have started.
    pub fn probe(&self) -> Result<()> {
        match self.runner.run(FFMPEG_BIN, &["-version"]) {
            Ok(output) if output.status.success() => Ok(()),
            Ok(output) => Err(MeetscribeError::ToolUnavailable {
                tool: FFMPEG_BIN.to_string(),
                message: format!("`ffmpeg -version` exited with {}", output.status),
            }),
            Err(e) => Err(MeetscribeError::ToolUnavailable {
                tool: FFMPEG_BIN.to_string(),
                message: format!("{e}. Install FFmpeg and restart your terminal."),
            }),
        }
    }

    /// Convert `input` into a clean mono 16kHz loudness-normalized WAV at
    /// `output`, overwriting any previous artifact at that path.
    ///
    /// After ffmpeg returns, the output file is verified to exist with
    /// non-zero size: a silently-empty conversion would otherwise propagate
    /// undetected into transcription.
    pub fn to_clean_wav(&self, input: &Path, output: &Path) -> Result<()> {
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = display_name(input);
        let input_arg = input.to_string_lossy();
        let output_arg = output.to_string_lossy();
        let rate_arg = SAMPLE_RATE.to_string();
        // -y: overwrite without prompting, keeping re-runs idempotent.
        let args = [
            "-y",
            "-i",
            input_arg.as_ref(),
            "-ac",
            "1",
            "-ar",
            rate_arg.as_str(),
            "-af",
            LOUDNORM_FILTER,
            output_arg.as_ref(),
        ];

        let run = self.runner.run(FFMPEG_BIN, &args).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MeetscribeError::ToolUnavailable {
                    tool: FFMPEG_BIN.to_string(),
                    message: format!("{e}. Install FFmpeg and restart your terminal."),
                }
            } else {
                MeetscribeError::ConversionFailed {
                    file: file.clone(),
                    message: format!("failed to execute ffmpeg: {e}"),
                }
            }
        })?;

        if !run.status.success() {
            let stderr = String::from_utf8_lossy(&run.stderr);
            return Err(MeetscribeError::ConversionFailed {
                file,
                message: format!(
                    "ffmpeg exited with {}: {}",
                    run.status,
                    excerpt(&stderr, FFMPEG_EXCERPT_CHARS)
                ),
            });
        }

        let size = fs::metadata(output).map(|m| m.len()).unwrap_or(0);
        if size == 0 {
            return Err(MeetscribeError::ConversionFailed {
                file,
                message: "ffmpeg reported success but produced an empty output".to_string(),
            });
        }

        Ok(())
    }
}
