//! End-to-end pipeline behavior with faked stages.
//!
//! Uses a fake ffmpeg runner plus the mock transcriber/summarizer, so these
//! tests run without ffmpeg, a Whisper model, or an Ollama instance.

#![cfg(unix)]

use meetscribe::audio::normalizer::{AudioNormalizer, CommandRunner};
use meetscribe::error::MeetscribeError;
use meetscribe::llm::ollama::MockSummarizer;
use meetscribe::pipeline::Pipeline;
use meetscribe::stt::transcriber::MockTranscriber;
use std::fs;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::Arc;
use tempfile::tempdir;

const TEMPLATE: &str = "Summarize this meeting:\n{{TRANSCRIPT}}\n";

/// Fake ffmpeg: succeeds on `-version`, writes `output_bytes` to the
/// conversion target (or reports NotFound when simulating a missing tool).
struct FakeFfmpeg {
    available: bool,
    output_bytes: usize,
}

impl FakeFfmpeg {
    fn working() -> Self {
        Self {
            available: true,
            output_bytes: 1024,
        }
    }

    fn producing_empty_output() -> Self {
        Self {
            available: true,
            output_bytes: 0,
        }
    }

    fn missing() -> Self {
        Self {
            available: false,
            output_bytes: 0,
        }
    }
}

impl CommandRunner for FakeFfmpeg {
    fn run(&self, _program: &str, args: &[&str]) -> std::io::Result<Output> {
        if !self.available {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No such file or directory",
            ));
        }
        if args != ["-version"] {
            let output_path = args.last().ok_or(std::io::ErrorKind::InvalidInput)?;
            fs::write(output_path, vec![0u8; self.output_bytes])?;
        }
        Ok(Output {
            status: ExitStatus::from_raw(0),
            stdout: Vec::new(),
            stderr: Vec::new(),
        })
    }
}

fn write_input(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"fake media bytes").unwrap();
    path
}

fn pipeline_with(
    ffmpeg: FakeFfmpeg,
    transcriber: Arc<MockTranscriber>,
    summarizer: MockSummarizer,
) -> Pipeline<FakeFfmpeg> {
    Pipeline::new(
        AudioNormalizer::new(ffmpeg),
        transcriber,
        Box::new(summarizer),
        TEMPLATE.to_string(),
    )
}

#[test]
fn successful_run_produces_exactly_three_artifacts() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), "meeting1.mp4");
    let out = dir.path().join("out");

    let transcriber = Arc::new(MockTranscriber::new("mock").with_response("we planned the q3 work"));
    let pipeline = pipeline_with(
        FakeFfmpeg::working(),
        transcriber,
        MockSummarizer::new().with_response("## Summary\nQ3 planning."),
    );

    let result = pipeline.run(&input, &out).unwrap();

    assert_eq!(result.clean_wav, out.join("meeting1.clean.wav"));
    assert_eq!(result.transcript_path, out.join("meeting1.transcript.txt"));
    assert_eq!(result.summary_path, out.join("meeting1.summary.md"));

    assert_eq!(
        fs::read_to_string(&result.transcript_path).unwrap(),
        "we planned the q3 work"
    );
    assert_eq!(
        fs::read_to_string(&result.summary_path).unwrap(),
        "## Summary\nQ3 planning."
    );
    assert!(fs::metadata(&result.clean_wav).unwrap().len() > 0);
    assert_eq!(fs::read_dir(&out).unwrap().count(), 3);
}

#[test]
fn prompt_receives_the_rendered_template() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), "sync.wav");
    let out = dir.path().join("out");

    let transcriber = Arc::new(MockTranscriber::new("mock").with_response("hello transcript"));
    let summarizer = MockSummarizer::new();
    let prompts_handle = Arc::new(summarizer);

    // MockSummarizer is consumed by the pipeline, so route through an Arc
    // to keep a handle for assertions.
    struct Shared(Arc<MockSummarizer>);
    impl meetscribe::Summarizer for Shared {
        fn summarize(&self, prompt: &str) -> meetscribe::Result<String> {
            self.0.summarize(prompt)
        }
    }

    let pipeline = Pipeline::new(
        AudioNormalizer::new(FakeFfmpeg::working()),
        transcriber,
        Box::new(Shared(prompts_handle.clone())),
        TEMPLATE.to_string(),
    );
    pipeline.run(&input, &out).unwrap();

    let prompts = prompts_handle.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0], "Summarize this meeting:\nhello transcript\n");
}

#[test]
fn missing_tool_fails_before_any_output_is_created() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), "meeting1.mp4");
    let out = dir.path().join("out");

    let pipeline = pipeline_with(
        FakeFfmpeg::missing(),
        Arc::new(MockTranscriber::new("mock")),
        MockSummarizer::new(),
    );

    match pipeline.run(&input, &out) {
        Err(MeetscribeError::ToolUnavailable { tool, .. }) => assert_eq!(tool, "ffmpeg"),
        other => panic!("expected ToolUnavailable, got {other:?}"),
    }
    assert!(!out.exists(), "no output directory entries may be created");
}

#[test]
fn empty_conversion_output_never_reaches_transcription() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), "meeting1.mp4");
    let out = dir.path().join("out");

    let transcriber = Arc::new(MockTranscriber::new("mock"));
    let pipeline = pipeline_with(
        FakeFfmpeg::producing_empty_output(),
        transcriber.clone(),
        MockSummarizer::new(),
    );

    match pipeline.run(&input, &out) {
        Err(MeetscribeError::ConversionFailed { file, .. }) => assert_eq!(file, "meeting1.mp4"),
        other => panic!("expected ConversionFailed, got {other:?}"),
    }
    assert_eq!(transcriber.call_count(), 0);
    assert!(!out.join("meeting1.transcript.txt").exists());
}

#[test]
fn transcription_failure_leaves_no_transcript_behind() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), "meeting1.mp4");
    let out = dir.path().join("out");

    let pipeline = pipeline_with(
        FakeFfmpeg::working(),
        Arc::new(MockTranscriber::new("mock").with_failure()),
        MockSummarizer::new(),
    );

    match pipeline.run(&input, &out) {
        Err(MeetscribeError::TranscriptionFailed { file, .. }) => {
            // Classified against the input media, not the intermediate WAV.
            assert_eq!(file, "meeting1.mp4");
        }
        other => panic!("expected TranscriptionFailed, got {other:?}"),
    }
    assert!(!out.join("meeting1.transcript.txt").exists());
    assert!(!out.join("meeting1.summary.md").exists());
}

#[test]
fn empty_transcript_is_a_transcription_failure() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), "meeting1.mp4");
    let out = dir.path().join("out");

    let pipeline = pipeline_with(
        FakeFfmpeg::working(),
        Arc::new(MockTranscriber::new("mock").with_response("   \n  ")),
        MockSummarizer::new(),
    );

    assert!(matches!(
        pipeline.run(&input, &out),
        Err(MeetscribeError::TranscriptionFailed { .. })
    ));
    assert!(!out.join("meeting1.transcript.txt").exists());
}

#[test]
fn summarization_http_failure_keeps_the_transcript() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), "meeting1.mp4");
    let out = dir.path().join("out");

    let pipeline = pipeline_with(
        FakeFfmpeg::working(),
        Arc::new(MockTranscriber::new("mock").with_response("long expensive transcript")),
        MockSummarizer::new().with_http_failure("HTTP 500: internal error"),
    );

    match pipeline.run(&input, &out) {
        Err(MeetscribeError::SummarizationFailed { file, message }) => {
            assert_eq!(file, "meeting1.mp4");
            assert!(message.contains("internal error"));
        }
        other => panic!("expected SummarizationFailed, got {other:?}"),
    }

    // The transcript survived the summarizer failure; no summary exists.
    assert_eq!(
        fs::read_to_string(out.join("meeting1.transcript.txt")).unwrap(),
        "long expensive transcript"
    );
    assert!(!out.join("meeting1.summary.md").exists());
}

#[test]
fn unreachable_summarizer_keeps_the_transcript() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), "meeting1.mp4");
    let out = dir.path().join("out");

    let pipeline = pipeline_with(
        FakeFfmpeg::working(),
        Arc::new(MockTranscriber::new("mock").with_response("transcript text")),
        MockSummarizer::new().with_unreachable("http://127.0.0.1:11434/api/generate"),
    );

    match pipeline.run(&input, &out) {
        Err(MeetscribeError::SummarizationUnreachable { file, endpoint, .. }) => {
            assert_eq!(file, "meeting1.mp4");
            assert!(endpoint.contains("/api/generate"));
        }
        other => panic!("expected SummarizationUnreachable, got {other:?}"),
    }
    assert!(out.join("meeting1.transcript.txt").exists());
    assert!(!out.join("meeting1.summary.md").exists());
}

#[test]
fn rerunning_overwrites_artifacts_in_place() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), "meeting1.mp4");
    let out = dir.path().join("out");

    let first = pipeline_with(
        FakeFfmpeg::working(),
        Arc::new(MockTranscriber::new("mock").with_response("first pass")),
        MockSummarizer::new().with_response("first summary"),
    );
    first.run(&input, &out).unwrap();

    let second = pipeline_with(
        FakeFfmpeg::working(),
        Arc::new(MockTranscriber::new("mock").with_response("second pass")),
        MockSummarizer::new().with_response("second summary"),
    );
    let result = second.run(&input, &out).unwrap();

    // Same deterministic paths, no numbered duplicates.
    assert_eq!(fs::read_dir(&out).unwrap().count(), 3);
    assert_eq!(
        fs::read_to_string(&result.transcript_path).unwrap(),
        "second pass"
    );
    assert_eq!(
        fs::read_to_string(&result.summary_path).unwrap(),
        "second summary"
    );
}

#[test]
fn runs_on_different_inputs_do_not_collide() {
    let dir = tempdir().unwrap();
    let a = write_input(dir.path(), "standup.mp4");
    let b = write_input(dir.path(), "retro.mkv");
    let out = dir.path().join("out");

    let pipeline = pipeline_with(
        FakeFfmpeg::working(),
        Arc::new(MockTranscriber::new("mock").with_response("text")),
        MockSummarizer::new(),
    );

    pipeline.run(&a, &out).unwrap();
    pipeline.run(&b, &out).unwrap();

    assert!(out.join("standup.summary.md").exists());
    assert!(out.join("retro.summary.md").exists());
    assert_eq!(fs::read_dir(&out).unwrap().count(), 6);
}
