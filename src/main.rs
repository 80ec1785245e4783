use anyhow::Context;
use clap::Parser;
use meetscribe::audio::normalizer::AudioNormalizer;
use meetscribe::cli::Cli;
use meetscribe::config::Config;
use meetscribe::pipeline::{Pipeline, PipelineConfig};
use meetscribe::scan::{MediaFile, list_media_files};
use std::process::ExitCode;
use tracing::{error, info, warn};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    meetscribe::logging::init(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?
        .with_env_overrides();
    let config = cli.apply(config);

    let files = select_files(&cli, &config)?;

    if cli.list {
        for file in &files {
            println!("{} ({:.1} MB)", file.path.display(), file.size_mb());
        }
        return Ok(ExitCode::SUCCESS);
    }

    if files.is_empty() {
        warn!(
            input_dir = %config.paths.input_dir.display(),
            "no media files found; confirm the input folder path"
        );
        return Ok(ExitCode::SUCCESS);
    }

    // Probe for ffmpeg before the expensive model load: a missing tool
    // fails the whole run before any output is created.
    AudioNormalizer::system().probe()?;

    let pipeline_config = PipelineConfig {
        whisper_model: config.stt.model.clone(),
        language: config.stt.language.clone(),
        ollama_url: config.ollama.url.clone(),
        ollama_model: config.ollama.model.clone(),
        prompt_template: config.prompt_template()?,
    };
    info!(model = %pipeline_config.whisper_model, "loading speech model");
    let pipeline = Pipeline::from_config(&pipeline_config)?;

    // Strictly one file at a time: a single model instance must not run
    // concurrent inferences, and a single Ollama instance should not be
    // hit with parallel requests.
    let mut succeeded = 0usize;
    let mut failed = 0usize;
    let mut skipped = 0usize;
    for file in &files {
        if file.exceeds_limit(config.limits.max_file_mb) {
            warn!(
                file = %file.file_name(),
                size_mb = format!("{:.1}", file.size_mb()),
                max_file_mb = config.limits.max_file_mb,
                "skipping: exceeds the configured size limit"
            );
            skipped += 1;
            continue;
        }
        match pipeline.run(&file.path, &config.paths.output_dir) {
            Ok(result) => {
                succeeded += 1;
                println!(
                    "{}: transcript {}, summary {}",
                    file.file_name(),
                    result.transcript_path.display(),
                    result.summary_path.display()
                );
            }
            // A failed file never aborts the rest of the batch.
            Err(e) => {
                failed += 1;
                error!(file = %file.file_name(), "{e}");
            }
        }
    }

    info!(succeeded, failed, skipped, "run complete");
    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Resolve the file list: explicitly named files, or a scan of the input
/// directory when none are given.
fn select_files(cli: &Cli, config: &Config) -> anyhow::Result<Vec<MediaFile>> {
    if cli.files.is_empty() {
        return Ok(list_media_files(&config.paths.input_dir));
    }
    cli.files
        .iter()
        .map(|path| {
            MediaFile::from_path(path).with_context(|| format!("reading {}", path.display()))
        })
        .collect()
}
