//! Whisper model file resolution.
//!
//! Model identifiers in configuration are short names ("medium",
//! "large-v2") resolved to ggml files in the user cache directory, or
//! direct paths to `.bin` files for models stored elsewhere.

use std::path::{Path, PathBuf};

/// Directory where ggml models are stored.
///
/// `~/.cache/meetscribe/models/` on Linux/Unix.
pub fn models_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("meetscribe")
        .join("models")
}

/// Resolve a model identifier to a model file path.
///
/// Identifiers containing a path separator or ending in `.bin` are treated
/// as literal paths; everything else maps to `ggml-<name>.bin` in the
/// models directory. The file may or may not exist on disk.
pub fn resolve_model_path(name: &str) -> PathBuf {
    let as_path = Path::new(name);
    if name.ends_with(".bin") || name.contains(std::path::MAIN_SEPARATOR) {
        return as_path.to_path_buf();
    }
    models_dir().join(format!("ggml-{name}.bin"))
}
