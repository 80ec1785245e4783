//! Audio handling: ffmpeg-based normalization and canonical WAV reading.

pub mod normalizer;
pub mod wav;

pub use normalizer::{AudioNormalizer, CommandRunner, SystemCommandRunner};
