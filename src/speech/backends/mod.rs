//! Speech backends

// Native TTS backend using the tts crate (cross-platform)
pub mod native;

// espeak-ng subprocess backend (Linux fallback, WSLg)
pub mod espeak;

// Backend that discards everything, used when no engine initializes
pub mod silent;

// In-memory backend that records calls
pub mod recording;

pub use recording::RecordingSynth;
pub use silent::SilentSynth;
