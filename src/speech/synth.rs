//! Speech synthesizer abstraction
//!
//! Provides a unified interface for text-to-speech across platforms.
//! The announcer holds one of these and never reaches a global engine.

use crate::platform::is_wsl;
use crate::{SpeechError, SpeechResult};
use log::{error, info};

use super::backends::espeak::EspeakSynth;
use super::backends::native::NativeSynth;
use super::backends::silent::SilentSynth;

/// Speech synthesizer trait
///
/// The announcer only ever calls `speak` and `cancel`; the remaining
/// methods apply settings from the config file at startup.
pub trait Synth: Send {
    /// Speak text. With `interrupt`, any utterance in progress is cut off first.
    fn speak(&mut self, text: &str, interrupt: bool) -> SpeechResult<()>;

    /// Cancel/silence current speech
    fn cancel(&mut self) -> SpeechResult<()>;

    /// Set speech rate (0-100, where 50 is normal)
    fn set_rate(&mut self, rate: u8) -> SpeechResult<()>;

    /// Set speech volume (0-100)
    fn set_volume(&mut self, volume: u8) -> SpeechResult<()>;

    /// Set voice by index (platform-specific)
    fn set_voice_idx(&mut self, idx: usize) -> SpeechResult<()>;

    /// Short backend name for log lines
    fn name(&self) -> &'static str;
}

/// Create a platform-appropriate speech synthesizer
///
/// **WSL:** espeak-ng through the WSLg PulseAudio server, then the native
/// backend.
///
/// **Native Linux:** Speech Dispatcher via the `tts` crate, then espeak-ng.
///
/// **Other platforms:** the native `tts` backend only.
pub fn create_synth() -> SpeechResult<Box<dyn Synth>> {
    let platform = std::env::consts::OS;

    if platform == "linux" {
        let wsl = is_wsl();
        if wsl {
            info!("Detected WSL environment");
        } else {
            info!("Detected native Linux environment");
        }

        let first = if wsl { try_espeak() } else { try_native() };
        let first_err = match first {
            Ok(synth) => return Ok(synth),
            Err(e) => e,
        };

        let second = if wsl { try_native() } else { try_espeak() };
        return second.map_err(|e| {
            SpeechError::NotReady(format!(
                "No speech backend available on Linux. Tried:\n\
                 1. {}\n\
                 2. {}\n\
                 (install speech-dispatcher or espeak-ng)",
                first_err, e
            ))
        });
    }

    info!(
        "Creating native speech synthesizer for platform: {}",
        platform
    );
    try_native().map_err(|e| {
        SpeechError::NotReady(format!(
            "Failed to initialize speech backend for platform '{}': {}",
            platform, e
        ))
    })
}

/// Like [`create_synth`], but degrades to a [`SilentSynth`]
///
/// The failure is logged once here; afterwards the announcer keeps running
/// every frame and simply produces no audio.
pub fn create_synth_or_silent() -> Box<dyn Synth> {
    match create_synth() {
        Ok(synth) => synth,
        Err(e) => {
            error!("Speech unavailable, continuing silently: {}", e);
            Box::new(SilentSynth::new())
        }
    }
}

fn try_native() -> SpeechResult<Box<dyn Synth>> {
    info!("Trying native TTS backend...");
    match NativeSynth::new() {
        Ok(synth) => {
            info!("✓ Successfully initialized native TTS backend");
            Ok(Box::new(synth))
        }
        Err(e) => {
            info!("✗ Native TTS backend unavailable: {}", e);
            Err(e)
        }
    }
}

fn try_espeak() -> SpeechResult<Box<dyn Synth>> {
    info!("Trying espeak-ng backend...");
    match EspeakSynth::new() {
        Ok(synth) => {
            info!("✓ Successfully initialized espeak-ng backend");
            Ok(Box::new(synth))
        }
        Err(e) => {
            info!("✗ espeak-ng backend unavailable: {}", e);
            Err(e)
        }
    }
}
