//! Native Rust TTS backend using the tts crate
//!
//! The `tts` crate provides a unified interface to:
//! - Speech Dispatcher on Linux
//! - AVFoundation on macOS/iOS
//! - WinRT/SAPI on Windows

use crate::speech::Synth;
use crate::{SpeechError, SpeechResult};
use log::{debug, error, warn};
use tts::Tts as TtsCrate;

/// Native TTS backend using the tts crate
pub struct NativeSynth {
    tts: TtsCrate,
}

impl NativeSynth {
    /// Create a new native TTS synthesizer
    pub fn new() -> SpeechResult<Self> {
        debug!("Creating native TTS backend");

        let tts = TtsCrate::default()
            .map_err(|e| SpeechError::NotReady(format!("Failed to initialize TTS: {}", e)))?;

        debug!("Native TTS backend created successfully");

        Ok(Self { tts })
    }

    /// Map a 0-100 setting onto an engine range
    ///
    /// 50 lands on `normal`, the ends land on `min` and `max`.
    fn scale_setting(value: u8, min: f32, normal: f32, max: f32) -> f32 {
        let value = value.min(100) as f32;
        if value <= 50.0 {
            min + (normal - min) * (value / 50.0)
        } else {
            normal + (max - normal) * ((value - 50.0) / 50.0)
        }
    }
}

impl Synth for NativeSynth {
    fn speak(&mut self, text: &str, interrupt: bool) -> SpeechResult<()> {
        if text.is_empty() {
            return Ok(());
        }

        debug!("Speaking (interrupt={}): {}", interrupt, text);
        self.tts.speak(text, interrupt).map_err(|e| {
            error!("Failed to speak: {}", e);
            SpeechError::Backend(format!("Speak failed: {}", e))
        })?;

        Ok(())
    }

    fn cancel(&mut self) -> SpeechResult<()> {
        debug!("Canceling speech");
        if !self.tts.supported_features().stop {
            warn!("Stopping speech not supported on this platform");
            return Ok(());
        }

        self.tts.stop().map_err(|e| {
            error!("Failed to cancel speech: {}", e);
            SpeechError::Backend(format!("Cancel failed: {}", e))
        })?;

        Ok(())
    }

    fn set_rate(&mut self, rate: u8) -> SpeechResult<()> {
        debug!("Setting rate to {}", rate);

        if !self.tts.supported_features().rate {
            warn!("Rate control not supported on this platform");
            return Ok(());
        }

        let converted = Self::scale_setting(
            rate,
            self.tts.min_rate(),
            self.tts.normal_rate(),
            self.tts.max_rate(),
        );
        self.tts
            .set_rate(converted)
            .map_err(|e| SpeechError::Backend(format!("Failed to set rate: {}", e)))?;

        Ok(())
    }

    fn set_volume(&mut self, volume: u8) -> SpeechResult<()> {
        debug!("Setting volume to {}", volume);

        if !self.tts.supported_features().volume {
            warn!("Volume control not supported on this platform");
            return Ok(());
        }

        let min = self.tts.min_volume();
        let max = self.tts.max_volume();
        let converted = min + (max - min) * (volume.min(100) as f32 / 100.0);
        self.tts
            .set_volume(converted)
            .map_err(|e| SpeechError::Backend(format!("Failed to set volume: {}", e)))?;

        Ok(())
    }

    fn set_voice_idx(&mut self, idx: usize) -> SpeechResult<()> {
        debug!("Setting voice index to {}", idx);

        if !self.tts.supported_features().voice {
            warn!("Voice selection not supported on this platform");
            return Ok(());
        }

        let voices = self
            .tts
            .voices()
            .map_err(|e| SpeechError::Backend(format!("Failed to get voices: {}", e)))?;

        if let Some(voice) = voices.get(idx) {
            debug!("Selecting voice: {:?}", voice);
            self.tts
                .set_voice(voice)
                .map_err(|e| SpeechError::Backend(format!("Failed to set voice: {}", e)))?;
        } else {
            warn!(
                "Voice index {} out of range (have {} voices)",
                idx,
                voices.len()
            );
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "native"
    }
}
