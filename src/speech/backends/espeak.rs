//! espeak-ng subprocess backend
//!
//! Used on Linux when Speech Dispatcher is not available, and first on WSL
//! where WSLg exposes a PulseAudio server at /mnt/wslg/PulseServer.
//!
//! Dependencies:
//! - espeak-ng (install with: sudo apt install espeak-ng)

use crate::platform::is_wsl;
use crate::speech::Synth;
use crate::{SpeechError, SpeechResult};
use log::{debug, error, info, warn};
use std::io::Write;
use std::process::{Child, Command, Stdio};

const WSLG_PULSE_PATH: &str = "/mnt/wslg/PulseServer";

const VOICES: &[&str] = &[
    "en", "en-us", "en-gb", "en-sc", "es", "fr", "de", "it", "pt", "ru",
];

/// espeak-ng backend, one child process per utterance
pub struct EspeakSynth {
    /// Currently running espeak-ng process
    current_process: Option<Child>,

    /// Cached rate setting (0-100)
    rate: u8,

    /// Cached volume setting (0-100)
    volume: u8,

    /// Voice name for espeak-ng
    voice: &'static str,

    espeak_path: String,
}

impl EspeakSynth {
    /// Point espeak-ng at the WSLg PulseAudio server when there is one
    fn setup_pulseaudio() -> SpeechResult<()> {
        if std::env::var("PULSE_SERVER").is_ok() {
            debug!("PULSE_SERVER already set via environment");
            return Ok(());
        }

        if std::path::Path::new(WSLG_PULSE_PATH).exists() {
            info!("Auto-detected WSLG PulseAudio server at {}", WSLG_PULSE_PATH);
            std::env::set_var("PULSE_SERVER", WSLG_PULSE_PATH);
            return Ok(());
        }

        if is_wsl() {
            warn!("WSLG PulseAudio server not found at {}", WSLG_PULSE_PATH);
            warn!("Set PULSE_SERVER or make sure WSLg is running");
            return Err(SpeechError::NotReady(
                "PulseAudio server not found. Install WSLg or set PULSE_SERVER.".to_string(),
            ));
        }

        debug!("Native Linux: espeak-ng will use the default audio configuration");
        Ok(())
    }

    /// Create a new espeak-ng synthesizer
    pub fn new() -> SpeechResult<Self> {
        debug!("Creating espeak-ng backend");

        Self::setup_pulseaudio()?;

        let espeak_path = Self::find_espeak()?;
        debug!("Found espeak-ng at: {}", espeak_path);

        Ok(Self {
            current_process: None,
            rate: 50,
            volume: 80,
            voice: VOICES[0],
            espeak_path,
        })
    }

    fn find_espeak() -> SpeechResult<String> {
        for path in ["espeak-ng", "/usr/bin/espeak-ng"] {
            let status = Command::new(path)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            if matches!(status, Ok(s) if s.success()) {
                return Ok(path.to_string());
            }
        }

        Err(SpeechError::NotReady(
            "espeak-ng not found. Install with: sudo apt install espeak-ng".to_string(),
        ))
    }

    /// Convert rate (0-100) to espeak speed (80-450 wpm)
    fn rate_to_speed(rate: u8) -> u16 {
        80 + (rate.min(100) as u16 * 370 / 100)
    }

    /// Convert volume (0-100) to espeak amplitude (0-200)
    fn volume_to_amplitude(volume: u8) -> u16 {
        volume.min(100) as u16 * 2
    }

    fn voice_by_idx(idx: usize) -> &'static str {
        VOICES.get(idx).copied().unwrap_or(VOICES[0])
    }

    /// Kill the running utterance, if any
    fn cancel_process(&mut self) {
        if let Some(mut child) = self.current_process.take() {
            debug!("Killing espeak-ng process");
            match child.kill() {
                Ok(_) => {
                    let _ = child.wait();
                }
                Err(e) => debug!("Failed to kill espeak-ng process: {}", e),
            }
        }
    }

    /// espeak-ng invocation for the current settings; the text goes on stdin
    fn command(&self) -> Command {
        let mut command = Command::new(&self.espeak_path);
        command
            .arg("-v")
            .arg(self.voice)
            .arg("-s")
            .arg(Self::rate_to_speed(self.rate).to_string())
            .arg("-a")
            .arg(Self::volume_to_amplitude(self.volume).to_string())
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }

    /// Block until the running utterance finishes
    fn wait_process(&mut self) -> SpeechResult<()> {
        if let Some(mut child) = self.current_process.take() {
            child.wait()?;
        }
        Ok(())
    }
}

impl Synth for EspeakSynth {
    /// Without `interrupt`, waits for the previous utterance to end so
    /// two processes never talk over each other.
    fn speak(&mut self, text: &str, interrupt: bool) -> SpeechResult<()> {
        if text.is_empty() {
            return Ok(());
        }

        if interrupt {
            self.cancel_process();
        } else {
            self.wait_process()?;
        }

        debug!("Speaking (interrupt={}): {}", interrupt, text);
        let mut child = self.command().spawn().map_err(|e| {
            error!("Failed to spawn espeak-ng: {}", e);
            SpeechError::Backend(format!("Failed to start espeak-ng: {}", e))
        })?;

        // espeak-ng speaks once stdin reaches end of input, on drop
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(text.as_bytes()) {
                let _ = child.kill();
                let _ = child.wait();
                return Err(SpeechError::Io(e));
            }
        }

        self.current_process = Some(child);
        Ok(())
    }

    fn cancel(&mut self) -> SpeechResult<()> {
        debug!("Canceling speech");
        self.cancel_process();
        Ok(())
    }

    fn set_rate(&mut self, rate: u8) -> SpeechResult<()> {
        debug!("Setting rate to {}", rate);
        self.rate = rate;
        Ok(())
    }

    fn set_volume(&mut self, volume: u8) -> SpeechResult<()> {
        debug!("Setting volume to {}", volume);
        self.volume = volume;
        Ok(())
    }

    fn set_voice_idx(&mut self, idx: usize) -> SpeechResult<()> {
        self.voice = Self::voice_by_idx(idx);
        debug!("Setting voice to {} (index {})", self.voice, idx);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "espeak-ng"
    }
}

impl Drop for EspeakSynth {
    fn drop(&mut self) {
        debug!("Shutting down espeak-ng backend");
        self.cancel_process();
    }
}
