//! In-memory backend that records what it was asked to say
//!
//! Clones share one log, so a test can hand one clone to the announcer
//! and keep another to inspect. `fail_with` makes every later `speak`
//! return an error while still recording the attempt.

use crate::speech::Synth;
use crate::{SpeechError, SpeechResult};
use std::sync::{Arc, Mutex};

/// One `speak` call as seen by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub interrupt: bool,
}

#[derive(Debug, Default)]
struct Log {
    utterances: Vec<Utterance>,
    cancels: usize,
    failure: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSynth {
    log: Arc<Mutex<Log>>,
}

impl RecordingSynth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `speak` fail with this reason
    pub fn fail_with(&self, reason: &str) {
        self.lock().failure = Some(reason.to_string());
    }

    pub fn utterances(&self) -> Vec<Utterance> {
        self.lock().utterances.clone()
    }

    /// Just the spoken texts, in order
    pub fn texts(&self) -> Vec<String> {
        self.lock()
            .utterances
            .iter()
            .map(|u| u.text.clone())
            .collect()
    }

    pub fn cancels(&self) -> usize {
        self.lock().cancels
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Log> {
        // A poisoned log only means a test already panicked
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Synth for RecordingSynth {
    fn speak(&mut self, text: &str, interrupt: bool) -> SpeechResult<()> {
        let mut log = self.lock();
        log.utterances.push(Utterance {
            text: text.to_string(),
            interrupt,
        });
        match &log.failure {
            Some(reason) => Err(SpeechError::Backend(reason.clone())),
            None => Ok(()),
        }
    }

    fn cancel(&mut self) -> SpeechResult<()> {
        self.lock().cancels += 1;
        Ok(())
    }

    fn set_rate(&mut self, _rate: u8) -> SpeechResult<()> {
        Ok(())
    }

    fn set_volume(&mut self, _volume: u8) -> SpeechResult<()> {
        Ok(())
    }

    fn set_voice_idx(&mut self, _idx: usize) -> SpeechResult<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_log() {
        let recorder = RecordingSynth::new();
        let mut synth = recorder.clone();

        synth.speak("Mods", true).unwrap();
        synth.cancel().unwrap();

        assert_eq!(
            recorder.utterances(),
            vec![Utterance {
                text: "Mods".to_string(),
                interrupt: true
            }]
        );
        assert_eq!(recorder.cancels(), 1);
    }

    #[test]
    fn test_failure_still_records() {
        let recorder = RecordingSynth::new();
        let mut synth = recorder.clone();
        recorder.fail_with("engine gone");

        assert!(synth.speak("Exit", true).is_err());
        assert_eq!(recorder.texts(), vec!["Exit".to_string()]);
    }
}
