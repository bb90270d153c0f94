//! Backend that accepts every request and plays nothing

use crate::speech::Synth;
use crate::SpeechResult;
use log::trace;

/// Stand-in synth for hosts where no engine could start
#[derive(Debug, Default)]
pub struct SilentSynth;

impl SilentSynth {
    pub fn new() -> Self {
        Self
    }
}

impl Synth for SilentSynth {
    fn speak(&mut self, text: &str, interrupt: bool) -> SpeechResult<()> {
        trace!("(silent, interrupt={}) {}", interrupt, text);
        Ok(())
    }

    fn cancel(&mut self) -> SpeechResult<()> {
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
        "silent"
    }
}
