//! Speech synthesis system

pub mod backends;
pub mod synth;

pub use backends::{RecordingSynth, SilentSynth};
pub use synth::{create_synth, create_synth_or_silent, Synth};
