//! Debounced hover announcements
//!
//! Sweeping the pointer down a dense button column would otherwise speak
//! one label per frame per button crossed. The announcer only speaks the
//! control the pointer rests on for the debounce interval, and only once
//! per rest.
//!
//! There is never more than one pending label. A newer hover target
//! replaces it unannounced.

pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock, Stopwatch};

use crate::speech::Synth;
use log::{debug, error, info};
use std::time::Duration;

/// Default dwell time before a hovered label is spoken
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(300);

/// Per-frame hover → speech state machine
pub struct Announcer {
    synth: Box<dyn Synth>,
    clock: Box<dyn Clock>,
    debounce: Duration,

    /// Hover result seen on the previous tick
    last_label: Option<String>,

    /// Label waiting for the debounce interval; `Some` only while `timer` runs
    pending: Option<String>,

    timer: Stopwatch,
}

impl Announcer {
    pub fn new(synth: Box<dyn Synth>, clock: Box<dyn Clock>) -> Self {
        Self {
            synth,
            clock,
            debounce: DEBOUNCE_INTERVAL,
            last_label: None,
            pending: None,
            timer: Stopwatch::default(),
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn last_label(&self) -> Option<&str> {
        self.last_label.as_deref()
    }

    pub fn pending_label(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Is there anything a context-exit reset would clear?
    pub fn is_idle(&self) -> bool {
        self.last_label.is_none() && self.pending.is_none() && !self.timer.is_running()
    }

    /// Advance one frame with this frame's hover result
    ///
    /// Returns the text handed to the synth when the debounce fired, even
    /// if the synth then reported an error.
    pub fn on_tick(&mut self, hover: Option<&str>) -> Option<String> {
        let now = self.clock.now();

        if hover != self.last_label.as_deref() {
            match hover {
                Some(label) => {
                    debug!("Hover moved to '{}', waiting {:?}", label, self.debounce);
                    self.pending = Some(label.to_string());
                    self.timer.restart(now);
                }
                None => {
                    if let Some(dropped) = self.pending.take() {
                        debug!("Hover left '{}' before it was announced", dropped);
                    }
                    self.timer.reset();
                }
            }
            self.last_label = hover.map(str::to_string);
        }

        match self.timer.elapsed(now) {
            Some(elapsed) if elapsed >= self.debounce => self.fire(),
            _ => None,
        }
    }

    fn fire(&mut self) -> Option<String> {
        self.timer.reset();
        let text = self.pending.take()?;
        if text.is_empty() {
            debug!("Pending label is empty, nothing to say");
            return None;
        }

        if let Err(e) = self.synth.speak(&text, true) {
            error!("Speech failed for '{}': {}", text, e);
        }
        Some(text)
    }

    /// Forget everything without speaking
    ///
    /// Called when the hover-tracked UI goes away so a stale pending label
    /// can't fire afterwards.
    pub fn reset(&mut self) {
        self.last_label = None;
        self.pending = None;
        self.timer.reset();
    }

    /// Speak immediately with interrupt, outside the debounce machinery
    ///
    /// Returns whether the synth accepted the request.
    pub fn speak_now(&mut self, text: &str) -> bool {
        match self.synth.speak(text, true) {
            Ok(()) => {
                info!("Spoke '{}'", text);
                true
            }
            Err(e) => {
                error!("Speech failed for '{}': {}", text, e);
                false
            }
        }
    }

    /// Cut off whatever is being spoken; announcer state is untouched
    pub fn silence(&mut self) {
        if let Err(e) = self.synth.cancel() {
            error!("Failed to cancel speech: {}", e);
        }
    }

    /// Backend name, for log lines
    pub fn synth_name(&self) -> &'static str {
        self.synth.name()
    }
}
