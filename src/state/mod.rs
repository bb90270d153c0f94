//! Application state management
//!
//! `State` is what the host loop holds on to between frames: config, the
//! hover resolver, the announcer and the key bindings. `State::frame` is
//! the single per-frame entry point.

pub mod config;

use crate::announcer::{Announcer, Clock};
use crate::hover::{HoverResolver, Point, Region, TextLookup};
use crate::input::{create_default_keymap, KeyAction, Keymap};
use crate::speech::Synth;
use config::Config;
use log::{debug, info, warn};

/// One host frame of input
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Pointer position in screen coordinates
    pub pointer: Point,

    /// Whether the hover-tracked menu is on screen
    pub menu_active: bool,

    /// Names of keys currently held down
    pub keys_down: Vec<String>,

    /// UI scale for this frame; `None` uses the configured scale
    pub ui_scale: Option<f64>,
}

impl Frame {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            pointer: Point::new(x, y),
            menu_active: true,
            keys_down: Vec::new(),
            ui_scale: None,
        }
    }

    pub fn outside_menu(mut self) -> Self {
        self.menu_active = false;
        self
    }

    pub fn with_keys<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.keys_down = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.ui_scale = Some(scale);
        self
    }
}

/// What one frame did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    /// Label under the pointer; `None` also when the menu was inactive
    pub hovered: Option<String>,

    /// Label the debounce fired for this frame
    pub announced: Option<String>,

    /// Key actions that went off this frame
    pub actions: Vec<KeyAction>,
}

/// Main application state
pub struct State {
    pub config: Config,
    resolver: HoverResolver,
    announcer: Announcer,
    keymap: Keymap,
}

impl State {
    /// Build state around an already-created synth
    ///
    /// Speech settings from the config are applied here; a backend that
    /// rejects them is logged and kept.
    pub fn new(
        config: Config,
        mut synth: Box<dyn Synth>,
        lookup: Box<dyn TextLookup + Send>,
        clock: Box<dyn Clock>,
    ) -> Self {
        info!("Initializing state with {} speech backend", synth.name());

        if let Some(rate) = config.rate() {
            match synth.set_rate(rate) {
                Ok(()) => info!("Speech rate set to {}", rate),
                Err(e) => warn!("Could not set speech rate: {}", e),
            }
        }
        if let Some(volume) = config.volume() {
            match synth.set_volume(volume) {
                Ok(()) => info!("Speech volume set to {}", volume),
                Err(e) => warn!("Could not set speech volume: {}", e),
            }
        }
        if let Some(voice_idx) = config.voice_idx() {
            match synth.set_voice_idx(voice_idx) {
                Ok(()) => info!("Speech voice index set to {}", voice_idx),
                Err(e) => warn!("Could not set speech voice: {}", e),
            }
        }

        let announcer = Announcer::new(synth, clock).with_debounce(config.debounce());
        info!("Debounce interval: {:?}", announcer.debounce());

        let mut keymap = create_default_keymap();
        keymap.rebind(KeyAction::TestSpeech, &config.test_speech_key());
        keymap.rebind(KeyAction::Silence, &config.silence_key());
        info!("Key handler initialized with {} bindings", keymap.len());

        Self {
            config,
            resolver: HoverResolver::new(lookup),
            announcer,
            keymap,
        }
    }

    pub fn announcer(&self) -> &Announcer {
        &self.announcer
    }

    /// Speak the configured greeting, if any
    pub fn greet(&mut self) {
        let greeting = self.config.greeting();
        if !greeting.trim().is_empty() {
            self.announcer.speak_now(&greeting);
        }
    }

    /// Run one frame against this frame's regions
    pub fn frame(&mut self, frame: &Frame, regions: &[Region]) -> FrameOutcome {
        let actions = self.keymap.pressed(frame.keys_down.as_slice());
        for action in &actions {
            self.run_action(*action);
        }

        if !frame.menu_active {
            if !self.announcer.is_idle() {
                debug!("Menu closed, dropping hover state");
                self.announcer.reset();
            }
            return FrameOutcome {
                actions,
                ..FrameOutcome::default()
            };
        }

        let scale = match frame.ui_scale {
            Some(scale) if scale.is_finite() && scale > 0.0 => scale,
            Some(scale) => {
                warn!("Ignoring frame ui_scale {}, using configured scale", scale);
                self.config.ui_scale()
            }
            None => self.config.ui_scale(),
        };
        let hovered = self.resolver.resolve(frame.pointer, regions, scale);
        let announced = self.announcer.on_tick(hovered.as_deref());

        FrameOutcome {
            hovered,
            announced,
            actions,
        }
    }

    /// Cut off any speech in progress and release the backend
    pub fn shutdown(mut self) {
        self.announcer.silence();
        info!("{} speech backend closed", self.announcer.synth_name());
    }

    /// Key currently bound to `action`, if any
    pub fn key_for(&self, action: KeyAction) -> Option<&str> {
        self.keymap.key_for(action)
    }

    fn run_action(&mut self, action: KeyAction) {
        info!("{:?} key pressed", action);
        match action {
            KeyAction::TestSpeech => {
                let phrase = self.config.test_phrase();
                self.announcer.speak_now(&phrase);
            }
            KeyAction::Silence => self.announcer.silence(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcer::ManualClock;
    use crate::hover::{Catalog, Rect};
    use crate::speech::RecordingSynth;
    use std::path::PathBuf;
    use std::time::Duration;

    fn state() -> (State, RecordingSynth, ManualClock) {
        let synth = RecordingSynth::new();
        let clock = ManualClock::new();
        let state = State::new(
            Config::in_memory(PathBuf::from("unused.cfg")),
            Box::new(synth.clone()),
            Box::new(Catalog::empty()),
            Box::new(clock.clone()),
        );
        (state, synth, clock)
    }

    fn layout() -> Vec<Region> {
        vec![Region::indexed(Rect::new(0.0, 0.0, 100.0, 40.0), 1, "Single Player")]
    }

    #[test]
    fn test_frame_announces_after_rest() {
        let (mut state, synth, clock) = state();
        let regions = layout();

        let outcome = state.frame(&Frame::at(50.0, 20.0), &regions);
        assert_eq!(outcome.hovered.as_deref(), Some("Single Player"));
        assert_eq!(outcome.announced, None);

        clock.advance(Duration::from_millis(300));
        let outcome = state.frame(&Frame::at(50.0, 20.0), &regions);
        assert_eq!(outcome.announced.as_deref(), Some("Single Player"));
        assert_eq!(synth.texts(), vec!["Single Player".to_string()]);
    }

    #[test]
    fn test_inactive_menu_skips_hover() {
        let (mut state, synth, clock) = state();
        let regions = layout();

        state.frame(&Frame::at(50.0, 20.0), &regions);
        let outcome = state.frame(&Frame::at(50.0, 20.0).outside_menu(), &regions);
        assert_eq!(outcome.hovered, None);
        assert!(state.announcer().is_idle());

        clock.advance(Duration::from_secs(1));
        state.frame(&Frame::at(50.0, 20.0).outside_menu(), &regions);
        assert!(synth.texts().is_empty());
    }

    #[test]
    fn test_keys_work_outside_menu() {
        let (mut state, synth, _clock) = state();

        let outcome = state.frame(&Frame::at(0.0, 0.0).outside_menu().with_keys(["T"]), &[]);
        assert_eq!(outcome.actions, vec![KeyAction::TestSpeech]);
        assert_eq!(synth.texts(), vec!["Testing speech output".to_string()]);

        state.frame(&Frame::at(0.0, 0.0).with_keys(["X"]), &[]);
        assert_eq!(synth.cancels(), 1);
    }

    #[test]
    fn test_frame_scale_override() {
        let (mut state, _synth, _clock) = state();
        let regions = layout();

        // (150, 60) is outside at 1.0 but inside at 2.0
        assert_eq!(state.frame(&Frame::at(150.0, 60.0), &regions).hovered, None);
        assert_eq!(
            state
                .frame(&Frame::at(150.0, 60.0).with_scale(2.0), &regions)
                .hovered
                .as_deref(),
            Some("Single Player")
        );
    }

    #[test]
    fn test_invalid_frame_scale_falls_back() {
        let (mut state, _synth, _clock) = state();
        let regions = layout();

        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let outcome = state.frame(&Frame::at(50.0, 20.0).with_scale(scale), &regions);
            assert_eq!(outcome.hovered.as_deref(), Some("Single Player"), "scale {}", scale);
        }
    }

    #[test]
    fn test_config_keys_replace_defaults() {
        let mut config = Config::in_memory(PathBuf::from("unused.cfg"));
        config.set("keys", "test_speech", "F9");
        config.set("keys", "silence", "");
        let synth = RecordingSynth::new();
        let mut state = State::new(
            config,
            Box::new(synth.clone()),
            Box::new(Catalog::empty()),
            Box::new(ManualClock::new()),
        );

        assert_eq!(state.key_for(KeyAction::TestSpeech), Some("F9"));
        assert_eq!(state.key_for(KeyAction::Silence), None);

        let outcome = state.frame(&Frame::at(0.0, 0.0).with_keys(["T", "X"]), &[]);
        assert!(outcome.actions.is_empty());
        let outcome = state.frame(&Frame::at(0.0, 0.0).with_keys(["f9"]), &[]);
        assert_eq!(outcome.actions, vec![KeyAction::TestSpeech]);
    }

    #[test]
    fn test_shutdown_cancels_speech() {
        let (mut state, synth, _clock) = state();
        state.greet();
        state.shutdown();
        assert_eq!(synth.cancels(), 1);
    }

    #[test]
    fn test_greet() {
        let (mut state, synth, _clock) = state();
        state.greet();
        assert_eq!(synth.utterances()[0].text, "Menu announcer ready");
        assert!(synth.utterances()[0].interrupt);

        state.config.set("speech", "greeting", "");
        state.greet();
        assert_eq!(synth.texts().len(), 1);
    }
}
