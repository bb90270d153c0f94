//! Configuration management

use crate::announcer::DEBOUNCE_INTERVAL;
use crate::{HoverspeakError, Result};
use ini::Ini;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Persistent settings, stored as INI
///
/// Missing keys fall back to the defaults written by `default_config`, so
/// an older or hand-trimmed file still loads.
pub struct Config {
    ini: Ini,

    /// Config file path (~/.hoverspeak.cfg)
    path: PathBuf,
}

impl Config {
    /// Load configuration from the default location, creating it if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, creating it with defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(path)
                .map_err(|e| HoverspeakError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(path)
                .map_err(|e| HoverspeakError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self {
            ini,
            path: path.to_path_buf(),
        })
    }

    /// Defaults only, not backed by a file on disk yet
    pub fn in_memory(path: PathBuf) -> Self {
        Self {
            ini: Self::default_config(),
            path,
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| HoverspeakError::Config(format!("Failed to save config: {}", e)))
    }

    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hoverspeak.cfg")
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("speech"))
            .set("greeting", "Menu announcer ready")
            .set("test_phrase", "Testing speech output");

        ini.with_section(Some("announcer"))
            .set("debounce_ms", DEBOUNCE_INTERVAL.as_millis().to_string());

        ini.with_section(Some("display"))
            .set("ui_scale", "1.0")
            .set("screen_width", "1920");

        ini.with_section(Some("keys"))
            .set("test_speech", "T")
            .set("silence", "X");

        ini.with_section(Some("paths"))
            .set("layout", "")
            .set("localization", "");

        ini
    }

    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    pub fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    pub fn get_float(&self, section: &str, key: &str, default: f64) -> f64 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// Speech rate (0-100); unset means the engine default
    pub fn rate(&self) -> Option<u8> {
        self.get_int("speech", "rate", -1)
            .try_into()
            .ok()
            .filter(|&r| r <= 100)
    }

    /// Speech volume (0-100)
    pub fn volume(&self) -> Option<u8> {
        self.get_int("speech", "volume", -1)
            .try_into()
            .ok()
            .filter(|&v| v <= 100)
    }

    /// Voice index for the TTS engine
    pub fn voice_idx(&self) -> Option<usize> {
        self.get_int("speech", "voice_idx", -1).try_into().ok()
    }

    /// Spoken once at startup; empty disables it
    pub fn greeting(&self) -> String {
        self.get_string("speech", "greeting", "Menu announcer ready")
    }

    /// Phrase spoken by the test-speech key
    pub fn test_phrase(&self) -> String {
        self.get_string("speech", "test_phrase", "Testing speech output")
    }

    /// How long the pointer must rest on a control before it is spoken
    pub fn debounce(&self) -> Duration {
        let default = DEBOUNCE_INTERVAL.as_millis() as i64;
        match u64::try_from(self.get_int("announcer", "debounce_ms", default)) {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                warn!("Negative debounce_ms ignored, using {}ms", default);
                DEBOUNCE_INTERVAL
            }
        }
    }

    /// UI zoom factor applied to region bounds before hit-testing
    pub fn ui_scale(&self) -> f64 {
        let scale = self.get_float("display", "ui_scale", 1.0);
        if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            warn!("Invalid ui_scale {}, using 1.0", scale);
            1.0
        }
    }

    /// Screen width used to centre the built-in main menu layout
    pub fn screen_width(&self) -> f64 {
        self.get_float("display", "screen_width", 1920.0)
    }

    pub fn test_speech_key(&self) -> String {
        self.get_string("keys", "test_speech", "T")
    }

    pub fn silence_key(&self) -> String {
        self.get_string("keys", "silence", "X")
    }

    /// Layout file; `None` means the built-in main menu
    pub fn layout_path(&self) -> Option<PathBuf> {
        self.optional_path("layout")
    }

    /// Localization catalog; `None` means every region uses its fallback
    pub fn localization_path(&self) -> Option<PathBuf> {
        self.optional_path("localization")
    }

    fn optional_path(&self, key: &str) -> Option<PathBuf> {
        let value = self.get_string("paths", key, "");
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(PathBuf::from(value))
        }
    }
}
