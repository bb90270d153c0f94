//! Region layouts
//!
//! Layouts are data: a JSON list of regions, or the built-in main menu
//! column. Each entry either names its lookup keys outright or gives a
//! numeric menu index that expands to the legacy key schemes.
//!
//! ```json
//! [
//!   {"x": 860, "y": 200, "width": 200, "height": 40, "index": 1, "fallback": "Single Player"},
//!   {"x": 860, "y": 245, "width": 200, "height": 40, "keys": ["UI.Back"], "fallback": "Back"}
//! ]
//! ```

use crate::hover::{Rect, Region};
use crate::{HoverspeakError, Result};
use log::{debug, info};
use serde::Deserialize;
use std::path::Path;

/// One region as written in a layout file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegionSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,

    /// Explicit lookup keys, highest priority first
    #[serde(default)]
    pub keys: Vec<String>,

    /// Numeric menu index; expands to the legacy key schemes after `keys`
    #[serde(default)]
    pub index: Option<u32>,

    pub fallback: String,
}

impl RegionSpec {
    pub fn into_region(self) -> Result<Region> {
        if !(self.width >= 0.0 && self.height >= 0.0) {
            return Err(HoverspeakError::Layout(format!(
                "region '{}' has negative size {}x{}",
                self.fallback, self.width, self.height
            )));
        }

        let rect = Rect::new(self.x, self.y, self.x + self.width, self.y + self.height);
        let mut keys = self.keys;
        if let Some(index) = self.index {
            keys.extend(Region::indexed(rect, index, "").keys);
        }
        Ok(Region::new(rect, keys, self.fallback))
    }
}

/// Parse a layout from JSON text
pub fn parse_layout(json: &str) -> Result<Vec<Region>> {
    let specs: Vec<RegionSpec> = serde_json::from_str(json)?;
    specs.into_iter().map(RegionSpec::into_region).collect()
}

/// Load a layout file
pub fn load_layout(path: &Path) -> Result<Vec<Region>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        HoverspeakError::Layout(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let regions = parse_layout(&text)?;
    info!("Loaded {} regions from {}", regions.len(), path.display());
    Ok(regions)
}

const MENU_BUTTON_WIDTH: f64 = 200.0;
const MENU_BUTTON_HEIGHT: f64 = 40.0;
const MENU_TOP: f64 = 200.0;
const MENU_PITCH: f64 = 45.0;

/// Main menu buttons: (menu index, fallback label)
const MAIN_MENU: &[(u32, &str)] = &[
    (1, "Single Player"),
    (2, "Multiplayer"),
    (131, "Workshop"),
    (127, "Mods"),
    (128, "Mod Browser"),
    (129, "Mod Sources"),
    (6, "Settings"),
    (7, "Exit"),
];

/// Built-in main menu: a centred column of buttons
///
/// Positions are approximate; a layout file should be preferred when the
/// real positions are known.
pub fn main_menu(screen_width: f64) -> Vec<Region> {
    let x = screen_width / 2.0 - MENU_BUTTON_WIDTH / 2.0;
    let regions: Vec<Region> = MAIN_MENU
        .iter()
        .enumerate()
        .map(|(row, &(index, fallback))| {
            let y = MENU_TOP + row as f64 * MENU_PITCH;
            let rect = Rect::new(x, y, x + MENU_BUTTON_WIDTH, y + MENU_BUTTON_HEIGHT);
            Region::indexed(rect, index, fallback)
        })
        .collect();
    debug!("Built main menu layout for width {}", screen_width);
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout() {
        let regions = parse_layout(
            r#"[
                {"x": 0, "y": 0, "width": 100, "height": 40, "keys": ["Menu.1"], "fallback": "Single Player"},
                {"x": 0, "y": 45, "width": 100, "height": 40, "keys": ["UI.Mods"], "index": 127, "fallback": "Mods"}
            ]"#,
        )
        .unwrap();

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].rect, Rect::new(0.0, 0.0, 100.0, 40.0));
        assert_eq!(regions[0].keys, vec!["Menu.1"]);
        assert_eq!(
            regions[1].keys,
            vec!["UI.Mods", "LegacyMenu.127", "UI.Button127", "Menu.127"]
        );
        assert_eq!(regions[1].fallback, "Mods");
    }

    #[test]
    fn test_negative_size_rejected() {
        let err = parse_layout(r#"[{"x": 0, "y": 0, "width": -5, "height": 40, "fallback": "Bad"}]"#);
        assert!(matches!(err, Err(HoverspeakError::Layout(_))));
    }

    #[test]
    fn test_missing_fallback_rejected() {
        assert!(parse_layout(r#"[{"x": 0, "y": 0, "width": 5, "height": 5}]"#).is_err());
    }

    #[test]
    fn test_main_menu_column() {
        let regions = main_menu(1920.0);
        assert_eq!(regions.len(), 8);
        assert_eq!(regions[0].rect, Rect::new(860.0, 200.0, 1060.0, 240.0));
        assert_eq!(regions[0].fallback, "Single Player");
        assert_eq!(regions[0].keys[0], "LegacyMenu.1");
        assert_eq!(regions[7].rect.y0, 200.0 + 7.0 * 45.0);
        assert_eq!(regions[7].fallback, "Exit");
    }
}
