//! Hit-testable menu regions

use kurbo::{Point, Rect};

/// Key templates tried, in order, for a numeric menu index
///
/// `{}` is replaced by the index.
pub const LEGACY_KEY_SCHEMES: [&str; 3] = ["LegacyMenu.{}", "UI.Button{}", "Menu.{}"];

/// A menu control: where it is, how to look up its label, and what to say
/// when no lookup key resolves
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Bounds in unscaled reference coordinates
    pub rect: Rect,

    /// Candidate text-lookup keys, highest priority first
    pub keys: Vec<String>,

    /// Literal label used when none of `keys` resolves
    pub fallback: String,
}

impl Region {
    pub fn new(rect: Rect, keys: Vec<String>, fallback: impl Into<String>) -> Self {
        Self {
            rect,
            keys,
            fallback: fallback.into(),
        }
    }

    /// Region whose keys come from a numeric menu index
    ///
    /// Index 1 yields `LegacyMenu.1`, `UI.Button1`, `Menu.1`.
    pub fn indexed(rect: Rect, index: u32, fallback: impl Into<String>) -> Self {
        let keys = LEGACY_KEY_SCHEMES
            .iter()
            .map(|scheme| scheme.replace("{}", &index.to_string()))
            .collect();
        Self::new(rect, keys, fallback)
    }

    /// Bounds after applying a uniform UI scale
    pub fn scaled_rect(&self, scale: f64) -> Rect {
        Rect::new(
            self.rect.x0 * scale,
            self.rect.y0 * scale,
            self.rect.x1 * scale,
            self.rect.y1 * scale,
        )
    }

    /// Half-open containment test against the scaled bounds
    pub fn contains(&self, pointer: Point, scale: f64) -> bool {
        self.scaled_rect(scale).contains(pointer)
    }

    /// Name for diagnostics: the first key, or the fallback text
    pub fn ident(&self) -> &str {
        self.keys.first().map(String::as_str).unwrap_or(&self.fallback)
    }
}
