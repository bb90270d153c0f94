//! Pointer → label resolution

use super::lookup::TextLookup;
use super::region::Region;
use kurbo::Point;
use log::warn;

/// First region, in list order, whose scaled bounds contain the pointer
///
/// Overlapping regions are not ranked by area or depth: the earlier entry
/// always wins.
pub fn hit_test(pointer: Point, regions: &[Region], scale: f64) -> Option<&Region> {
    regions.iter().find(|region| region.contains(pointer, scale))
}

/// Resolves the hovered region to speakable text
pub struct HoverResolver {
    lookup: Box<dyn TextLookup + Send>,
}

impl HoverResolver {
    pub fn new(lookup: Box<dyn TextLookup + Send>) -> Self {
        Self { lookup }
    }

    /// Label of the control under the pointer, or `None` when there is none
    pub fn resolve(&self, pointer: Point, regions: &[Region], scale: f64) -> Option<String> {
        hit_test(pointer, regions, scale).map(|region| self.label_for(region))
    }

    /// First candidate key with localized text, else the fallback
    ///
    /// A miss is logged and never returned as an error.
    pub fn label_for(&self, region: &Region) -> String {
        if let Some(key) = region.keys.iter().find(|key| self.lookup.exists(key)) {
            return self.lookup.get(key);
        }

        warn!(
            "No localized text for '{}' (tried {}). Using fallback: '{}'",
            region.ident(),
            if region.keys.is_empty() {
                "no keys".to_string()
            } else {
                region.keys.join(", ")
            },
            region.fallback
        );
        region.fallback.clone()
    }
}
