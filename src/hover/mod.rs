//! Hover resolution
//!
//! Finds the menu control under the pointer and turns it into the text
//! that should be spoken. Regions are plain data handed in every frame;
//! nothing here caches layout between frames.

pub mod lookup;
pub mod region;
pub mod resolver;

pub use kurbo::{Point, Rect};
pub use lookup::{Catalog, TextLookup};
pub use region::{Region, LEGACY_KEY_SCHEMES};
pub use resolver::{hit_test, HoverResolver};
