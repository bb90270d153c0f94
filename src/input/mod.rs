//! Input handling and key bindings
//!
//! Keys arrive as the set of names held down this frame. Actions fire on
//! the frame a key goes down, never while it is held.

pub mod keymap;
pub mod trigger;

pub use keymap::{create_default_keymap, KeyAction, Keymap};
pub use trigger::EdgeTrigger;
