//! hoverspeak - menu hover announcer
//!
//! Works out which menu control sits under the pointer each frame and
//! speaks its label once the pointer has rested on it long enough.

pub mod announcer;
pub mod error;
pub mod hover;
pub mod input;
pub mod layout;
pub mod platform;
pub mod replay;
pub mod speech;
pub mod state;

pub use error::{HoverspeakError, Result, SpeechError, SpeechResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "hoverspeak";
