//! Key bindings for hoverspeak

use super::trigger::EdgeTrigger;
use log::debug;

/// Action identifier for key bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Speak the configured test phrase, bypassing the debounce
    TestSpeech,
    /// Cut off speech in progress
    Silence,
}

#[derive(Debug, Clone)]
struct Binding {
    key: String,
    action: KeyAction,
    trigger: EdgeTrigger,
}

/// Key name → action table with per-key press detection
///
/// Key names compare case-insensitively, so a config value of `t` binds
/// the same key the host reports as `T`.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Binding>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `action`, replacing any earlier binding for that key
    ///
    /// An empty key name leaves the action unbound.
    pub fn bind(&mut self, key: &str, action: KeyAction) {
        let key = key.trim();
        if key.is_empty() {
            debug!("{:?} left unbound", action);
            return;
        }
        self.bindings.retain(|b| !b.key.eq_ignore_ascii_case(key));
        self.bindings.push(Binding {
            key: key.to_string(),
            action,
            trigger: EdgeTrigger::new(),
        });
    }

    /// Move `action` to `key`, dropping whatever key it had before
    pub fn rebind(&mut self, action: KeyAction, key: &str) {
        self.bindings.retain(|b| b.action != action);
        self.bind(key, action);
    }

    pub fn key_for(&self, action: KeyAction) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.action == action)
            .map(|b| b.key.as_str())
    }

    /// Actions whose key went down this frame, in binding order
    pub fn pressed<S: AsRef<str>>(&mut self, keys_down: &[S]) -> Vec<KeyAction> {
        self.bindings
            .iter_mut()
            .filter_map(|binding| {
                let down = keys_down
                    .iter()
                    .any(|k| k.as_ref().eq_ignore_ascii_case(&binding.key));
                binding.trigger.update(down).then_some(binding.action)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Create the default keymap
pub fn create_default_keymap() -> Keymap {
    let mut map = Keymap::new();
    map.bind("T", KeyAction::TestSpeech);
    map.bind("X", KeyAction::Silence);
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keymap() {
        let mut map = create_default_keymap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.key_for(KeyAction::TestSpeech), Some("T"));
        assert_eq!(map.key_for(KeyAction::Silence), Some("X"));
        assert_eq!(map.pressed(&["t"]), vec![KeyAction::TestSpeech]);
        assert!(map.pressed(&["t", "Q"]).is_empty());
    }

    #[test]
    fn test_bind_replaces_same_key() {
        let mut map = create_default_keymap();
        map.bind("t", KeyAction::Silence);
        assert_eq!(map.len(), 2);
        assert_eq!(map.key_for(KeyAction::TestSpeech), None);
        assert_eq!(map.pressed(&["T"]), vec![KeyAction::Silence]);
    }

    #[test]
    fn test_rebind_moves_action() {
        let mut map = create_default_keymap();
        map.rebind(KeyAction::TestSpeech, "F9");
        assert_eq!(map.len(), 2);
        assert_eq!(map.key_for(KeyAction::TestSpeech), Some("F9"));
        assert!(map.pressed(&["T"]).is_empty());
        assert_eq!(map.pressed(&["F9"]), vec![KeyAction::TestSpeech]);

        map.rebind(KeyAction::Silence, "");
        assert_eq!(map.key_for(KeyAction::Silence), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_empty_key_unbound() {
        let mut map = Keymap::new();
        map.bind("  ", KeyAction::Silence);
        assert!(map.is_empty());
    }

    #[test]
    fn test_pressed_is_edge_triggered() {
        let mut map = create_default_keymap();
        assert_eq!(map.pressed(&["T"]), vec![KeyAction::TestSpeech]);
        assert!(map.pressed(&["T"]).is_empty());
        assert_eq!(map.pressed(&["T", "x"]), vec![KeyAction::Silence]);
        assert!(map.pressed::<&str>(&[]).is_empty());
        assert_eq!(map.pressed(&["T"]), vec![KeyAction::TestSpeech]);
    }
}
