use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use prompter_core::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// Parsed key binding (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

impl From<&KeyEvent> for KeyBinding {
    fn from(key: &KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

/// Runtime keymap for efficient key-to-action lookup
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    /// Create a keymap from configuration
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();

        // Helper to add binding with conflict detection
        let mut add_binding = |key_str: &str, action: Action| {
            if let Some(binding) = parse_key_binding(key_str) {
                if let Some(existing) = bindings.get(&binding) {
                    warn!(
                        "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                        key_str, existing, action
                    );
                } else {
                    bindings.insert(binding, action);
                }
            } else {
                warn!("Invalid key binding: '{}', using default", key_str);
            }
        };

        add_binding(&config.play_pause, Action::TogglePlayPause);
        add_binding(&config.reset, Action::ResetScroll);
        add_binding(&config.toggle_lock, Action::ToggleLock);
        add_binding(&config.toggle_mirror, Action::ToggleMirror);
        add_binding(&config.speed_up, Action::SpeedUp);
        add_binding(&config.speed_down, Action::SpeedDown);
        add_binding(&config.scroll_back, Action::ScrollBack);
        add_binding(&config.scroll_forward, Action::ScrollForward);
        add_binding(&config.open_editor, Action::OpenEditor);
        add_binding(&config.help, Action::Help);
        add_binding(&config.quit, Action::Quit);

        // Hardcoded bindings that shouldn't be configurable
        // Ctrl+C always quits
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        // '=' as an unshifted alias for '+' on most layouts
        bindings
            .entry(KeyBinding::simple(KeyCode::Char('=')))
            .or_insert(Action::SpeedUp);

        Self { bindings }
    }

    /// Get the action for a key event.
    ///
    /// Non-alphabetic characters ('+', '?') arrive with or without SHIFT
    /// depending on the layout, so a missed exact lookup retries without it.
    pub fn get(&self, key: &KeyEvent) -> Option<&Action> {
        let binding = KeyBinding::from(key);
        if let Some(action) = self.bindings.get(&binding) {
            return Some(action);
        }
        if let KeyCode::Char(c) = binding.code {
            if !c.is_alphabetic() && binding.modifiers.contains(KeyModifiers::SHIFT) {
                let without_shift = KeyBinding::new(
                    binding.code,
                    binding.modifiers - KeyModifiers::SHIFT,
                );
                return self.bindings.get(&without_shift);
            }
        }
        None
    }
}

/// Parse Vim-style key notation into KeyBinding
/// Supported formats:
/// - Single char: "r", "l", "q", "+", "-", etc.
/// - Uppercase (Shift): "G", "M", etc.
/// - Ctrl: "<C-r>", "<C-l>", etc.
/// - Shift: "<S-Tab>", "<S-m>", etc.
/// - Special keys: "<CR>", "<Enter>", "<Esc>", "<Tab>", "<Space>", "<Left>", "<Right>", "<Up>", "<Down>"
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();

    // Handle special notation <...>
    if s.starts_with('<') && s.ends_with('>') {
        let inner = &s[1..s.len() - 1];
        return parse_special_key(inner);
    }

    // Single character
    if s.chars().count() == 1 {
        let c = s.chars().next()?;
        // Uppercase letters are Shift+lowercase
        if c.is_ascii_uppercase() {
            return Some(KeyBinding::shift(KeyCode::Char(c)));
        }
        return Some(KeyBinding::simple(KeyCode::Char(c)));
    }

    None
}

/// Parse special key notation (content inside <...>)
fn parse_special_key(inner: &str) -> Option<KeyBinding> {
    // Handle modifiers: C- (Ctrl), S- (Shift)
    if let Some(rest) = inner.strip_prefix("C-") {
        let key = parse_key_name(rest)?;
        return Some(KeyBinding::ctrl(key));
    }

    if let Some(rest) = inner.strip_prefix("S-") {
        let key = parse_key_name(rest)?;
        return Some(KeyBinding::shift(key));
    }

    // Handle special key names without modifiers
    parse_key_name(inner).map(KeyBinding::simple)
}

/// Parse a key name (without modifiers)
fn parse_key_name(name: &str) -> Option<KeyCode> {
    match name.to_lowercase().as_str() {
        "cr" | "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "space" | "spc" => Some(KeyCode::Char(' ')),
        "bs" | "backspace" => Some(KeyCode::Backspace),
        "del" | "delete" => Some(KeyCode::Delete),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        _ => {
            // Single character after modifier (e.g., "r" in "<C-r>")
            if name.chars().count() == 1 {
                let c = name.chars().next()?;
                Some(KeyCode::Char(c.to_ascii_lowercase()))
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_keys() {
        assert_eq!(
            parse_key_binding("r"),
            Some(KeyBinding::simple(KeyCode::Char('r')))
        );
        assert_eq!(
            parse_key_binding("+"),
            Some(KeyBinding::simple(KeyCode::Char('+')))
        );
        assert_eq!(
            parse_key_binding("?"),
            Some(KeyBinding::simple(KeyCode::Char('?')))
        );
    }

    #[test]
    fn test_parse_uppercase_keys() {
        assert_eq!(
            parse_key_binding("M"),
            Some(KeyBinding::shift(KeyCode::Char('M')))
        );
    }

    #[test]
    fn test_parse_ctrl_keys() {
        assert_eq!(
            parse_key_binding("<C-r>"),
            Some(KeyBinding::ctrl(KeyCode::Char('r')))
        );
    }

    #[test]
    fn test_parse_special_keys() {
        assert_eq!(
            parse_key_binding("<Space>"),
            Some(KeyBinding::simple(KeyCode::Char(' ')))
        );
        assert_eq!(
            parse_key_binding("<Up>"),
            Some(KeyBinding::simple(KeyCode::Up))
        );
        assert_eq!(
            parse_key_binding("<Down>"),
            Some(KeyBinding::simple(KeyCode::Down))
        );
        assert_eq!(
            parse_key_binding("<S-Tab>"),
            Some(KeyBinding::shift(KeyCode::Tab))
        );
    }

    #[test]
    fn test_keymap_from_config() {
        let keymap = Keymap::default();

        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(keymap.get(&space), Some(&Action::TogglePlayPause));

        let reset = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(keymap.get(&reset), Some(&Action::ResetScroll));

        let quit = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keymap.get(&quit), Some(&Action::Quit));
    }

    #[test]
    fn test_shifted_plus_still_matches() {
        let keymap = Keymap::default();
        let plus = KeyEvent::new(KeyCode::Char('+'), KeyModifiers::SHIFT);
        assert_eq!(keymap.get(&plus), Some(&Action::SpeedUp));
        let equals = KeyEvent::new(KeyCode::Char('='), KeyModifiers::NONE);
        assert_eq!(keymap.get(&equals), Some(&Action::SpeedUp));
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let mut config = KeymapConfig::default();
        config.reset = "q".to_string();
        let keymap = Keymap::from_config(&config);

        // play_pause..toggle_mirror are added before quit; "q" stays bound
        // to the first action that claimed it.
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(keymap.get(&q), Some(&Action::ResetScroll));
    }
}
