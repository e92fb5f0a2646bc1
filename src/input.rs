//! Key events to game actions
//!
//! Every key press maps to at most one action. The terminal's own key repeat
//! drives held movement keys.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub hard_drop: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub start: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode. Unknown names yield None.
    fn parse_key(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => {
                        tracing::warn!("Ignoring unknown key name in settings: {:?}", s);
                        return None;
                    }
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter().filter_map(|s| Self::parse_key(s)).collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            soft_drop: Self::parse_keys(&settings.keys.soft_drop),
            hard_drop: Self::parse_keys(&settings.keys.hard_drop),
            rotate: Self::parse_keys(&settings.keys.rotate),
            start: Self::parse_keys(&settings.keys.start),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }

    /// Find the action bound to a key
    fn action_for(&self, code: KeyCode) -> Option<Action> {
        let table = [
            (&self.move_left, Action::MoveLeft),
            (&self.move_right, Action::MoveRight),
            (&self.soft_drop, Action::SoftDrop),
            (&self.hard_drop, Action::HardDrop),
            (&self.rotate, Action::Rotate),
            (&self.start, Action::Start),
            (&self.quit, Action::Quit),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.contains(&code))
            .map(|(_, action)| action)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Input handler
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            bindings: KeyBindings::from_settings(settings),
        }
    }

    /// Map a key event to an action. Releases and unbound keys give None.
    pub fn key_down(&self, key: KeyEvent) -> Option<Action> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        self.bindings.action_for(normalize_key(key.code))
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let input = InputHandler::default();
        assert_eq!(input.key_down(press(KeyCode::Left)), Some(Action::MoveLeft));
        assert_eq!(input.key_down(press(KeyCode::Right)), Some(Action::MoveRight));
        assert_eq!(input.key_down(press(KeyCode::Down)), Some(Action::SoftDrop));
        assert_eq!(input.key_down(press(KeyCode::Up)), Some(Action::Rotate));
        assert_eq!(input.key_down(press(KeyCode::Char(' '))), Some(Action::HardDrop));
        assert_eq!(input.key_down(press(KeyCode::Enter)), Some(Action::Start));
        assert_eq!(input.key_down(press(KeyCode::Esc)), Some(Action::Quit));
    }

    #[test]
    fn test_unbound_key_ignored() {
        let input = InputHandler::default();
        assert_eq!(input.key_down(press(KeyCode::Char('m'))), None);
        assert_eq!(input.key_down(press(KeyCode::F(5))), None);
    }

    #[test]
    fn test_uppercase_matches() {
        let input = InputHandler::default();
        assert_eq!(input.key_down(press(KeyCode::Char('Q'))), Some(Action::Quit));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let input = InputHandler::default();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input.key_down(key), Some(Action::Quit));
    }

    #[test]
    fn test_release_ignored() {
        let input = InputHandler::default();
        let key = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(input.key_down(key), None);
    }

    #[test]
    fn test_custom_bindings() {
        let mut settings = Settings::default();
        settings.keys.rotate = vec!["X".to_string(), "bogus".to_string()];
        let input = InputHandler::from_settings(&settings);
        assert_eq!(input.key_down(press(KeyCode::Char('x'))), Some(Action::Rotate));
        assert_eq!(input.key_down(press(KeyCode::Up)), None);
    }
}
