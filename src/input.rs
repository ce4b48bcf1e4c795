// Copyright (c) 2026 rezky_nightky

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePause,
    ToggleFullscreen,
}

/// Maps a key event to what the frame loop should do. Only presses count.
pub fn key_action(key: &KeyEvent, screensaver: bool) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if screensaver {
        return Some(Action::Quit);
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::TogglePause),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Action::ToggleFullscreen),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn bindings() {
        assert_eq!(key_action(&press(KeyCode::Char('f')), false), Some(Action::ToggleFullscreen));
        assert_eq!(
            key_action(&KeyEvent::new(KeyCode::Char('F'), KeyModifiers::SHIFT), false),
            Some(Action::ToggleFullscreen)
        );
        assert_eq!(key_action(&press(KeyCode::Char(' ')), false), Some(Action::TogglePause));
        assert_eq!(key_action(&press(KeyCode::Char('q')), false), Some(Action::Quit));
        assert_eq!(key_action(&press(KeyCode::Esc), false), Some(Action::Quit));
        assert_eq!(
            key_action(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), false),
            Some(Action::Quit)
        );
    }

    #[test]
    fn unbound_keys_do_nothing() {
        assert_eq!(key_action(&press(KeyCode::Char('c')), false), None);
        assert_eq!(key_action(&press(KeyCode::Char('x')), false), None);
        assert_eq!(key_action(&press(KeyCode::Enter), false), None);
    }

    #[test]
    fn screensaver_quits_on_any_key() {
        assert_eq!(key_action(&press(KeyCode::Char('x')), true), Some(Action::Quit));
        assert_eq!(key_action(&press(KeyCode::Char(' ')), true), Some(Action::Quit));
    }

    #[test]
    fn repeat_and_release_are_ignored() {
        for kind in [KeyEventKind::Repeat, KeyEventKind::Release] {
            let key = KeyEvent::new_with_kind(KeyCode::Char('f'), KeyModifiers::NONE, kind);
            assert_eq!(key_action(&key, false), None);
            assert_eq!(key_action(&key, true), None);
        }
    }
}
