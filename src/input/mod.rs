//! Keyboard input mapping for the terminal frontend.
//!
//! Single-press mapping only: a memory game has no held-key movement, so
//! there is no repeat handling here.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Difficulty;

/// Frontend-level actions. The main loop translates these into engine
/// operations or local UI state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    Flip,
    Hint,
    Restart,
    SelectDifficulty(Difficulty),
    CycleTheme,
    Resume,
    Discard,
    ToggleSfx,
    ToggleBgm,
    ShowHelp,
    ResetProgress,
}

pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

pub fn map_key(key: KeyEvent) -> Option<UiAction> {
    match key.code {
        KeyCode::Left => Some(UiAction::CursorLeft),
        KeyCode::Right => Some(UiAction::CursorRight),
        KeyCode::Up => Some(UiAction::CursorUp),
        KeyCode::Down => Some(UiAction::CursorDown),
        KeyCode::Char(' ') | KeyCode::Enter => Some(UiAction::Flip),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(UiAction::Hint),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(UiAction::Restart),
        KeyCode::Char('1') => Some(UiAction::SelectDifficulty(Difficulty::Easy)),
        KeyCode::Char('2') => Some(UiAction::SelectDifficulty(Difficulty::Normal)),
        KeyCode::Char('3') => Some(UiAction::SelectDifficulty(Difficulty::Hard)),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(UiAction::CycleTheme),
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(UiAction::Resume),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(UiAction::Discard),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(UiAction::ToggleSfx),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(UiAction::ToggleBgm),
        KeyCode::Char('?') => Some(UiAction::ShowHelp),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(UiAction::ResetProgress),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(key(KeyCode::Char('q'))));
        assert!(should_quit(key(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(key(KeyCode::Char('c'))));
    }

    #[test]
    fn test_core_bindings() {
        assert_eq!(map_key(key(KeyCode::Left)), Some(UiAction::CursorLeft));
        assert_eq!(map_key(key(KeyCode::Char(' '))), Some(UiAction::Flip));
        assert_eq!(map_key(key(KeyCode::Enter)), Some(UiAction::Flip));
        assert_eq!(map_key(key(KeyCode::Char('h'))), Some(UiAction::Hint));
        assert_eq!(
            map_key(key(KeyCode::Char('3'))),
            Some(UiAction::SelectDifficulty(Difficulty::Hard))
        );
        assert_eq!(map_key(key(KeyCode::Char('t'))), Some(UiAction::CycleTheme));
        assert_eq!(map_key(key(KeyCode::F(5))), None);
    }
}
