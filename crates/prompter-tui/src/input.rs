use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, EditorFocus, Mode};
use crate::keymap::Keymap;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    TogglePlayPause,
    ResetScroll,
    ToggleLock,
    ToggleMirror,
    SpeedUp,
    SpeedDown,
    ScrollBack,    // toward the top of the script
    ScrollForward, // toward the end of the script
    OpenEditor,
    Help,
    ExitMode,
    // Editor: script text editing
    InputChar(char),
    NewLine,
    Backspace,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
    // Editor: settings grid
    SwitchEditorFocus,
    SettingPrev,
    SettingNext,
    SettingDecrease,
    SettingIncrease,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    // Ctrl+C always quits, in every mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match app.mode {
        Mode::Help => {
            // Any key exits help
            Action::ExitMode
        }
        Mode::Editor => handle_editor_mode(key, app),
        Mode::Prompter => keymap.get(&key).cloned().unwrap_or(Action::None),
    }
}

/// Handle key events in the editor
fn handle_editor_mode(key: KeyEvent, app: &App) -> Action {
    // Mode-level keys first
    match key.code {
        KeyCode::Esc => return Action::ExitMode,
        KeyCode::Tab => return Action::SwitchEditorFocus,
        _ => {}
    }

    match app.editor_focus {
        EditorFocus::Script => handle_script_editing(key),
        EditorFocus::Settings => handle_settings_grid(key),
    }
}

/// Free text editing in the script area
fn handle_script_editing(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::NewLine,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Up => Action::CursorUp,
        KeyCode::Down => Action::CursorDown,
        KeyCode::Home => Action::CursorHome,
        KeyCode::End => Action::CursorEnd,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Action::InputChar(c)
        }
        _ => Action::None,
    }
}

/// Row selection and value adjustment in the settings grid
fn handle_settings_grid(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::SettingPrev,
        KeyCode::Down | KeyCode::Char('j') => Action::SettingNext,
        KeyCode::Left | KeyCode::Char('h') => Action::SettingDecrease,
        KeyCode::Right | KeyCode::Char('l') => Action::SettingIncrease,
        // Enter/Space toggle boolean rows, nudge the rest up
        KeyCode::Enter | KeyCode::Char(' ') => Action::SettingIncrease,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompter_core::AppConfig;

    fn app() -> App {
        App::new(AppConfig::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_prompter_mode_uses_keymap() {
        let app = app();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char(' ')), &app, &keymap),
            Action::TogglePlayPause
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Up), &app, &keymap),
            Action::ScrollBack
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('x')), &app, &keymap),
            Action::None
        );
    }

    #[test]
    fn test_editor_script_focus_takes_text() {
        let mut app = app();
        app.open_editor();
        let keymap = Keymap::default();

        // 'q' is quit in prompter mode but plain text here
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q')), &app, &keymap),
            Action::InputChar('q')
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Enter), &app, &keymap),
            Action::NewLine
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Esc), &app, &keymap),
            Action::ExitMode
        );
    }

    #[test]
    fn test_editor_settings_focus_navigates() {
        let mut app = app();
        app.open_editor();
        app.switch_editor_focus();
        let keymap = Keymap::default();

        assert_eq!(
            handle_key_event(key(KeyCode::Char('j')), &app, &keymap),
            Action::SettingNext
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('h')), &app, &keymap),
            Action::SettingDecrease
        );
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut app = app();
        app.open_editor();
        let keymap = Keymap::default();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, &app, &keymap), Action::Quit);
    }

    #[test]
    fn test_help_mode_exits_on_any_key() {
        let mut app = app();
        app.mode = Mode::Help;
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('z')), &app, &keymap),
            Action::ExitMode
        );
    }
}
