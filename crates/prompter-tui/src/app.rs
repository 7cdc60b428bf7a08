use prompter_core::{AppConfig, ScrollEngine};

use crate::layout::{measure, ScriptLayout};
use crate::theme::Theme;

// Setting ranges enforced by the shell. The engine only guards its own
// speed invariant; font, opacity, and the editor's narrower speed range
// are display affordances and belong here.
pub const FONT_SIZE_MIN: f64 = 20.0;
pub const FONT_SIZE_MAX: f64 = 120.0;
pub const FONT_SIZE_STEP: f64 = 5.0;
pub const OPACITY_MIN: f64 = 0.1;
pub const OPACITY_MAX: f64 = 1.0;
pub const OPACITY_STEP: f64 = 0.05;
pub const EDITOR_SPEED_MIN: f64 = 0.1;
pub const EDITOR_SPEED_MAX: f64 = 10.0;
pub const EDITOR_SPEED_STEP: f64 = 0.5;

/// Top-level view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The scrolling overlay
    Prompter,
    /// Script and settings editor
    Editor,
    /// Help overlay
    Help,
}

/// Which half of the editor has input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFocus {
    Script,
    Settings,
}

/// Rows of the editor settings grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    FontSize,
    Speed,
    Opacity,
    Mirror,
}

impl Setting {
    pub const ALL: [Setting; 4] = [
        Setting::FontSize,
        Setting::Speed,
        Setting::Opacity,
        Setting::Mirror,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Setting::FontSize => "Font Size",
            Setting::Speed => "Speed",
            Setting::Opacity => "Opacity",
            Setting::Mirror => "Mirror Mode",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

/// Text cursor in the script editor, as (line, column) in characters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorCursor {
    pub line: usize,
    pub col: usize,
}

/// Application state
pub struct App {
    /// The scroll engine; single source of truth for playback
    pub engine: ScrollEngine,
    /// Application configuration
    pub config: AppConfig,
    /// Display palette
    pub theme: Theme,
    /// Current view mode
    pub mode: Mode,
    /// Focused half of the editor
    pub editor_focus: EditorFocus,
    /// Selected row of the settings grid
    pub selected_setting: Setting,
    /// Script editor cursor
    pub cursor: EditorCursor,
    /// Laid-out script for the current width/font
    pub layout: ScriptLayout,
    /// Status message
    pub status_message: Option<String>,
    /// Whether the app should quit
    pub should_quit: bool,
    layout_dirty: bool,
    last_layout_width: u16,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let engine = ScrollEngine::from_config(&config);
        Self {
            engine,
            config,
            theme: Theme::default(),
            mode: Mode::Prompter,
            editor_focus: EditorFocus::Script,
            selected_setting: Setting::FontSize,
            cursor: EditorCursor::default(),
            layout: ScriptLayout::default(),
            status_message: None,
            should_quit: false,
            layout_dirty: true,
            last_layout_width: 0,
        }
    }

    /// Re-measure the script when anything layout-affecting changed, and
    /// report the new extent to the engine.
    pub fn ensure_layout(&mut self, width: u16) {
        if !self.layout_dirty && width == self.last_layout_width {
            return;
        }
        let state = self.engine.snapshot();
        self.layout = measure(&state.content, width, state.font_size);
        self.engine.set_content_extent(self.layout.extent());
        self.layout_dirty = false;
        self.last_layout_width = width;
    }

    pub fn mark_layout_dirty(&mut self) {
        self.layout_dirty = true;
    }

    pub fn open_editor(&mut self) {
        self.mode = Mode::Editor;
        self.editor_focus = EditorFocus::Script;
        self.clamp_cursor();
    }

    pub fn close_editor(&mut self) {
        self.mode = Mode::Prompter;
    }

    pub fn switch_editor_focus(&mut self) {
        self.editor_focus = match self.editor_focus {
            EditorFocus::Script => EditorFocus::Settings,
            EditorFocus::Settings => EditorFocus::Script,
        };
    }

    pub fn select_prev_setting(&mut self) {
        let idx = self.selected_setting.index();
        self.selected_setting = Setting::ALL[idx.saturating_sub(1)];
    }

    pub fn select_next_setting(&mut self) {
        let idx = (self.selected_setting.index() + 1).min(Setting::ALL.len() - 1);
        self.selected_setting = Setting::ALL[idx];
    }

    /// Adjust the selected setting one step in the given direction,
    /// enforcing the shell ranges.
    pub fn adjust_selected_setting(&mut self, direction: f64) {
        let state = self.engine.snapshot();
        match self.selected_setting {
            Setting::FontSize => {
                let next = (state.font_size + direction * FONT_SIZE_STEP)
                    .clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
                self.engine.set_font_size(next);
                self.layout_dirty = true;
            }
            Setting::Speed => {
                let next = (state.speed + direction * EDITOR_SPEED_STEP)
                    .clamp(EDITOR_SPEED_MIN, EDITOR_SPEED_MAX);
                self.engine.set_speed(next);
            }
            Setting::Opacity => {
                let next =
                    (state.opacity + direction * OPACITY_STEP).clamp(OPACITY_MIN, OPACITY_MAX);
                self.engine.set_opacity(next);
            }
            Setting::Mirror => self.engine.toggle_mirror(),
        }
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let mut content = self.engine.snapshot().content;
        let idx = byte_index(&content, self.cursor.line, self.cursor.col);
        content.insert(idx, c);
        self.engine.set_content(content);
        self.cursor.col += 1;
        self.layout_dirty = true;
    }

    /// Split the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let mut content = self.engine.snapshot().content;
        let idx = byte_index(&content, self.cursor.line, self.cursor.col);
        content.insert(idx, '\n');
        self.engine.set_content(content);
        self.cursor.line += 1;
        self.cursor.col = 0;
        self.layout_dirty = true;
    }

    /// Delete the character before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        let mut content = self.engine.snapshot().content;
        if self.cursor.col > 0 {
            let idx = byte_index(&content, self.cursor.line, self.cursor.col - 1);
            content.remove(idx);
            self.cursor.col -= 1;
        } else if self.cursor.line > 0 {
            let prev_chars = line_chars(&content, self.cursor.line - 1);
            let idx = byte_index(&content, self.cursor.line - 1, prev_chars);
            content.remove(idx);
            self.cursor.line -= 1;
            self.cursor.col = prev_chars;
        } else {
            return;
        }
        self.engine.set_content(content);
        self.layout_dirty = true;
    }

    pub fn cursor_left(&mut self) {
        let content = self.engine.snapshot().content;
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.col = line_chars(&content, self.cursor.line);
        }
    }

    pub fn cursor_right(&mut self) {
        let content = self.engine.snapshot().content;
        if self.cursor.col < line_chars(&content, self.cursor.line) {
            self.cursor.col += 1;
        } else if self.cursor.line + 1 < line_count(&content) {
            self.cursor.line += 1;
            self.cursor.col = 0;
        }
    }

    pub fn cursor_up(&mut self) {
        let content = self.engine.snapshot().content;
        self.cursor.line = self.cursor.line.saturating_sub(1);
        self.cursor.col = self.cursor.col.min(line_chars(&content, self.cursor.line));
    }

    pub fn cursor_down(&mut self) {
        let content = self.engine.snapshot().content;
        if self.cursor.line + 1 < line_count(&content) {
            self.cursor.line += 1;
        }
        self.cursor.col = self.cursor.col.min(line_chars(&content, self.cursor.line));
    }

    pub fn cursor_home(&mut self) {
        self.cursor.col = 0;
    }

    pub fn cursor_end(&mut self) {
        let content = self.engine.snapshot().content;
        self.cursor.col = line_chars(&content, self.cursor.line);
    }

    fn clamp_cursor(&mut self) {
        let content = self.engine.snapshot().content;
        self.cursor.line = self.cursor.line.min(line_count(&content) - 1);
        self.cursor.col = self.cursor.col.min(line_chars(&content, self.cursor.line));
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Write the persisted settings back to the config file. Session state
    /// (offset, playing, locked, mirrored) is deliberately not saved.
    pub fn persist_settings(&mut self) -> prompter_core::Result<()> {
        let state = self.engine.snapshot();
        self.config.prompter.script_content = state.content;
        self.config.prompter.scroll_speed = state.speed;
        self.config.prompter.font_size = state.font_size;
        self.config.prompter.window_opacity = state.opacity;
        self.config.save()
    }
}

/// Number of lines in the editor's view of the content; an empty buffer
/// still has one (empty) line.
fn line_count(content: &str) -> usize {
    content.split('\n').count()
}

/// Character length of the given line.
fn line_chars(content: &str, line: usize) -> usize {
    content
        .split('\n')
        .nth(line)
        .map(|l| l.chars().count())
        .unwrap_or(0)
}

/// Byte offset of (line, col) into the content, clamping col to the line.
fn byte_index(content: &str, line: usize, col: usize) -> usize {
    let mut offset = 0;
    for (i, text) in content.split('\n').enumerate() {
        if i == line {
            return offset
                + text
                    .char_indices()
                    .nth(col)
                    .map(|(idx, _)| idx)
                    .unwrap_or(text.len());
        }
        offset += text.len() + 1;
    }
    content.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_content(content: &str) -> App {
        let mut config = AppConfig::default();
        config.prompter.script_content = content.to_string();
        App::new(config)
    }

    #[test]
    fn test_byte_index() {
        let content = "ab\ncde";
        assert_eq!(byte_index(content, 0, 0), 0);
        assert_eq!(byte_index(content, 0, 2), 2);
        assert_eq!(byte_index(content, 1, 0), 3);
        assert_eq!(byte_index(content, 1, 3), 6);
        // Column past the line end clamps to it
        assert_eq!(byte_index(content, 1, 99), 6);
    }

    #[test]
    fn test_byte_index_multibyte() {
        let content = "héllo\nwörld";
        assert_eq!(byte_index(content, 0, 1), 1);
        assert_eq!(byte_index(content, 0, 2), 3);
        assert_eq!(byte_index(content, 1, 2), "héllo\nwö".len());
    }

    #[test]
    fn test_insert_and_newline() {
        let mut app = app_with_content("hi");
        app.open_editor();
        app.cursor_end();
        app.insert_char('!');
        app.insert_newline();
        app.insert_char('x');
        assert_eq!(app.engine.snapshot().content, "hi!\nx");
        assert_eq!(app.cursor, EditorCursor { line: 1, col: 1 });
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut app = app_with_content("ab\ncd");
        app.open_editor();
        app.cursor.line = 1;
        app.cursor.col = 0;
        app.backspace();
        assert_eq!(app.engine.snapshot().content, "abcd");
        assert_eq!(app.cursor, EditorCursor { line: 0, col: 2 });
    }

    #[test]
    fn test_backspace_at_origin_is_noop() {
        let mut app = app_with_content("ab");
        app.open_editor();
        app.backspace();
        assert_eq!(app.engine.snapshot().content, "ab");
    }

    #[test]
    fn test_cursor_moves_clamp_to_line_ends() {
        let mut app = app_with_content("long line\nx");
        app.open_editor();
        app.cursor_end();
        assert_eq!(app.cursor.col, 9);
        app.cursor_down();
        assert_eq!(app.cursor, EditorCursor { line: 1, col: 1 });
        app.cursor_right();
        assert_eq!(app.cursor, EditorCursor { line: 1, col: 1 });
        app.cursor_left();
        app.cursor_left();
        assert_eq!(app.cursor, EditorCursor { line: 0, col: 9 });
    }

    #[test]
    fn test_content_edit_keeps_offset() {
        let mut app = app_with_content("some text");
        app.engine.set_content_extent(100.0);
        app.engine.manual_scroll(40.0);
        app.open_editor();
        app.insert_char('a');
        assert_eq!(app.engine.snapshot().offset, 40.0);
    }

    #[test]
    fn test_font_size_shell_range() {
        let mut app = app_with_content("text");
        app.selected_setting = Setting::FontSize;
        for _ in 0..100 {
            app.adjust_selected_setting(1.0);
        }
        assert_eq!(app.engine.snapshot().font_size, FONT_SIZE_MAX);
        for _ in 0..100 {
            app.adjust_selected_setting(-1.0);
        }
        assert_eq!(app.engine.snapshot().font_size, FONT_SIZE_MIN);
    }

    #[test]
    fn test_editor_speed_range_is_narrower_than_engine() {
        let mut app = app_with_content("text");
        app.selected_setting = Setting::Speed;
        for _ in 0..100 {
            app.adjust_selected_setting(1.0);
        }
        // The editor affordance stops at 10 even though the engine itself
        // accepts up to 20 through update_speed.
        assert_eq!(app.engine.snapshot().speed, EDITOR_SPEED_MAX);
        app.engine.update_speed(5.0);
        assert_eq!(app.engine.snapshot().speed, 15.0);
    }

    #[test]
    fn test_opacity_shell_range() {
        let mut app = app_with_content("text");
        app.selected_setting = Setting::Opacity;
        for _ in 0..100 {
            app.adjust_selected_setting(-1.0);
        }
        assert!((app.engine.snapshot().opacity - OPACITY_MIN).abs() < 1e-9);
    }

    #[test]
    fn test_mirror_toggle() {
        let mut app = app_with_content("text");
        app.selected_setting = Setting::Mirror;
        app.adjust_selected_setting(1.0);
        assert!(app.engine.snapshot().is_mirrored);
        app.adjust_selected_setting(-1.0);
        assert!(!app.engine.snapshot().is_mirrored);
    }

    #[test]
    fn test_ensure_layout_reports_extent() {
        let mut app = app_with_content("one\ntwo\nthree");
        app.ensure_layout(80);
        let extent = app.engine.snapshot().content_extent;
        assert!(extent > 0.0);

        // Unchanged width: no re-measure needed, extent stable
        app.ensure_layout(80);
        assert_eq!(app.engine.snapshot().content_extent, extent);

        // Narrower viewport wraps to more rows
        app.ensure_layout(20);
        assert!(app.engine.snapshot().content_extent >= extent);
    }
}
