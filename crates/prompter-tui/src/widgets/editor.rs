use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{
    App, EditorFocus, Setting, EDITOR_SPEED_MAX, EDITOR_SPEED_MIN, FONT_SIZE_MAX, FONT_SIZE_MIN,
    OPACITY_MAX, OPACITY_MIN,
};

const VALUE_BAR_WIDTH: usize = 12;

pub struct EditorWidget;

impl EditorWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let state = app.engine.snapshot();
        let theme = &app.theme;

        frame.render_widget(
            Block::default().style(Style::default().bg(theme.bg)),
            area,
        );

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),                          // script text
                Constraint::Length(Setting::ALL.len() as u16 + 2), // settings grid
                Constraint::Length(6),                       // shortcuts reference
            ])
            .split(area);

        Self::render_script(frame, sections[0], app, &state.content);
        Self::render_settings(frame, sections[1], app, &state);
        Self::render_shortcuts(frame, sections[2], app);
    }

    fn render_script(frame: &mut Frame, area: Rect, app: &App, content: &str) {
        let theme = &app.theme;
        let focused = app.editor_focus == EditorFocus::Script;
        let border_style = if focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.border)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Script ");
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        // Keep the cursor line in view
        let row_offset = app
            .cursor
            .line
            .saturating_sub(inner.height.saturating_sub(1) as usize) as u16;

        let lines: Vec<Line> = content
            .split('\n')
            .map(|l| Line::styled(l.to_string(), Style::default().fg(theme.text)))
            .collect();
        frame.render_widget(
            Paragraph::new(lines).scroll((row_offset, 0)),
            inner,
        );

        if focused {
            let prefix: String = content
                .split('\n')
                .nth(app.cursor.line)
                .unwrap_or("")
                .chars()
                .take(app.cursor.col)
                .collect();
            let x = inner.x + (prefix.width() as u16).min(inner.width.saturating_sub(1));
            let y = inner.y + (app.cursor.line as u16).saturating_sub(row_offset);
            frame.set_cursor_position(Position::new(x, y));
        }
    }

    fn render_settings(
        frame: &mut Frame,
        area: Rect,
        app: &App,
        state: &prompter_core::ScrollState,
    ) {
        let theme = &app.theme;
        let focused = app.editor_focus == EditorFocus::Settings;
        let border_style = if focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.border)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Settings (Tab to focus, h/l to adjust) ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        for setting in Setting::ALL {
            let selected = focused && setting == app.selected_setting;
            let marker = if selected { "▸ " } else { "  " };
            let label_style = if selected {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };

            let (bar, value) = match setting {
                Setting::FontSize => (
                    value_bar(state.font_size, FONT_SIZE_MIN, FONT_SIZE_MAX),
                    format!("{}pt", state.font_size as u32),
                ),
                Setting::Speed => (
                    value_bar(state.speed, EDITOR_SPEED_MIN, EDITOR_SPEED_MAX),
                    format!("{:.1}", state.speed),
                ),
                Setting::Opacity => (
                    value_bar(state.opacity, OPACITY_MIN, OPACITY_MAX),
                    format!("{}%", (state.opacity * 100.0).round() as u32),
                ),
                Setting::Mirror => (
                    String::new(),
                    if state.is_mirrored { "On".into() } else { "Off".into() },
                ),
            };

            lines.push(Line::from(vec![
                Span::styled(format!("{marker}{:<12}", setting.label()), label_style),
                Span::styled(bar, Style::default().fg(theme.text_dim)),
                Span::styled(format!("  {value}"), Style::default().fg(theme.text)),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_shortcuts(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Shortcuts ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let hint = Style::default().fg(theme.text_dim);
        let lines = vec![
            Line::styled("Space: Play/Pause    r: Reset      l: Toggle Lock", hint),
            Line::styled("+/-: Change Speed    Up/Down: Scroll Manually", hint),
            Line::styled("m: Toggle Mirror     e: Open Editor    q: Quit", hint),
            Line::styled("Tab: Switch Focus    Esc: Back to Prompter", hint),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Slider-style bar for a numeric setting.
fn value_bar(value: f64, min: f64, max: f64) -> String {
    let fraction = ((value - min) / (max - min)).clamp(0.0, 1.0);
    let filled = (fraction * VALUE_BAR_WIDTH as f64).round() as usize;
    let mut bar = String::with_capacity(VALUE_BAR_WIDTH * 3);
    for i in 0..VALUE_BAR_WIDTH {
        bar.push(if i < filled { '█' } else { '░' });
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_bar_bounds() {
        assert_eq!(value_bar(0.1, 0.1, 1.0), "░".repeat(VALUE_BAR_WIDTH));
        assert_eq!(value_bar(1.0, 0.1, 1.0), "█".repeat(VALUE_BAR_WIDTH));
    }

    #[test]
    fn test_value_bar_midpoint() {
        let bar = value_bar(5.05, 0.1, 10.0);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), VALUE_BAR_WIDTH / 2);
    }
}
