use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let state = app.engine.snapshot();
        let theme = &app.theme;

        let mode_str = match app.mode {
            Mode::Prompter => "PROMPTER",
            Mode::Editor => "EDITOR",
            Mode::Help => "HELP",
        };

        let play_str = if state.is_playing { "▶ playing" } else { "⏸ paused" };
        let progress = state
            .progress()
            .map(|p| format!("{}%", (p * 100.0).round() as u32))
            .unwrap_or_else(|| "--".to_string());

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {msg}")
        } else {
            let mut text = format!(
                " {} | {} | speed {:.1} | {}pt | {} ",
                mode_str, play_str, state.speed, state.font_size as u32, progress
            );
            if state.is_locked {
                text.push_str("| LOCKED ");
            }
            if state.is_mirrored {
                text.push_str("| MIRROR ");
            }
            text
        };

        let help_hint = " Space:play r:reset l:lock e:editor ?:help q:quit ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let status_style = if state.is_locked {
            Style::default().fg(theme.locked).bg(theme.surface)
        } else {
            Style::default().fg(theme.text).bg(theme.surface)
        };

        let line = Line::from(vec![
            Span::styled(status_text, status_style),
            Span::styled(
                " ".repeat(padding_len),
                Style::default().bg(theme.surface),
            ),
            Span::styled(
                help_hint,
                Style::default().fg(theme.text_dim).bg(theme.surface),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
