use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::layout::row_spacing;

pub struct PrompterWidget;

impl PrompterWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let state = app.engine.snapshot();
        let theme = &app.theme;

        // Backdrop, scaled by the configured opacity
        let backdrop = theme.backdrop(state.opacity);
        frame.render_widget(
            Block::default().style(Style::default().bg(backdrop)),
            area,
        );

        // Border only while interactive; locked mode is a bare overlay
        let inner = if state.is_locked {
            area
        } else {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border));
            let inner = block.inner(area);
            frame.render_widget(block, area);
            inner
        };

        if inner.width < 4 || inner.height == 0 {
            return;
        }

        let center = inner.height / 2;
        let band_half = (row_spacing(state.font_size) as u16) / 2;
        let offset = state.offset.round() as i64;

        // Focus band behind the reading line
        let band_top = center.saturating_sub(band_half);
        let band_height = (band_half * 2 + 1).min(inner.height - band_top);
        let band_area = Rect::new(inner.x, inner.y + band_top, inner.width, band_height);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.band_bg)),
            band_area,
        );

        // Rows translated so the row at `offset` sits on the center line
        let mut lines: Vec<Line> = Vec::with_capacity(inner.height as usize);
        for y in 0..inner.height {
            let row = offset + y as i64 - center as i64;
            let text = if row >= 0 && (row as usize) < app.layout.rows.len() {
                let row_text = &app.layout.rows[row as usize];
                if state.is_mirrored {
                    row_text.chars().rev().collect()
                } else {
                    row_text.clone()
                }
            } else {
                String::new()
            };

            let distance = (y as i64 - center as i64).unsigned_abs() as u16;
            let style = if distance <= band_half {
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
            } else if distance <= band_half + 4 {
                Style::default().fg(theme.text_dim)
            } else {
                Style::default().fg(theme.text_faint)
            };

            lines.push(Line::styled(text, style));
        }

        frame.render_widget(
            Paragraph::new(lines).centered(),
            inner,
        );

        // Focus carets at the reading line edges
        let caret_style = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
        let caret_y = inner.y + center;
        let buffer = frame.buffer_mut();
        buffer.set_string(inner.x, caret_y, ">", caret_style);
        buffer.set_string(inner.x + inner.width - 1, caret_y, "<", caret_style);
    }
}
