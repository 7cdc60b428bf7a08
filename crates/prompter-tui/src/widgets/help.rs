use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

pub struct HelpWidget;

impl HelpWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let popup = centered_rect(area, 56, 14);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(" Help ")
            .style(Style::default().bg(theme.surface));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let key = Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD);
        let text = Style::default().fg(theme.text);
        let entry = |k: &'static str, desc: &'static str| {
            Line::from(vec![Span::styled(k, key), Span::styled(desc, text)])
        };

        let lines = vec![
            entry("Space     ", "Play / pause"),
            entry("r         ", "Reset to the top"),
            entry("Up / Down ", "Scroll manually"),
            entry("+ / -     ", "Speed up / down"),
            entry("l         ", "Lock (display-only mode)"),
            entry("m         ", "Mirror the text"),
            entry("e         ", "Open the script editor"),
            entry("Wheel     ", "Scroll while unlocked"),
            entry("q         ", "Quit"),
            Line::default(),
            Line::styled("Press any key to close", Style::default().fg(theme.text_dim)),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Fixed-size popup rect centered in `area`
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
