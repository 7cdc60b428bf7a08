use ratatui::style::Color;

/// Display palette for the prompter overlay
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg: Color,
    pub surface: Color,
    pub band_bg: Color,

    // Foreground colors
    pub text: Color,
    pub text_dim: Color,
    pub text_faint: Color,

    // Semantic colors
    pub accent: Color,
    pub border: Color,
    pub playing: Color,
    pub locked: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(0x10, 0x10, 0x14),
            surface: Color::Rgb(0x1c, 0x1c, 0x22),
            band_bg: Color::Rgb(0x2e, 0x2e, 0x38),
            text: Color::Rgb(0xf2, 0xf2, 0xf2),
            text_dim: Color::Rgb(0x9a, 0x9a, 0xa2),
            text_faint: Color::Rgb(0x4e, 0x4e, 0x58),
            accent: Color::Rgb(0xe8, 0xc5, 0x4a),
            border: Color::Rgb(0x8a, 0x8a, 0x94),
            playing: Color::Rgb(0x8f, 0xb8, 0x6c),
            locked: Color::Rgb(0xe7, 0x8a, 0x4e),
            error: Color::Rgb(0xea, 0x69, 0x62),
        }
    }
}

impl Theme {
    /// Backdrop color for the overlay, scaled by the configured opacity.
    /// A terminal has no real transparency, so the backdrop just darkens
    /// toward pure black as opacity drops.
    pub fn backdrop(&self, opacity: f64) -> Color {
        match self.bg {
            Color::Rgb(r, g, b) => Color::Rgb(
                scale_channel(r, opacity),
                scale_channel(g, opacity),
                scale_channel(b, opacity),
            ),
            other => other,
        }
    }
}

fn scale_channel(channel: u8, opacity: f64) -> u8 {
    (channel as f64 * opacity.clamp(0.0, 1.0)).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backdrop_scales_with_opacity() {
        let theme = Theme::default();
        assert_eq!(theme.backdrop(0.0), Color::Rgb(0, 0, 0));
        assert_eq!(theme.backdrop(1.0), theme.bg);
    }
}
