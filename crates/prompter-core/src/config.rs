use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::script::Script;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub prompter: PrompterConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            prompter: PrompterConfig::default(),
            ui: UiConfig::default(),
            keymap: KeymapConfig::default(),
        }
    }
}

/// Settings that survive restarts: the active script and the numeric display
/// settings. Session state (offset, playing, locked, mirrored, extent) is
/// never written here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrompterConfig {
    /// Title of the active script
    #[serde(default = "default_script_title")]
    pub script_title: String,
    /// Full text of the active script
    #[serde(default = "default_script_content")]
    pub script_content: String,
    /// Rows scrolled per tick during playback
    #[serde(default = "default_scroll_speed")]
    pub scroll_speed: f64,
    /// Display font size in points
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Overlay background opacity (0.1-1.0)
    #[serde(default = "default_window_opacity")]
    pub window_opacity: f64,
}

impl Default for PrompterConfig {
    fn default() -> Self {
        Self {
            script_title: default_script_title(),
            script_content: default_script_content(),
            scroll_speed: default_scroll_speed(),
            font_size: default_font_size(),
            window_opacity: default_window_opacity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds (playback uses its own frame rate)
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Rows moved per keyboard scroll nudge
    #[serde(default = "default_manual_scroll_step")]
    pub manual_scroll_step: f64,
    /// Rows moved per wheel/trackpad event
    #[serde(default = "default_wheel_scroll_step")]
    pub wheel_scroll_step: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            manual_scroll_step: default_manual_scroll_step(),
            wheel_scroll_step: default_wheel_scroll_step(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "r", "<C-r>" (Ctrl+r), "<Space>", "<Up>", "<Down>", "<Esc>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Toggle play/pause
    #[serde(default = "default_key_play_pause")]
    pub play_pause: String,
    /// Reset scroll to the top
    #[serde(default = "default_key_reset")]
    pub reset: String,
    /// Toggle locked (display-only) mode
    #[serde(default = "default_key_toggle_lock")]
    pub toggle_lock: String,
    /// Toggle mirrored rendering
    #[serde(default = "default_key_toggle_mirror")]
    pub toggle_mirror: String,
    /// Increase scroll speed
    #[serde(default = "default_key_speed_up")]
    pub speed_up: String,
    /// Decrease scroll speed
    #[serde(default = "default_key_speed_down")]
    pub speed_down: String,
    /// Manual scroll back toward the top
    #[serde(default = "default_key_scroll_back")]
    pub scroll_back: String,
    /// Manual scroll forward toward the end
    #[serde(default = "default_key_scroll_forward")]
    pub scroll_forward: String,
    /// Open the script editor
    #[serde(default = "default_key_open_editor")]
    pub open_editor: String,
    /// Show the help overlay
    #[serde(default = "default_key_help")]
    pub help: String,
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            play_pause: default_key_play_pause(),
            reset: default_key_reset(),
            toggle_lock: default_key_toggle_lock(),
            toggle_mirror: default_key_toggle_mirror(),
            speed_up: default_key_speed_up(),
            speed_down: default_key_speed_down(),
            scroll_back: default_key_scroll_back(),
            scroll_forward: default_key_scroll_forward(),
            open_editor: default_key_open_editor(),
            help: default_key_help(),
            quit: default_key_quit(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_play_pause() -> String { "<Space>".to_string() }
fn default_key_reset() -> String { "r".to_string() }
fn default_key_toggle_lock() -> String { "l".to_string() }
fn default_key_toggle_mirror() -> String { "m".to_string() }
fn default_key_speed_up() -> String { "+".to_string() }
fn default_key_speed_down() -> String { "-".to_string() }
fn default_key_scroll_back() -> String { "<Up>".to_string() }
fn default_key_scroll_forward() -> String { "<Down>".to_string() }
fn default_key_open_editor() -> String { "e".to_string() }
fn default_key_help() -> String { "?".to_string() }
fn default_key_quit() -> String { "q".to_string() }

fn default_script_title() -> String {
    Script::welcome().title
}

fn default_script_content() -> String {
    Script::welcome().content
}

fn default_scroll_speed() -> f64 {
    2.0
}

fn default_font_size() -> f64 {
    45.0
}

fn default_window_opacity() -> f64 {
    0.8
}

fn default_tick_rate() -> u64 {
    100
}

fn default_manual_scroll_step() -> f64 {
    20.0
}

fn default_wheel_scroll_step() -> f64 {
    3.0
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/prompter/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("prompter")
            .join("config.toml")
    }

    /// Get the script library directory
    pub fn scripts_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("prompter")
            .join("scripts")
    }

    /// Copy a script into the persisted active slot.
    pub fn set_active_script(&mut self, script: &Script) {
        self.prompter.script_title = script.title.clone();
        self.prompter.script_content = script.content.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_persisted_settings() {
        let config = AppConfig::default();
        assert_eq!(config.prompter.scroll_speed, 2.0);
        assert_eq!(config.prompter.font_size, 45.0);
        assert_eq!(config.prompter.window_opacity, 0.8);
        assert!(!config.prompter.script_content.is_empty());
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [prompter]
            scroll_speed = 4.5
            "#,
        )
        .unwrap();
        assert_eq!(config.prompter.scroll_speed, 4.5);
        assert_eq!(config.prompter.font_size, 45.0);
        assert_eq!(config.keymap.play_pause, "<Space>");
    }

    #[test]
    fn test_roundtrip() {
        let mut config = AppConfig::default();
        config.prompter.script_content = "line one\nline two".to_string();
        config.prompter.window_opacity = 0.5;
        config.keymap.quit = "<C-q>".to_string();

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.prompter.script_content, "line one\nline two");
        assert_eq!(parsed.prompter.window_opacity, 0.5);
        assert_eq!(parsed.keymap.quit, "<C-q>");
    }
}
