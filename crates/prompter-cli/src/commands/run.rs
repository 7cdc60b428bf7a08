use std::io;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, MouseEvent, MouseEventKind},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::warn;

use prompter_core::AppConfig;
use prompter_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    keymap::Keymap,
    widgets::{EditorWidget, HelpWidget, PrompterWidget, StatusBarWidget},
};

/// Rows per keyboard speed nudge (the editor slider has its own finer step)
const SPEED_KEY_STEP: f64 = 0.5;

pub async fn run(config: AppConfig) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);
    let tick_rate_ms = config.ui.tick_rate_ms;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle("Prompter")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config);
    let event_handler = EventHandler::new(tick_rate_ms);

    let result = run_loop(&mut terminal, &mut app, &event_handler, &keymap).await;

    // Persist content/speed/font/opacity even when the loop errored
    if let Err(e) = app.persist_settings() {
        warn!("Failed to save settings: {}", e);
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
    keymap: &Keymap,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: content + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            // Re-measure the script and report the extent before rendering
            // against it (border takes two columns when unlocked)
            app.ensure_layout(main_layout[0].width.saturating_sub(2));

            match app.mode {
                Mode::Prompter => PrompterWidget::render(frame, main_layout[0], app),
                Mode::Editor => EditorWidget::render(frame, main_layout[0], app),
                Mode::Help => {
                    PrompterWidget::render(frame, main_layout[0], app);
                    HelpWidget::render(frame, main_layout[0], app);
                }
            }
            StatusBarWidget::render(frame, main_layout[1], app);
        })?;

        // Poll at the playback frame rate while scrolling so the view keeps
        // up with the ticker, and at the idle rate otherwise
        let event = if app.engine.is_playing() {
            event_handler.next_frame()?
        } else {
            event_handler.next()?
        };

        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    handle_action(app, action);
                }
                AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
                AppEvent::Resize(_, _) => app.mark_layout_dirty(),
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_action(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::TogglePlayPause => {
            app.clear_status();
            app.engine.toggle_play_pause();
        }
        Action::ResetScroll => app.engine.reset_scroll(),
        Action::ToggleLock => {
            app.engine.toggle_lock();
            if app.engine.is_locked() {
                app.set_status("Locked: display only, keys still work (l to unlock)");
            } else {
                app.clear_status();
            }
        }
        Action::ToggleMirror => app.engine.toggle_mirror(),
        Action::SpeedUp => app.engine.update_speed(SPEED_KEY_STEP),
        Action::SpeedDown => app.engine.update_speed(-SPEED_KEY_STEP),
        Action::ScrollBack => app.engine.manual_scroll(-app.config.ui.manual_scroll_step),
        Action::ScrollForward => app.engine.manual_scroll(app.config.ui.manual_scroll_step),
        Action::OpenEditor => app.open_editor(),
        Action::Help => app.mode = Mode::Help,
        Action::ExitMode => match app.mode {
            Mode::Editor => app.close_editor(),
            Mode::Help => app.mode = Mode::Prompter,
            Mode::Prompter => {}
        },
        Action::InputChar(c) => app.insert_char(c),
        Action::NewLine => app.insert_newline(),
        Action::Backspace => app.backspace(),
        Action::CursorLeft => app.cursor_left(),
        Action::CursorRight => app.cursor_right(),
        Action::CursorUp => app.cursor_up(),
        Action::CursorDown => app.cursor_down(),
        Action::CursorHome => app.cursor_home(),
        Action::CursorEnd => app.cursor_end(),
        Action::SwitchEditorFocus => app.switch_editor_focus(),
        Action::SettingPrev => app.select_prev_setting(),
        Action::SettingNext => app.select_next_setting(),
        Action::SettingDecrease => app.adjust_selected_setting(-1.0),
        Action::SettingIncrease => app.adjust_selected_setting(1.0),
        Action::None => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    // Wheel input only drives the prompter view, and only while unlocked
    if app.mode != Mode::Prompter || app.engine.is_locked() {
        return;
    }
    let step = app.config.ui.wheel_scroll_step;
    match mouse.kind {
        // A downward swipe rewinds; the engine inverts the sign
        MouseEventKind::ScrollDown => app.engine.wheel_scroll(step),
        MouseEventKind::ScrollUp => app.engine.wheel_scroll(-step),
        _ => {}
    }
}
