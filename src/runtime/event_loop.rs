use std::io::Write;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{App, InputMode, Page};
use crate::config;
use crate::playback::PlaybackDevice;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// How long to wait for input: one visualizer frame, kept between 1ms and
/// 50ms so the loop never spins and device events still reach the player
/// bar promptly.
pub fn poll_timeout(settings: &config::Settings) -> Duration {
    let fps = u64::from(settings.visualizer.fps.max(1));
    Duration::from_millis(1000 / fps).clamp(Duration::from_millis(1), Duration::from_millis(50))
}

/// Main terminal event loop: applies device events, advances the visualizer,
/// draws and handles input. Returns `Ok(())` when quit is requested.
pub fn run<W: Write, D: PlaybackDevice>(
    terminal: &mut Terminal<CrosstermBackend<W>>,
    settings: &config::Settings,
    app: &mut App<D>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let timeout = poll_timeout(settings);
    loop {
        app.tick();

        terminal.draw(|f| ui::draw(f, app, settings))?;

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, state)? {
                    break;
                }
            }
        }
    }

    app.visualizer.unmount();
    app.player.pause();
    Ok(())
}

/// Apply one key press. Returns `Ok(true)` when the app should quit.
pub fn handle_key_event<D: PlaybackDevice>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<D>,
    state: &mut EventLoopState,
) -> Result<bool, Box<dyn std::error::Error>> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    app.status = None;

    if app.input_mode == InputMode::Editing {
        state.pending_gg = false;
        handle_editing_key(key, app);
        return Ok(false);
    }

    let controls = &settings.controls;
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            return Ok(true);
        }
        KeyCode::Char(c @ '1'..='6') => {
            state.pending_gg = false;
            if let Some(page) = c.to_digit(10).and_then(Page::from_number) {
                app.navigate(page);
            }
        }
        KeyCode::Tab => {
            state.pending_gg = false;
            app.navigate(app.page.next());
        }
        KeyCode::BackTab => {
            state.pending_gg = false;
            app.navigate(app.page.prev());
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.cursor_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.cursor_last();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.cursor_down();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.cursor_up();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            app.activate_selected();
        }
        KeyCode::Char('f') => {
            state.pending_gg = false;
            app.toggle_selected_favorite();
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            app.player.toggle_play_pause();
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            app.next_track();
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            app.previous_track();
        }
        KeyCode::Char('L') => {
            state.pending_gg = false;
            app.player.seek_by(controls.scrub_seconds as f64);
        }
        KeyCode::Char('H') => {
            state.pending_gg = false;
            app.player.seek_by(-(controls.scrub_seconds as f64));
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.pending_gg = false;
            let v = app.player.volume().saturating_add(controls.volume_step);
            app.player.change_volume(v);
        }
        KeyCode::Char('-') => {
            state.pending_gg = false;
            let v = app.player.volume().saturating_sub(controls.volume_step);
            app.player.change_volume(v);
        }
        KeyCode::Char('m') => {
            state.pending_gg = false;
            app.player.toggle_mute();
        }
        KeyCode::Char('e') => {
            state.pending_gg = false;
            app.start_editing();
        }
        KeyCode::Char('t') => {
            state.pending_gg = false;
            if app.page == Page::Profile {
                app.profile.toggle_tab();
            }
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    Ok(false)
}

fn handle_editing_key<D: PlaybackDevice>(key: KeyEvent, app: &mut App<D>) {
    match key.code {
        KeyCode::Esc => app.stop_editing(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.active_form() {
                form.focus_next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.active_form() {
                form.focus_prev();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.active_form() {
                form.pop_char();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.active_form() {
                form.push_char(c);
            }
        }
        other => debug!(?other, "key ignored while editing"),
    }
}
