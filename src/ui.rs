//! UI rendering for the terminal user interface.
//!
//! The screen is a sidebar with the page menu, the active page, the
//! persistent player bar and a controls footer. Page bodies live in
//! `ui::pages`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, InputMode, Page};
use crate::catalog::Track;
use crate::config::{ControlsSettings, Settings};
use crate::playback::PlaybackDevice;

mod pages;


pub(crate) const ACCENT: Color = Color::Magenta;
pub(crate) const MUTED: Color = Color::DarkGray;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("1-6/tab", "pages");
    map.insert("j/k", "up/down");
    map.insert("enter", "select track");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next track");
    // H/L and +/- are filled from config.
    map.insert("f", "favorite");
    map.insert("m", "mute");
    map.insert("e", "edit form");
    map.insert("t", "profile tab");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating configured steps.
fn controls_text(controls: &ControlsSettings) -> String {
    let order = [
        "1-6/tab", "j/k", "enter", "space/p", "h/l", "H/L", "+/-", "m", "f", "e", "t", "q",
    ];
    order
        .iter()
        .filter_map(|k| match *k {
            "H/L" => Some(format!("[H/L] seek -/+{}s", controls.scrub_seconds)),
            "+/-" => Some(format!("[+/-] volume ±{}", controls.volume_step)),
            _ => CONTROLS_MAP.get(k).map(|v| format!("[{}] {}", k, v)),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Help shown while a form is being edited.
const EDITING_HELP: &str = "[tab/shift-tab] next/prev field | [enter] submit | [esc] stop editing";

/// Format seconds as `MM:SS`. Negative or non-finite input shows `00:00`.
pub(crate) fn format_mmss(secs: f64) -> String {
    let secs = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Duration the player bar shows: the device's once known, otherwise the
/// catalog value of the current track.
pub(crate) fn display_duration(reported: f64, track: Option<&Track>) -> f64 {
    if reported > 0.0 {
        reported
    } else {
        track.map_or(0.0, |t| f64::from(t.duration))
    }
}

/// Ten-step meter for an output gain in `[0.0, 1.0]`.
fn volume_meter(gain: f32) -> String {
    let filled = (gain.clamp(0.0, 1.0) * 10.0).round() as usize;
    format!("{}{}", "▮".repeat(filled), "▯".repeat(10 - filled))
}

fn progress_ratio(elapsed: f64, total: f64) -> f64 {
    if total > 0.0 {
        (elapsed / total).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn left_padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into `frame` using `app` state and settings.
pub fn draw<D: PlaybackDevice>(frame: &mut Frame, app: &App<D>, settings: &Settings) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(1)])
        .split(rows[0]);

    draw_sidebar(frame, app, &settings.ui.app_title, body[0]);
    pages::draw_page(frame, app, body[1]);
    draw_player_bar(frame, app, rows[1]);

    let footer_text = match app.input_mode {
        InputMode::Editing => EDITING_HELP.to_string(),
        InputMode::Normal => controls_text(&settings.controls),
    };
    let footer = Paragraph::new(footer_text)
        .block(left_padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, rows[2]);
}

fn draw_sidebar<D: PlaybackDevice>(frame: &mut Frame, app: &App<D>, title: &str, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(4)])
        .split(area);

    let items: Vec<ListItem> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            if p == Page::Favorites && !app.favorites.is_empty() {
                ListItem::new(format!("{} {} ({})", i + 1, p.label(), app.favorites.len()))
            } else {
                ListItem::new(format!("{} {}", i + 1, p.label()))
            }
        })
        .collect();
    let menu = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title))
                .title_alignment(Alignment::Center),
        )
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(app.page.index()));
    frame.render_stateful_widget(menu, parts[0], &mut state);

    let user = Paragraph::new(vec![
        Line::from(app.profile.name.as_str()).bold(),
        Line::from(format!("{} plan", app.profile.plan)).fg(MUTED),
    ])
    .block(left_padded(" account "));
    frame.render_widget(user, parts[1]);
}

fn draw_player_bar<D: PlaybackDevice>(frame: &mut Frame, app: &App<D>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" player ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let track = app.current_track();
    let player = &app.player;
    let state = player.state();

    let icon = if state.is_playing {
        " ▶ "
    } else if player.is_play_pending() {
        " … "
    } else if player.is_loaded() {
        " ⏸ "
    } else {
        " ■ "
    };
    let mut spans = vec![Span::styled(icon, Style::default().fg(ACCENT))];
    match track {
        Some(t) => {
            spans.push(Span::raw(t.title.as_str()).bold());
            if !t.artist.trim().is_empty() {
                spans.push(Span::raw(" • "));
                spans.push(Span::styled(t.artist.as_str(), Style::default().fg(MUTED)));
            }
            if app.is_favorite(&t.id) {
                spans.push(Span::styled(" ♥", Style::default().fg(Color::Red)));
            }
        }
        None => spans.push(Span::styled("Nothing selected", Style::default().fg(MUTED))),
    }

    let volume = if player.is_muted() {
        "muted".to_string()
    } else {
        format!("{:>3}%", state.volume)
    };
    spans.push(Span::raw(format!("   {} {}", volume_meter(player.effective_volume()), volume)));

    if let Some(status) = app.status.as_deref() {
        spans.push(Span::styled(format!("   {}", status), Style::default().fg(Color::Yellow)));
    } else if let Some(err) = player.last_error() {
        spans.push(Span::styled(format!("   {}", err), Style::default().fg(Color::Red)));
    } else if track.is_some_and(|t| !t.has_audio()) {
        spans.push(Span::styled("   no audio source", Style::default().fg(MUTED)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

    let total = display_duration(player.duration(), track);
    let elapsed = player.current_time();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(ACCENT).bg(Color::Black))
        .ratio(progress_ratio(elapsed, total))
        .label(format!("{} / {}", format_mmss(elapsed), format_mmss(total)));
    frame.render_widget(gauge, rows[1]);
}
