use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use super::{ACCENT, MUTED, format_mmss, left_padded};
use crate::app::{App, InputMode, Page, ProfileField, ProfileForm, ProfileTab, UploadField};
use crate::lyrics::{LineState, LyricsLine, current_line, line_state};
use crate::playback::PlaybackDevice;
use crate::visualizer::BarsWidget;

pub(super) fn draw_page<D: PlaybackDevice>(frame: &mut Frame, app: &App<D>, area: Rect) {
    match app.page {
        Page::Home => draw_home(frame, app, area),
        Page::Player => draw_player(frame, app, area),
        Page::Playlists => draw_playlists(frame, app, area),
        Page::Favorites => draw_favorites(frame, app, area),
        Page::Profile => draw_profile(frame, app, area),
        Page::Admin => draw_admin(frame, app, area),
    }
}

fn placeholder(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let p = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(MUTED)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(p, area);
}

/// Track list with the cursor highlighted; the current track is marked
/// and favorites carry a heart.
fn draw_track_list<D: PlaybackDevice>(
    frame: &mut Frame,
    app: &App<D>,
    indices: &[usize],
    title: &str,
    area: Rect,
) {
    let items: Vec<ListItem> = indices
        .iter()
        .filter_map(|&i| app.catalog.get(i).map(|t| (i, t)))
        .map(|(i, t)| {
            let playing = app.current == Some(i);
            let marker = if playing { "♪ " } else { "  " };
            let heart = if app.is_favorite(&t.id) { " ♥" } else { "" };
            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(ACCENT)),
                Span::raw(t.display()),
                Span::styled(
                    format!("  {}", format_mmss(f64::from(t.duration))),
                    Style::default().fg(MUTED),
                ),
                Span::styled(heart, Style::default().fg(Color::Red)),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !indices.is_empty() {
        state.select(Some(app.cursor.min(indices.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_home<D: PlaybackDevice>(frame: &mut Frame, app: &App<D>, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    draw_track_list(frame, app, &app.visible_tracks(), " recommended ", parts[0]);
    draw_playlist_list(frame, app, " popular playlists ", parts[1]);
}

fn draw_playlist_list<D: PlaybackDevice>(frame: &mut Frame, app: &App<D>, title: &str, area: Rect) {
    if app.catalog.playlists().is_empty() {
        placeholder(frame, area, title, "No playlists yet");
        return;
    }
    let items: Vec<ListItem> = app
        .catalog
        .playlists()
        .iter()
        .map(|p| {
            ListItem::new(Line::from(vec![
                Span::raw(p.name.as_str()).bold(),
                Span::styled(
                    format!("  {} tracks", p.track_count),
                    Style::default().fg(MUTED),
                ),
            ]))
        })
        .collect();
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}

fn draw_playlists<D: PlaybackDevice>(frame: &mut Frame, app: &App<D>, area: Rect) {
    draw_playlist_list(frame, app, " playlists ", area);
}

fn draw_favorites<D: PlaybackDevice>(frame: &mut Frame, app: &App<D>, area: Rect) {
    let indices = app.visible_tracks();
    if indices.is_empty() {
        placeholder(
            frame,
            area,
            " favorites ",
            "No favorite tracks yet. Press f on a track to add it.",
        );
        return;
    }
    draw_track_list(frame, app, &indices, " favorites ", area);
}

fn draw_player<D: PlaybackDevice>(frame: &mut Frame, app: &App<D>, area: Rect) {
    let Some(track) = app.current_track() else {
        placeholder(frame, area, " now playing ", "Select a track to start listening");
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Percentage(40),
            Constraint::Min(3),
        ])
        .split(area);

    let mut details = vec![
        Line::from(track.title.as_str()).bold(),
        Line::from(track.artist.as_str()).fg(ACCENT),
    ];
    if !track.album.trim().is_empty() {
        details.push(Line::from(track.album.as_str()).fg(MUTED));
    }
    frame.render_widget(
        Paragraph::new(details).block(left_padded(" now playing ")),
        rows[0],
    );

    let bars = BarsWidget::new(app.visualizer.heights())
        .style(Style::default().fg(ACCENT))
        .block(Block::default().borders(Borders::ALL).title(" visualizer "));
    frame.render_widget(bars, rows[1]);

    draw_lyrics(frame, &track.lyrics, app.player.current_time(), rows[2]);
}

fn line_style(state: LineState) -> Style {
    match state {
        LineState::Past => Style::default().fg(MUTED),
        LineState::Active => Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        LineState::Upcoming => Style::default(),
    }
}

/// Styled lyrics lines for position `t`, plus the active index.
pub(super) fn lyrics_lines(lines: &[LyricsLine], t: f64) -> (Vec<Line<'_>>, Option<usize>) {
    let current = current_line(lines, t);
    let styled = lines
        .iter()
        .enumerate()
        .map(|(i, l)| Line::styled(l.text.as_str(), line_style(line_state(i, current))))
        .collect();
    (styled, current)
}

fn draw_lyrics(frame: &mut Frame, lines: &[LyricsLine], t: f64, area: Rect) {
    if lines.is_empty() {
        placeholder(frame, area, " lyrics ", "Lyrics unavailable");
        return;
    }
    let (styled, current) = lyrics_lines(lines, t);
    // keep the active line in the middle once there is enough history
    let visible = area.height.saturating_sub(2);
    let scroll = current
        .map(|c| u16::try_from(c).unwrap_or(u16::MAX))
        .unwrap_or(0)
        .saturating_sub(visible / 2);

    let p = Paragraph::new(styled)
        .alignment(Alignment::Center)
        .scroll((scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(" lyrics "));
    frame.render_widget(p, area);
}

fn field_line<'a>(label: &'a str, value: &'a str, placeholder: &'a str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let value_span = if value.is_empty() {
        Span::styled(placeholder, Style::default().fg(MUTED))
    } else {
        Span::raw(value)
    };
    let mut spans = vec![Span::styled(format!("{label}: "), label_style), value_span];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(ACCENT)));
    }
    Line::from(spans)
}

fn draw_profile<D: PlaybackDevice>(frame: &mut Frame, app: &App<D>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let profile = &app.profile;
    let selected = match profile.tab {
        ProfileTab::Profile => 0,
        ProfileTab::Subscription => 1,
    };
    let tabs = Tabs::new(vec!["Profile", "Subscription"])
        .select(selected)
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" account "));
    frame.render_widget(tabs, rows[0]);

    let body = match profile.tab {
        ProfileTab::Profile => profile_lines(profile, app.input_mode == InputMode::Editing),
        ProfileTab::Subscription => subscription_lines(profile),
    };
    frame.render_widget(
        Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .block(left_padded("")),
        rows[1],
    );
}

fn profile_lines(profile: &ProfileForm, editing: bool) -> Vec<Line<'_>> {
    vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", profile.initials()),
                Style::default().bg(ACCENT).fg(Color::White).bold(),
            ),
            Span::raw("  "),
            Span::raw(profile.name.as_str()).bold(),
        ]),
        Line::from(profile.email.as_str()).fg(MUTED),
        Line::default(),
        field_line(
            "Name",
            &profile.name,
            "",
            editing && profile.focus == ProfileField::Name,
        ),
        field_line(
            "Email",
            &profile.email,
            "",
            editing && profile.focus == ProfileField::Email,
        ),
        Line::default(),
        Line::from(if editing {
            "[enter] save changes"
        } else {
            "[e] edit profile"
        })
        .fg(MUTED),
    ]
}

fn subscription_lines(profile: &ProfileForm) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(vec![
            Span::raw("Current plan: "),
            Span::styled(profile.plan.as_str(), Style::default().fg(ACCENT).bold()),
        ]),
        Line::default(),
    ];
    lines.extend(
        ProfileForm::PERKS
            .iter()
            .map(|perk| Line::from(format!("✓ {perk}"))),
    );
    lines
}

fn draw_admin<D: PlaybackDevice>(frame: &mut Frame, app: &App<D>, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let editing = app.input_mode == InputMode::Editing;
    let form = &app.upload;
    let mut lines: Vec<Line> = UploadField::ALL
        .iter()
        .map(|&f| {
            field_line(
                f.label(),
                form.value(f),
                f.placeholder(),
                editing && form.focus == f,
            )
        })
        .collect();
    lines.push(Line::default());
    lines.push(
        Line::from(if editing {
            "[enter] upload track"
        } else {
            "[e] fill in the form"
        })
        .fg(MUTED),
    );
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(left_padded(" add track ")),
        cols[0],
    );

    draw_track_list(frame, app, &app.visible_tracks(), " all tracks ", cols[1]);
}
