//! Synced lyrics: which line is active for a playback position.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LyricsLine {
    /// Start of the line, in seconds from the beginning of the track.
    pub time: f64,
    pub text: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineState {
    Past,
    Active,
    Upcoming,
}

/// Index of the last line whose timestamp is `<= t`.
///
/// Lines are assumed to be sorted by time. Returns `None` for an empty list or
/// when `t` precedes the first line.
pub fn current_line(lines: &[LyricsLine], t: f64) -> Option<usize> {
    lines.iter().rposition(|line| t >= line.time)
}

pub fn line_state(index: usize, current: Option<usize>) -> LineState {
    match current {
        Some(c) if index == c => LineState::Active,
        Some(c) if index < c => LineState::Past,
        _ => LineState::Upcoming,
    }
}

/// Parse LRC text (`[mm:ss.xx]line`). A line may carry several time tags;
/// metadata tags like `[ar:...]` and untimed lines are skipped.
pub fn parse_lrc(text: &str) -> Vec<LyricsLine> {
    let mut lines = Vec::new();

    for raw in text.lines() {
        let mut rest = raw;
        let mut stamps: Vec<f64> = Vec::new();

        while let Some(tag) = rest.strip_prefix('[') {
            let Some(close) = tag.find(']') else {
                break;
            };
            if let Some(t) = parse_timestamp(&tag[..close]) {
                stamps.push(t);
            }
            rest = &tag[close + 1..];
        }

        let content = rest.trim();
        if content.is_empty() {
            continue;
        }
        for time in stamps {
            lines.push(LyricsLine {
                time,
                text: content.to_string(),
            });
        }
    }

    lines.sort_by(|a, b| a.time.total_cmp(&b.time));
    lines
}

fn parse_timestamp(tag: &str) -> Option<f64> {
    let (min, sec) = tag.split_once(':')?;
    let min: u32 = min.trim().parse().ok()?;
    let sec: f64 = sec.trim().parse().ok()?;
    if !(0.0..60.0).contains(&sec) {
        return None;
    }
    Some(f64::from(min) * 60.0 + sec)
}
