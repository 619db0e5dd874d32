//! Grid tracks resolved to terminal columns.

use unicode_width::UnicodeWidthChar;

/// Pixels per terminal column.
pub const PX_PER_CELL: f64 = 8.0;

/// Blank columns between two tracks.
pub const GAP: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Track {
    Fixed(u16),
    Flex(f64),
}

fn parse_track(raw: &str) -> Track {
    if let Some(px) = raw.strip_suffix("px").and_then(|n| n.trim().parse::<f64>().ok())
        && px.is_finite()
        && px > 0.0
    {
        return Track::Fixed(px_to_cells(px));
    }
    if let Some(fr) = raw.strip_suffix("fr").and_then(|n| n.trim().parse::<f64>().ok())
        && fr.is_finite()
        && fr > 0.0
    {
        return Track::Flex(fr);
    }
    // minmax(), auto and friends get an even share.
    Track::Flex(1.0)
}

/// Pixels to whole cells, rounding up, at least one.
pub fn px_to_cells(px: f64) -> u16 {
    ((px / PX_PER_CELL).ceil() as u16).max(1)
}

/// Split a template into tracks, keeping `minmax(a, b)` in one piece.
fn split_tracks(template: &str) -> Vec<&str> {
    let mut tracks = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (i, ch) in template.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    tracks.push(&template[s..i]);
                }
                continue;
            }
            _ => {}
        }
        start.get_or_insert(i);
    }
    if let Some(s) = start {
        tracks.push(&template[s..]);
    }
    tracks
}

/// Column widths for `template` laid out across `width` cells.
///
/// Fixed tracks get their size first; the rest, minus gaps, is shared
/// between flexible tracks, the last one taking the rounding remainder.
pub fn resolve(template: &str, width: u16) -> Vec<u16> {
    let tracks: Vec<Track> = split_tracks(template).into_iter().map(parse_track).collect();
    if tracks.is_empty() {
        return Vec::new();
    }

    let gaps = GAP.saturating_mul(tracks.len() as u16 - 1);
    let fixed = tracks
        .iter()
        .map(|t| match t {
            Track::Fixed(n) => *n,
            Track::Flex(_) => 0,
        })
        .fold(0u16, u16::saturating_add);
    let shares: f64 = tracks
        .iter()
        .map(|t| match t {
            Track::Flex(fr) => *fr,
            Track::Fixed(_) => 0.0,
        })
        .sum();
    let last_flex = tracks.iter().rposition(|t| matches!(t, Track::Flex(_)));

    let flexible = width.saturating_sub(fixed).saturating_sub(gaps);
    let mut remaining = flexible;
    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| match track {
            Track::Fixed(n) => *n,
            Track::Flex(fr) => {
                let cells = if Some(i) == last_flex {
                    remaining
                } else {
                    ((f64::from(flexible) * fr / shares).floor() as u16).min(remaining)
                };
                remaining -= cells;
                cells
            }
        })
        .collect()
}

/// Truncate or pad `text` to exactly `width` display columns.
pub fn fit(text: &str, width: u16) -> String {
    let width = usize::from(width);
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

/// Display width of `text`.
pub fn text_width(text: &str) -> u16 {
    let width: usize = text.chars().map(|ch| ch.width().unwrap_or(0)).sum();
    u16::try_from(width).unwrap_or(u16::MAX)
}
