//! User-centric commands: scrobbles, neighbours, charts and taste comparison.

use std::fmt::Write;
use tokio::runtime::Runtime;

use crate::lastfm::{LastFm, Neighbour, Params, Period, RecentTracks, Tasteometer, TopArtists, params};

use super::{OutputFormat, emit};
use crate::error::ResultExt;

/// Show a user's recent tracks
pub fn cmd_recent(
    rt: &Runtime,
    client: &LastFm,
    format: OutputFormat,
    user: &str,
    limit: u32,
    page: Option<u32>,
) -> anyhow::Result<()> {
    let recent = rt
        .block_on(client.recent_tracks(&recent_params(user, limit, page)))
        .with_context(format!("fetching recent tracks for {user}"))?;
    emit(format, &recent, format_recent)?;
    Ok(())
}

/// Show users with similar taste
pub fn cmd_neighbours(
    rt: &Runtime,
    client: &LastFm,
    format: OutputFormat,
    user: &str,
    limit: u32,
) -> anyhow::Result<()> {
    let limit = limit.to_string();
    let neighbours = rt
        .block_on(client.neighbours(&params([("user", user), ("limit", limit.as_str())])))
        .with_context(format!("fetching neighbours of {user}"))?;
    emit(format, &neighbours, |n| format_neighbours(user, n))?;
    Ok(())
}

/// Show a user's top artists
pub fn cmd_top_artists(
    rt: &Runtime,
    client: &LastFm,
    format: OutputFormat,
    user: &str,
    period: Period,
    limit: u32,
) -> anyhow::Result<()> {
    let limit = limit.to_string();
    let query = params([
        ("user", user),
        ("period", period.as_param()),
        ("limit", limit.as_str()),
    ]);
    let top = rt
        .block_on(client.top_artists(&query))
        .with_context(format!("fetching top artists for {user}"))?;
    emit(format, &top, format_top_artists)?;
    Ok(())
}

/// Compare two users
pub fn cmd_compare(
    rt: &Runtime,
    client: &LastFm,
    format: OutputFormat,
    user1: &str,
    user2: &str,
    limit: u32,
) -> anyhow::Result<()> {
    let taste = rt
        .block_on(client.compare_taste(&compare_params(user1, user2, limit)))
        .with_context(format!("comparing {user1} with {user2}"))?;
    emit(format, &taste, format_comparison)?;
    Ok(())
}

pub(crate) fn recent_params(user: &str, limit: u32, page: Option<u32>) -> Params {
    let mut query = params([("user", user)]);
    query.insert("limit".to_string(), limit.to_string());
    if let Some(page) = page {
        query.insert("page".to_string(), page.to_string());
    }
    query
}

pub(crate) fn compare_params(user1: &str, user2: &str, limit: u32) -> Params {
    let limit = limit.to_string();
    params([
        ("type1", "user"),
        ("value1", user1),
        ("type2", "user"),
        ("value2", user2),
        ("limit", limit.as_str()),
    ])
}

// ============================================================================
// Text rendering
// ============================================================================

pub(crate) fn format_recent(recent: &RecentTracks) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Recent tracks for {} ({} scrobbles, page {}/{})",
        recent.user, recent.total, recent.page, recent.total_pages
    );
    let _ = writeln!(out);

    if recent.tracks.is_empty() {
        let _ = writeln!(out, "  (no scrobbles)");
    }

    for track in &recent.tracks {
        let when = match (track.now_playing, track.played_at) {
            (true, _) => "now playing".to_string(),
            (false, Some(at)) => at.format("%Y-%m-%d %H:%M").to_string(),
            (false, None) => "-".to_string(),
        };
        let _ = write!(out, "  {:<16} {} - {}", when, track.artist, track.name);
        if let Some(album) = &track.album {
            let _ = write!(out, " [{}]", album);
        }
        let _ = writeln!(out);
    }
    out
}

pub(crate) fn format_neighbours(user: &str, neighbours: &[Neighbour]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Neighbours of {}", user);
    let _ = writeln!(out);
    for neighbour in neighbours {
        let _ = writeln!(out, "  {:>5.1}%  {}", neighbour.similarity * 100.0, neighbour.name);
    }
    out
}

pub(crate) fn format_top_artists(top: &TopArtists) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Top artists for {} ({})", top.user, top.period.as_param());
    let _ = writeln!(out);
    for artist in &top.artists {
        let _ = writeln!(
            out,
            "  {:>3}. {} ({} plays)",
            artist.rank, artist.name, artist.playcount
        );
    }
    out
}

pub(crate) fn format_comparison(taste: &Tasteometer) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Compatibility of {}: {:.0}%",
        taste.users.join(" and "),
        taste.score * 100.0
    );
    if !taste.artists.is_empty() {
        let _ = writeln!(
            out,
            "  {} shared artists, including: {}",
            taste.matches,
            taste.artists.join(", ")
        );
    }
    out
}
