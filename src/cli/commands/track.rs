//! Track and tag lookup commands.

use std::fmt::Write;
use tokio::runtime::Runtime;

use crate::lastfm::{LastFm, Params, TopTags, TrackInfo, params};

use super::{OutputFormat, emit};
use crate::error::ResultExt;

/// Show details for a track
pub fn cmd_track_info(
    rt: &Runtime,
    client: &LastFm,
    format: OutputFormat,
    artist: &str,
    track: &str,
    username: Option<&str>,
    autocorrect: bool,
) -> anyhow::Result<()> {
    let query = track_info_params(artist, track, username, autocorrect);
    let info = rt
        .block_on(client.track_info(&query))
        .with_context(format!("fetching info for {artist} - {track}"))?;
    emit(format, &info, format_track_info)?;
    Ok(())
}

/// Show top tags for an artist, or for one of its tracks
pub fn cmd_top_tags(
    rt: &Runtime,
    client: &LastFm,
    format: OutputFormat,
    artist: &str,
    track: Option<&str>,
) -> anyhow::Result<()> {
    let tags = match track {
        Some(track) => rt
            .block_on(client.track_top_tags(&params([("artist", artist), ("track", track)])))
            .with_context(format!("fetching tags for {artist} - {track}"))?,
        None => rt
            .block_on(client.artist_top_tags(&params([("artist", artist)])))
            .with_context(format!("fetching tags for {artist}"))?,
    };
    emit(format, &tags, format_top_tags)?;
    Ok(())
}

pub(crate) fn track_info_params(
    artist: &str,
    track: &str,
    username: Option<&str>,
    autocorrect: bool,
) -> Params {
    let mut query = params([("artist", artist), ("track", track)]);
    if let Some(username) = username {
        query.insert("username".to_string(), username.to_string());
    }
    if autocorrect {
        query.insert("autocorrect".to_string(), "1".to_string());
    }
    query
}

// ============================================================================
// Text rendering
// ============================================================================

pub(crate) fn format_track_info(info: &TrackInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Title:     {}", info.name);
    let _ = writeln!(out, "  Artist:    {}", info.artist.name);
    if let Some(album) = &info.album {
        let _ = writeln!(out, "  Album:     {}", album.title);
    }
    if let Some(duration) = info.duration {
        let secs = duration.as_secs();
        let _ = writeln!(out, "  Duration:  {}:{:02}", secs / 60, secs % 60);
    }
    let _ = writeln!(out, "  Listeners: {}", info.listeners);
    let _ = writeln!(out, "  Plays:     {}", info.playcount);
    if let Some(plays) = info.user_playcount {
        let loved = if info.user_loved == Some(true) { " (loved)" } else { "" };
        let _ = writeln!(out, "  Your plays: {}{}", plays, loved);
    }
    if !info.top_tags.is_empty() {
        let names: Vec<_> = info.top_tags.iter().map(|t| t.name.as_str()).collect();
        let _ = writeln!(out, "  Tags:      {}", names.join(", "));
    }
    if let Some(mbid) = &info.mbid {
        let _ = writeln!(out);
        let _ = writeln!(out, "  MusicBrainz: https://musicbrainz.org/recording/{}", mbid);
    }
    out
}

pub(crate) fn format_top_tags(tags: &TopTags) -> String {
    let mut out = String::new();
    let subject = match (&tags.artist, &tags.track) {
        (Some(artist), Some(track)) => format!("{} - {}", artist, track),
        (Some(artist), None) => artist.clone(),
        (None, Some(track)) => track.clone(),
        (None, None) => "(unknown)".to_string(),
    };
    let _ = writeln!(out, "Top tags for {}", subject);
    let _ = writeln!(out);
    for tag in &tags.tags {
        match tag.count {
            Some(count) => {
                let _ = writeln!(out, "  {:>3}  {}", count, tag.name);
            }
            None => {
                let _ = writeln!(out, "       {}", tag.name);
            }
        }
    }
    out
}
