//! Adapter layer: Convert Last.fm DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! If Last.fm changes its response format, only this file and dto.rs need to change.

use std::time::Duration;

use chrono::DateTime;

use super::domain::{
    AlbumRef, ApiError, ArtistRef, Image, LastFmError, Neighbour, Period, RankedArtist,
    RecentTracks, ScrobbledTrack, Tag, Tasteometer, TopArtists, TopTags, TrackInfo, Wiki,
};
use super::dto;
use super::method::{Envelope, Method, Payload};

/// Unwrap a decoded `<lfm>` response into the result for `method`.
///
/// An upstream error becomes [`Envelope::Failed`]; a success envelope missing
/// the method's element is a contract violation.
pub fn to_envelope(method: Method, response: dto::LfmResponse) -> Result<Envelope, LastFmError> {
    let present = response.present_elements();

    if let Some(error) = response.error {
        return Ok(Envelope::Failed(to_api_error(error)));
    }

    if response.status.trim().is_empty() {
        return Err(LastFmError::Decode("envelope has no status".to_string()));
    }

    if response.status != "ok" {
        return Ok(Envelope::Failed(ApiError {
            code: -1,
            message: format!("Unknown error (status \"{}\")", response.status),
        }));
    }

    let missing = || LastFmError::ContractViolation {
        expected: method.element().to_string(),
        actual: if present.is_empty() {
            "empty envelope".to_string()
        } else {
            present.join(", ")
        },
    };

    let payload = match method {
        Method::UserGetRecentTracks => {
            Payload::RecentTracks(to_recent_tracks(response.recenttracks.ok_or_else(missing)?))
        }
        Method::TrackGetInfo => Payload::TrackInfo(to_track_info(response.track.ok_or_else(missing)?)),
        Method::TrackGetTopTags | Method::ArtistGetTopTags => {
            Payload::TopTags(to_top_tags(response.toptags.ok_or_else(missing)?))
        }
        Method::UserGetNeighbours => {
            Payload::Neighbours(to_neighbours(response.neighbours.ok_or_else(missing)?))
        }
        Method::UserGetTopArtists => {
            Payload::TopArtists(to_top_artists(response.topartists.ok_or_else(missing)?))
        }
        Method::TasteometerCompare => {
            Payload::Comparison(to_tasteometer(response.comparison.ok_or_else(missing)?))
        }
    };

    Ok(Envelope::Ok { method, payload })
}

fn to_api_error(error: dto::ApiError) -> ApiError {
    ApiError {
        code: error.code.trim().parse().unwrap_or(-1),
        message: error.message.trim().to_string(),
    }
}

// ============================================================================
// Leaf helpers
// ============================================================================

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

fn number<T: std::str::FromStr + Default>(value: &str) -> T {
    value.trim().parse().unwrap_or_default()
}

fn optional_number<T: std::str::FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

/// Last.fm spells booleans as "1"/"0" in elements and "true"/"false" in attributes
fn flag(value: &str) -> bool {
    matches!(value.trim(), "1" | "true")
}

fn to_images(images: Vec<dto::Image>) -> Vec<Image> {
    images
        .into_iter()
        .filter_map(|image| {
            non_empty(image.url).map(|url| Image {
                size: image.size,
                url,
            })
        })
        .collect()
}

// ============================================================================
// Per-method conversions
// ============================================================================

fn to_recent_tracks(recent: dto::RecentTracks) -> RecentTracks {
    RecentTracks {
        page: number(&recent.page),
        per_page: number(&recent.per_page),
        total_pages: number(&recent.total_pages),
        total: number(&recent.total),
        user: recent.user,
        tracks: recent.tracks.into_iter().map(to_scrobbled_track).collect(),
    }
}

fn to_scrobbled_track(track: dto::RecentTrack) -> ScrobbledTrack {
    let played_at = track
        .date
        .as_ref()
        .and_then(|date| optional_number::<i64>(&date.uts))
        .and_then(|uts| DateTime::from_timestamp(uts, 0));

    ScrobbledTrack {
        now_playing: flag(&track.nowplaying),
        name: track.name,
        artist: track.artist.text.trim().to_string(),
        album: track.album.and_then(|album| non_empty(album.text)),
        mbid: non_empty(track.mbid),
        url: track.url,
        played_at,
        images: to_images(track.images),
    }
}

fn to_track_info(track: dto::TrackInfo) -> TrackInfo {
    // Unknown durations come back as 0
    let duration = optional_number::<u64>(&track.duration)
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis);

    TrackInfo {
        id: optional_number(&track.id),
        duration,
        listeners: number(&track.listeners),
        playcount: number(&track.playcount),
        user_playcount: track.userplaycount.as_deref().and_then(optional_number),
        user_loved: track.userloved.as_deref().map(flag),
        name: track.name,
        mbid: non_empty(track.mbid),
        url: track.url,
        artist: to_artist_ref(track.artist),
        album: track.album.map(to_album_ref),
        top_tags: track
            .toptags
            .map(|tags| tags.tags.into_iter().map(to_tag).collect())
            .unwrap_or_default(),
        wiki: track.wiki.map(|wiki| Wiki {
            published: wiki.published.trim().to_string(),
            summary: wiki.summary.trim().to_string(),
            content: wiki.content.trim().to_string(),
        }),
    }
}

fn to_artist_ref(artist: dto::Artist) -> ArtistRef {
    ArtistRef {
        name: artist.name,
        mbid: non_empty(artist.mbid),
        url: non_empty(artist.url),
    }
}

fn to_album_ref(album: dto::Album) -> AlbumRef {
    AlbumRef {
        position: optional_number(&album.position),
        title: album.title,
        artist: album.artist,
        mbid: non_empty(album.mbid),
        url: non_empty(album.url),
        images: to_images(album.images),
    }
}

fn to_tag(tag: dto::Tag) -> Tag {
    Tag {
        count: tag.count.as_deref().and_then(optional_number),
        name: tag.name,
        url: tag.url.and_then(non_empty),
    }
}

fn to_top_tags(list: dto::TagList) -> TopTags {
    TopTags {
        artist: non_empty(list.artist),
        track: non_empty(list.track),
        tags: list.tags.into_iter().map(to_tag).collect(),
    }
}

fn to_neighbours(neighbours: dto::Neighbours) -> Vec<Neighbour> {
    neighbours
        .users
        .into_iter()
        .map(|user| Neighbour {
            similarity: number(&user.similarity),
            name: user.name,
            url: user.url,
            images: to_images(user.images),
        })
        .collect()
}

fn to_top_artists(top: dto::TopArtists) -> TopArtists {
    let period = Period::from_param(top.period.trim()).unwrap_or_else(|| {
        tracing::debug!(period = %top.period, "Unrecognised top artists period, assuming overall");
        Period::Overall
    });

    TopArtists {
        period,
        page: number(&top.page),
        per_page: number(&top.per_page),
        total_pages: number(&top.total_pages),
        total: number(&top.total),
        user: top.user,
        artists: top
            .artists
            .into_iter()
            .map(|artist| RankedArtist {
                rank: number(&artist.rank),
                playcount: number(&artist.playcount),
                streamable: flag(&artist.streamable),
                name: artist.name,
                mbid: non_empty(artist.mbid),
                url: artist.url,
                images: to_images(artist.images),
            })
            .collect(),
    }
}

fn to_tasteometer(comparison: dto::Comparison) -> Tasteometer {
    let users = comparison
        .input
        .map(|input| input.users.into_iter().map(|u| u.name).collect())
        .unwrap_or_default();

    let Some(result) = comparison.result else {
        return Tasteometer {
            users,
            ..Default::default()
        };
    };

    let (matches, artists): (u32, Vec<String>) = result
        .artists
        .map(|shared| {
            (
                number(&shared.matches),
                shared.artists.into_iter().map(|a| a.name).collect(),
            )
        })
        .unwrap_or_default();

    Tasteometer {
        users,
        score: number(&result.score),
        matches,
        artists,
    }
}
