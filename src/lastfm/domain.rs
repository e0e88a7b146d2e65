//! Internal domain models for Last.fm results.
//!
//! These types are OUR types - they don't change when the wire format changes.
//! All XML responses get converted into these types via the adapter.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Artwork URL for one of the sizes Last.fm renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    /// Size label (small, medium, large, extralarge, mega)
    pub size: String,
    pub url: String,
}

/// A user's scrobble history, newest first
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecentTracks {
    pub user: String,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total: u32,
    pub tracks: Vec<ScrobbledTrack>,
}

impl RecentTracks {
    /// The track currently playing, if the user is listening right now
    pub fn now_playing(&self) -> Option<&ScrobbledTrack> {
        self.tracks.iter().find(|t| t.now_playing)
    }
}

/// One entry in the recent tracks list
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScrobbledTrack {
    pub name: String,
    pub artist: String,
    pub album: Option<String>,
    /// MusicBrainz recording ID (if Last.fm knows it)
    pub mbid: Option<String>,
    pub url: String,
    /// Currently playing entries have no timestamp
    pub now_playing: bool,
    pub played_at: Option<DateTime<Utc>>,
    pub images: Vec<Image>,
}

/// Artist reference as it appears inside other results
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArtistRef {
    pub name: String,
    pub mbid: Option<String>,
    pub url: Option<String>,
}

/// Album a track appears on
#[derive(Debug, Clone, Default, Serialize)]
pub struct AlbumRef {
    pub title: String,
    pub artist: String,
    pub mbid: Option<String>,
    pub url: Option<String>,
    /// Track position on the album
    pub position: Option<u32>,
    pub images: Vec<Image>,
}

/// Editorial text attached to a track
#[derive(Debug, Clone, Default, Serialize)]
pub struct Wiki {
    pub published: String,
    pub summary: String,
    pub content: String,
}

/// Detailed track metadata from `track.getInfo`
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrackInfo {
    /// Last.fm internal track ID
    pub id: Option<u64>,
    pub name: String,
    pub mbid: Option<String>,
    pub url: String,
    pub duration: Option<Duration>,
    pub listeners: u64,
    pub playcount: u64,
    pub artist: ArtistRef,
    pub album: Option<AlbumRef>,
    pub top_tags: Vec<Tag>,
    pub wiki: Option<Wiki>,
    /// Only present when the request named a `username`
    pub user_playcount: Option<u64>,
    pub user_loved: Option<bool>,
}

/// A folksonomy tag
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tag {
    pub name: String,
    /// Relative weight (0-100); absent when the tag is embedded in track info
    pub count: Option<u32>,
    pub url: Option<String>,
}

/// Tags applied to an artist or track, highest weight first
#[derive(Debug, Clone, Default, Serialize)]
pub struct TopTags {
    pub artist: Option<String>,
    /// Set for `track.getTopTags`, absent for `artist.getTopTags`
    pub track: Option<String>,
    pub tags: Vec<Tag>,
}

/// A user with similar listening habits
#[derive(Debug, Clone, Default, Serialize)]
pub struct Neighbour {
    pub name: String,
    pub url: String,
    /// Similarity (0.0 to 1.0)
    pub similarity: f64,
    pub images: Vec<Image>,
}

/// Time window for chart-style queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Period {
    #[default]
    Overall,
    SevenDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl Period {
    /// Value of the `period` request parameter
    pub fn as_param(self) -> &'static str {
        match self {
            Period::Overall => "overall",
            Period::SevenDays => "7day",
            Period::OneMonth => "1month",
            Period::ThreeMonths => "3month",
            Period::SixMonths => "6month",
            Period::TwelveMonths => "12month",
        }
    }

    /// Parse the `type` attribute of `<topartists>`
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "overall" => Some(Period::Overall),
            "7day" => Some(Period::SevenDays),
            "1month" => Some(Period::OneMonth),
            "3month" => Some(Period::ThreeMonths),
            "6month" => Some(Period::SixMonths),
            "12month" => Some(Period::TwelveMonths),
            _ => None,
        }
    }
}

/// A user's most played artists
#[derive(Debug, Clone, Default, Serialize)]
pub struct TopArtists {
    pub user: String,
    pub period: Period,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total: u32,
    pub artists: Vec<RankedArtist>,
}

/// Entry in a top artists chart
#[derive(Debug, Clone, Default, Serialize)]
pub struct RankedArtist {
    pub rank: u32,
    pub name: String,
    pub playcount: u64,
    pub mbid: Option<String>,
    pub url: String,
    pub streamable: bool,
    pub images: Vec<Image>,
}

/// Result of comparing two users' libraries
#[derive(Debug, Clone, Default, Serialize)]
pub struct Tasteometer {
    /// The compared user names, in request order
    pub users: Vec<String>,
    /// Similarity score (0.0 to 1.0)
    pub score: f64,
    /// Total number of shared artists (the list below is truncated)
    pub matches: u32,
    pub artists: Vec<String>,
}

/// Upstream error carried inside a well-formed response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// Last.fm error code (e.g. 6 = invalid parameters, 10 = invalid API key)
    pub code: i32,
    pub message: String,
}

/// Errors from talking to Last.fm
///
/// Transport, decode and upstream failures are kept apart so callers can
/// tell "the service said no" from "we never got a usable answer".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LastFmError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("API contract violation: expected {expected}, got {actual}")]
    ContractViolation { expected: String, actual: String },

    #[error("Last.fm error {code}: {message}")]
    Api { code: i32, message: String },
}

impl LastFmError {
    /// Whether the service itself reported this error
    pub fn is_upstream(&self) -> bool {
        matches!(self, LastFmError::Api { .. })
    }

    /// Whether the response body could not be understood
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            LastFmError::Decode(_) | LastFmError::ContractViolation { .. }
        )
    }
}

impl From<ApiError> for LastFmError {
    fn from(error: ApiError) -> Self {
        LastFmError::Api {
            code: error.code,
            message: error.message,
        }
    }
}
