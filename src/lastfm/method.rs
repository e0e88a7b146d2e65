//! Upstream methods and the typed results they produce.
//!
//! Every Last.fm response arrives in the same `<lfm>` envelope, but only one
//! kind of result is meaningful for a given method. [`Payload`] is keyed by
//! [`Method`] so a caller can never read a result shape the method didn't ask for.

use std::fmt;

use super::domain::{
    ApiError, LastFmError, Neighbour, RecentTracks, Tasteometer, TopArtists, TopTags, TrackInfo,
};

/// Supported Last.fm API methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    UserGetRecentTracks,
    TrackGetInfo,
    TrackGetTopTags,
    ArtistGetTopTags,
    UserGetNeighbours,
    UserGetTopArtists,
    TasteometerCompare,
}

impl Method {
    /// All methods this client can call
    pub const ALL: [Method; 7] = [
        Method::UserGetRecentTracks,
        Method::TrackGetInfo,
        Method::TrackGetTopTags,
        Method::ArtistGetTopTags,
        Method::UserGetNeighbours,
        Method::UserGetTopArtists,
        Method::TasteometerCompare,
    ];

    /// Value of the `method` request parameter
    pub fn as_str(self) -> &'static str {
        match self {
            Method::UserGetRecentTracks => "user.getRecentTracks",
            Method::TrackGetInfo => "track.getInfo",
            Method::TrackGetTopTags => "track.getTopTags",
            Method::ArtistGetTopTags => "artist.getTopTags",
            Method::UserGetNeighbours => "user.getNeighbours",
            Method::UserGetTopArtists => "user.getTopArtists",
            Method::TasteometerCompare => "tasteometer.compare",
        }
    }

    /// Name of the child element of `<lfm>` carrying this method's result
    pub fn element(self) -> &'static str {
        match self {
            Method::UserGetRecentTracks => "recenttracks",
            Method::TrackGetInfo => "track",
            Method::TrackGetTopTags | Method::ArtistGetTopTags => "toptags",
            Method::UserGetNeighbours => "neighbours",
            Method::UserGetTopArtists => "topartists",
            Method::TasteometerCompare => "comparison",
        }
    }

    /// Look up a method by its API name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single meaningful result of a successful call
#[derive(Debug, Clone)]
pub enum Payload {
    RecentTracks(RecentTracks),
    TrackInfo(TrackInfo),
    TopTags(TopTags),
    Neighbours(Vec<Neighbour>),
    TopArtists(TopArtists),
    Comparison(Tasteometer),
}

impl Payload {
    /// Element name this payload was decoded from
    pub fn element(&self) -> &'static str {
        match self {
            Payload::RecentTracks(_) => "recenttracks",
            Payload::TrackInfo(_) => "track",
            Payload::TopTags(_) => "toptags",
            Payload::Neighbours(_) => "neighbours",
            Payload::TopArtists(_) => "topartists",
            Payload::Comparison(_) => "comparison",
        }
    }

    fn mismatch(self, expected: &str) -> LastFmError {
        LastFmError::ContractViolation {
            expected: expected.to_string(),
            actual: self.element().to_string(),
        }
    }

    pub fn into_recent_tracks(self) -> Result<RecentTracks, LastFmError> {
        match self {
            Payload::RecentTracks(r) => Ok(r),
            other => Err(other.mismatch("recenttracks")),
        }
    }

    pub fn into_track_info(self) -> Result<TrackInfo, LastFmError> {
        match self {
            Payload::TrackInfo(t) => Ok(t),
            other => Err(other.mismatch("track")),
        }
    }

    pub fn into_top_tags(self) -> Result<TopTags, LastFmError> {
        match self {
            Payload::TopTags(t) => Ok(t),
            other => Err(other.mismatch("toptags")),
        }
    }

    pub fn into_neighbours(self) -> Result<Vec<Neighbour>, LastFmError> {
        match self {
            Payload::Neighbours(n) => Ok(n),
            other => Err(other.mismatch("neighbours")),
        }
    }

    pub fn into_top_artists(self) -> Result<TopArtists, LastFmError> {
        match self {
            Payload::TopArtists(a) => Ok(a),
            other => Err(other.mismatch("topartists")),
        }
    }

    pub fn into_comparison(self) -> Result<Tasteometer, LastFmError> {
        match self {
            Payload::Comparison(c) => Ok(c),
            other => Err(other.mismatch("comparison")),
        }
    }
}

/// A decoded `<lfm>` envelope
#[derive(Debug, Clone)]
pub enum Envelope {
    /// `status="ok"` with the invoked method's result
    Ok { method: Method, payload: Payload },
    /// The service rejected the request
    Failed(ApiError),
}

impl Envelope {
    /// Surface an upstream failure as an error
    pub fn into_result(self) -> Result<Payload, LastFmError> {
        match self {
            Envelope::Ok { payload, .. } => Ok(payload),
            Envelope::Failed(error) => Err(error.into()),
        }
    }
}
