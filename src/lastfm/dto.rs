//! Last.fm XML Data Transfer Objects
//!
//! These types match EXACTLY what the Last.fm 2.0 API returns.
//! DO NOT use these types outside the lastfm module - convert to domain types.
//!
//! All leaf values are kept as strings: the service emits empty elements
//! (`<mbid/>`, `<id></id>`) where you'd expect numbers, so parsing happens
//! leniently in the adapter instead of failing the whole decode.
//!
//! Example response:
//! ```xml
//! <lfm status="ok">
//!   <recenttracks user="RJ" page="1" perPage="10" totalPages="3019" total="30189">
//!     <track nowplaying="true">
//!       <artist mbid="...">Aretha Franklin</artist>
//!       <name>Sisters Are Doing It For Themselves</name>
//!       ...
//!     </track>
//!   </recenttracks>
//! </lfm>
//! ```

use serde::Deserialize;

use super::domain::LastFmError;

/// The `<lfm>` root element.
///
/// Exactly one child is present on success; `error` is present on failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LfmResponse {
    #[serde(rename = "@status", default)]
    pub status: String,
    pub recenttracks: Option<RecentTracks>,
    pub track: Option<TrackInfo>,
    pub toptags: Option<TagList>,
    pub neighbours: Option<Neighbours>,
    pub topartists: Option<TopArtists>,
    pub comparison: Option<Comparison>,
    pub error: Option<ApiError>,
}

impl LfmResponse {
    /// Names of the result elements that were present
    pub fn present_elements(&self) -> Vec<&'static str> {
        let mut present = Vec::new();
        if self.recenttracks.is_some() {
            present.push("recenttracks");
        }
        if self.track.is_some() {
            present.push("track");
        }
        if self.toptags.is_some() {
            present.push("toptags");
        }
        if self.neighbours.is_some() {
            present.push("neighbours");
        }
        if self.topartists.is_some() {
            present.push("topartists");
        }
        if self.comparison.is_some() {
            present.push("comparison");
        }
        present
    }
}

/// `<error code="10">Invalid API key</error>`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(rename = "@code", default)]
    pub code: String,
    #[serde(rename = "$text", default)]
    pub message: String,
}

/// `<image size="small">url</image>`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Image {
    #[serde(rename = "@size", default)]
    pub size: String,
    #[serde(rename = "$text", default)]
    pub url: String,
}

/// Text element with an `mbid` attribute, e.g. `<artist mbid="...">Cher</artist>`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MbidText {
    #[serde(rename = "@mbid", default)]
    pub mbid: String,
    #[serde(rename = "$text", default)]
    pub text: String,
}

/// `<date uts="1213031819">9 Jun 2008, 17:16</date>`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Date {
    #[serde(rename = "@uts", default)]
    pub uts: String,
    #[serde(rename = "$text", default)]
    pub text: String,
}

// ============================================================================
// user.getRecentTracks
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentTracks {
    #[serde(rename = "@user", default)]
    pub user: String,
    #[serde(rename = "@page", default)]
    pub page: String,
    #[serde(rename = "@perPage", default)]
    pub per_page: String,
    #[serde(rename = "@totalPages", default)]
    pub total_pages: String,
    #[serde(rename = "@total", default)]
    pub total: String,
    #[serde(rename = "track", default)]
    pub tracks: Vec<RecentTrack>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentTrack {
    #[serde(rename = "@nowplaying", default)]
    pub nowplaying: String,
    #[serde(default)]
    pub artist: MbidText,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mbid: String,
    pub album: Option<MbidText>,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "image", default)]
    pub images: Vec<Image>,
    pub date: Option<Date>,
}

// ============================================================================
// track.getInfo
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mbid: String,
    #[serde(default)]
    pub url: String,
    /// Milliseconds
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub listeners: String,
    #[serde(default)]
    pub playcount: String,
    #[serde(default)]
    pub artist: Artist,
    pub album: Option<Album>,
    pub toptags: Option<TagList>,
    pub wiki: Option<Wiki>,
    pub userplaycount: Option<String>,
    pub userloved: Option<String>,
}

/// `<artist><name/><mbid/><url/></artist>`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mbid: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Album {
    #[serde(rename = "@position", default)]
    pub position: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub mbid: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "image", default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Wiki {
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
}

// ============================================================================
// track.getTopTags / artist.getTopTags
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagList {
    #[serde(rename = "@artist", default)]
    pub artist: String,
    #[serde(rename = "@track", default)]
    pub track: String,
    #[serde(rename = "tag", default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub name: String,
    pub count: Option<String>,
    pub url: Option<String>,
}

// ============================================================================
// user.getNeighbours
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Neighbours {
    #[serde(rename = "@user", default)]
    pub user: String,
    #[serde(rename = "user", default)]
    pub users: Vec<Neighbour>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Neighbour {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "image", default)]
    pub images: Vec<Image>,
    #[serde(rename = "match", default)]
    pub similarity: String,
}

// ============================================================================
// user.getTopArtists
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopArtists {
    #[serde(rename = "@user", default)]
    pub user: String,
    /// Period, e.g. "overall" or "7day"
    #[serde(rename = "@type", default)]
    pub period: String,
    #[serde(rename = "@page", default)]
    pub page: String,
    #[serde(rename = "@perPage", default)]
    pub per_page: String,
    #[serde(rename = "@totalPages", default)]
    pub total_pages: String,
    #[serde(rename = "@total", default)]
    pub total: String,
    #[serde(rename = "artist", default)]
    pub artists: Vec<RankedArtist>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankedArtist {
    #[serde(rename = "@rank", default)]
    pub rank: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub playcount: String,
    #[serde(default)]
    pub mbid: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub streamable: String,
    #[serde(rename = "image", default)]
    pub images: Vec<Image>,
}

// ============================================================================
// tasteometer.compare
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Comparison {
    pub input: Option<ComparisonInput>,
    pub result: Option<ComparisonResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComparisonInput {
    #[serde(rename = "user", default)]
    pub users: Vec<Artist>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComparisonResult {
    #[serde(default)]
    pub score: String,
    pub artists: Option<SharedArtists>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SharedArtists {
    #[serde(rename = "@matches", default)]
    pub matches: String,
    #[serde(rename = "artist", default)]
    pub artists: Vec<Artist>,
}

/// Decode a raw response body into the envelope DTO
pub fn decode(body: &[u8]) -> Result<LfmResponse, LastFmError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| LastFmError::Decode(format!("response is not UTF-8: {e}")))?;
    let response: LfmResponse =
        quick_xml::de::from_str(text).map_err(|e| LastFmError::Decode(e.to_string()))?;

    // The root name isn't checked by the deserializer; every `<lfm>` carries a status
    if response.status.trim().is_empty() {
        return Err(LastFmError::Decode(
            "body is not an <lfm> envelope (no status attribute)".to_string(),
        ));
    }
    Ok(response)
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
