//! Last.fm web service client - builds query URLs, fetches XML, decodes typed results.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent results
//! - **DTOs** (`dto.rs`) - Exact XML response shapes
//! - **Adapter** (`adapter.rs`) - Converts DTOs into a method-keyed [`Envelope`]
//! - **Query** (`query.rs`) - Percent-encoded request URL construction
//! - **Transport** (`transport.rs`) - Injectable HTTP GET capability
//! - **Client** (`client.rs`) - One operation per upstream method
//!
//! # Usage
//!
//! ```ignore
//! use lastfm_client::lastfm::{LastFm, params};
//!
//! let client = LastFm::new("your-api-key")?;
//! let recent = client.recent_tracks(&params([("user", "rj"), ("limit", "5")])).await?;
//! for track in &recent.tracks {
//!     println!("{} - {}", track.artist, track.name);
//! }
//! ```

pub mod adapter;
pub mod client;
pub mod domain;
pub mod dto;
pub mod method;
pub mod query;
pub mod transport;

pub use client::LastFm;
pub use domain::{
    AlbumRef, ApiError, ArtistRef, Image, LastFmError, Neighbour, Period, RankedArtist,
    RecentTracks, ScrobbledTrack, Tag, Tasteometer, TopArtists, TopTags, TrackInfo, Wiki,
};
pub use method::{Envelope, Method, Payload};
pub use query::{DEFAULT_BASE_URL, Params, build_query_url, method_params, params};
pub use transport::{HttpResponse, ReqwestTransport, ResponseBody, Transport, TransportError, TransportFailure};
