//! Last.fm HTTP client
//!
//! Handles communication with the Last.fm 2.0 web service.
//! See: https://www.last.fm/api
//!
//! ## API Quirks
//!
//! ### Errors arrive as XML with 4xx status codes
//! An invalid key or unknown user comes back as `<lfm status="failed">` with
//! HTTP 400/403. The body is always decoded first; only a non-2xx response
//! whose body isn't an envelope is reported as a transport error.
//!
//! ### One element per method
//! The envelope never says which method produced it. The caller already
//! knows, so each operation tells the unwrapper which element to expect.

use std::sync::Arc;
use std::time::Duration;

use super::domain::{LastFmError, Neighbour, RecentTracks, Tasteometer, TopArtists, TopTags, TrackInfo};
use super::method::{Method, Payload};
use super::query::{self, DEFAULT_BASE_URL, Params};
use super::transport::{HttpResponse, ReqwestTransport, Transport, TransportFailure};
use super::{adapter, dto};
use crate::config::ApiConfig;

/// Last.fm API client
///
/// Holds no per-call state; a single client can serve concurrent calls.
#[derive(Clone)]
pub struct LastFm {
    api_key: String,
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl LastFm {
    /// Create a new client with the given API key
    ///
    /// The client is configured to:
    /// - Accept gzip-compressed responses (reduces bandwidth)
    /// - Send User-Agent header identifying the application
    pub fn new(api_key: impl Into<String>) -> Result<Self, LastFmError> {
        let transport = ReqwestTransport::new().map_err(|e| LastFmError::Transport(e.0))?;
        Ok(Self::with_transport(api_key, DEFAULT_BASE_URL, Arc::new(transport)))
    }

    /// Create a client from the `[api]` config section and an API key
    pub fn from_config(api_key: impl Into<String>, config: &ApiConfig) -> Result<Self, LastFmError> {
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        let transport = ReqwestTransport::builder(&config.user_agent, timeout)
            .map_err(|e| LastFmError::Transport(e.0))?;
        Ok(Self::with_transport(api_key, &config.base_url, Arc::new(transport)))
    }

    /// Create a client with a custom base URL and transport
    pub fn with_transport(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL that `call` would request for `method` with `params`
    pub fn request_url(&self, method: Method, params: &Params) -> String {
        let merged = query::method_params(&self.api_key, method.as_str(), params);
        query::build_query_url(&self.base_url, &merged)
    }

    /// Invoke `method` and return its typed payload.
    ///
    /// Upstream errors come back as [`LastFmError::Api`].
    pub async fn call(&self, method: Method, params: &Params) -> Result<Payload, LastFmError> {
        let response = self.send(method, params).await?;
        adapter::to_envelope(method, response)?.into_result()
    }

    /// Fetch a user's recent scrobbles.
    ///
    /// Params: `user` (required), `limit`, `page`, `from`, `to`.
    pub async fn recent_tracks(&self, params: &Params) -> Result<RecentTracks, LastFmError> {
        self.call(Method::UserGetRecentTracks, params)
            .await?
            .into_recent_tracks()
    }

    /// Fetch track metadata.
    ///
    /// Params: `artist` + `track`, or `mbid`; `username` adds play count and loved flag;
    /// `autocorrect`.
    pub async fn track_info(&self, params: &Params) -> Result<TrackInfo, LastFmError> {
        self.call(Method::TrackGetInfo, params).await?.into_track_info()
    }

    /// Fetch the top tags for a track.
    ///
    /// Params: `artist` + `track`, or `mbid`; `autocorrect`.
    pub async fn track_top_tags(&self, params: &Params) -> Result<TopTags, LastFmError> {
        self.call(Method::TrackGetTopTags, params).await?.into_top_tags()
    }

    /// Fetch the top tags for an artist.
    ///
    /// Params: `artist` or `mbid`; `autocorrect`.
    pub async fn artist_top_tags(&self, params: &Params) -> Result<TopTags, LastFmError> {
        self.call(Method::ArtistGetTopTags, params).await?.into_top_tags()
    }

    /// Fetch users with similar taste.
    ///
    /// Params: `user` (required), `limit`.
    pub async fn neighbours(&self, params: &Params) -> Result<Vec<Neighbour>, LastFmError> {
        self.call(Method::UserGetNeighbours, params).await?.into_neighbours()
    }

    /// Fetch a user's most played artists.
    ///
    /// Params: `user` (required), `period`, `limit`, `page`.
    pub async fn top_artists(&self, params: &Params) -> Result<TopArtists, LastFmError> {
        self.call(Method::UserGetTopArtists, params).await?.into_top_artists()
    }

    /// Compare two users' libraries.
    ///
    /// Params: `type1`, `value1`, `type2`, `value2` (type is `user`), `limit`.
    pub async fn compare_taste(&self, params: &Params) -> Result<Tasteometer, LastFmError> {
        self.call(Method::TasteometerCompare, params).await?.into_comparison()
    }

    /// Send the HTTP request and decode the envelope
    async fn send(&self, method: Method, params: &Params) -> Result<dto::LfmResponse, LastFmError> {
        let url = self.request_url(method, params);
        tracing::debug!(method = %method, "Sending Last.fm request");

        let response = match self.transport.get(&url).await {
            Ok(response) => response,
            Err(failure) => return Err(release_partial(method, failure)),
        };

        let success = response.is_success();
        let HttpResponse { status, body } = response;
        let bytes = body
            .read_all()
            .await
            .map_err(|e| LastFmError::Transport(e.0))?;

        match dto::decode(&bytes) {
            Ok(decoded) => {
                if !success {
                    tracing::warn!(method = %method, status, "Last.fm returned HTTP {}", status);
                }
                Ok(decoded)
            }
            Err(err) if !success => {
                tracing::debug!(method = %method, "Undecodable error body: {}", err);
                Err(LastFmError::Transport(format!(
                    "HTTP {}: {}",
                    status,
                    String::from_utf8_lossy(&bytes).chars().take(200).collect::<String>()
                )))
            }
            Err(err) => Err(err),
        }
    }
}

/// Close any partial body that came with a transport failure
fn release_partial(method: Method, failure: TransportFailure) -> LastFmError {
    let TransportFailure { error, partial } = failure;
    if let Some(partial) = partial {
        tracing::warn!(
            method = %method,
            status = partial.status,
            "Discarding partial response after transport error"
        );
        partial.body.close();
    }
    LastFmError::Transport(error.0)
}
