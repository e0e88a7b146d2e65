//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`LastFmError`](crate::lastfm::LastFmError), [`ConfigError`]), while the
//! CLI entry point uses `anyhow` for convenient error propagation.
//!
//! # Example
//!
//! ```ignore
//! use lastfm_client::error::{Error, Result, ResultExt};
//!
//! async fn show(client: &LastFm, params: &Params) -> Result<()> {
//!     let recent = client.recent_tracks(params).await.with_context("fetching scrobbles")?;
//!     Ok(())
//! }
//! ```

use crate::config::ConfigError;
use crate::lastfm::LastFmError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Web service error
    #[error("Last.fm error: {0}")]
    LastFm(#[from] LastFmError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No API key on the command line, in the environment or in the config file
    #[error("No Last.fm API key configured")]
    MissingApiKey,

    /// Output serialization error
    #[error("Failed to format output: {0}")]
    Output(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// Whether Last.fm itself rejected the request (as opposed to a network or parse failure)
    pub fn is_upstream(&self) -> bool {
        match self {
            Self::LastFm(e) => e.is_upstream(),
            Self::WithContext { source, .. } => source.is_upstream(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, LastFmError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::LastFm(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, ConfigError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Config(e).context(ctx))
    }
}
