//! lastfm-client - a typed client for the Last.fm web service.
//!
//! The library half builds authenticated query URLs, issues GETs through a
//! pluggable transport and decodes the XML responses. The `lastfm-client`
//! binary wraps it in a small CLI.

pub mod cli;
pub mod config;
pub mod error;
pub mod lastfm;
#[cfg(test)]
pub mod test_utils;

pub use lastfm::{LastFm, LastFmError, Method, Params, Payload};
