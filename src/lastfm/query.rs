//! Request URL construction.
//!
//! Last.fm takes everything as query parameters on a single endpoint, so a
//! request is just the base URL plus `key=value` pairs. Keys and values are
//! percent-encoded individually; nothing is validated beyond that.

use std::collections::BTreeMap;

/// Default Last.fm API 2.0 endpoint
pub const DEFAULT_BASE_URL: &str = "http://ws.audioscrobbler.com/2.0/";

/// Query parameters for a request.
///
/// A `BTreeMap` keeps built URLs deterministic; ordering has no meaning upstream.
pub type Params = BTreeMap<String, String>;

/// Build a [`Params`] map from borrowed pairs
pub fn params<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Params {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Append percent-encoded `params` to `base_url`
pub fn build_query_url(base_url: &str, params: &Params) -> String {
    let query = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    let separator = if base_url.contains('?') {
        if base_url.ends_with('?') || base_url.ends_with('&') {
            ""
        } else {
            "&"
        }
    } else {
        "?"
    };

    format!("{base_url}{separator}{query}")
}

/// Merge the API key and method name into caller parameters.
///
/// `api_key` and `method` always win over caller-supplied values of the same name.
pub fn method_params(api_key: &str, method: &str, params: &Params) -> Params {
    let mut merged = params.clone();
    merged.insert("api_key".to_string(), api_key.to_string());
    merged.insert("method".to_string(), method.to_string());
    merged
}
