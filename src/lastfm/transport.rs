//! HTTP transport abstraction.
//!
//! The client never talks to reqwest directly; it goes through [`Transport`]
//! so tests can substitute canned payloads for the real network.
//!
//! Response bodies are owned values. A body is either read to completion with
//! [`ResponseBody::read_all`] or released with [`ResponseBody::close`]; both
//! consume it, so a body can't be released twice.

use std::time::Duration;

use async_trait::async_trait;

/// Transport-level failure (connection, TLS, timeout, body read)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Body of an HTTP response
#[async_trait]
pub trait ResponseBody: Send {
    /// Read the remaining body into memory
    async fn read_all(self: Box<Self>) -> Result<Vec<u8>, TransportError>;

    /// Release the body without reading it
    fn close(self: Box<Self>);
}

/// An HTTP response as seen by the client
pub struct HttpResponse {
    pub status: u16,
    pub body: Box<dyn ResponseBody>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// A failed GET, possibly with whatever response was obtained before the failure
#[derive(Debug)]
pub struct TransportFailure {
    pub error: TransportError,
    pub partial: Option<HttpResponse>,
}

impl TransportFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: TransportError(message.into()),
            partial: None,
        }
    }

    pub fn with_partial(message: impl Into<String>, partial: HttpResponse) -> Self {
        Self {
            error: TransportError(message.into()),
            partial: Some(partial),
        }
    }
}

/// Capability to issue an HTTP GET.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportFailure>;
}

/// User agent string sent with every request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Production transport backed by reqwest
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the default user agent and no timeout
    pub fn new() -> Result<Self, TransportError> {
        Self::builder(USER_AGENT, None)
    }

    /// Create a transport with a custom user agent and optional request timeout
    ///
    /// The client accepts gzip-compressed responses.
    pub fn builder(user_agent: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().gzip(true).user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| TransportError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http_client })
    }

    /// Wrap an already configured reqwest client
    pub fn from_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportFailure> {
        // Non-2xx is not a transport failure: Last.fm sends error envelopes with 4xx codes.
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportFailure::new(e.to_string()))?;

        Ok(HttpResponse {
            status: response.status().as_u16(),
            body: Box::new(ReqwestBody(response)),
        })
    }
}

struct ReqwestBody(reqwest::Response);

#[async_trait]
impl ResponseBody for ReqwestBody {
    async fn read_all(self: Box<Self>) -> Result<Vec<u8>, TransportError> {
        self.0
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| TransportError(e.to_string()))
    }

    fn close(self: Box<Self>) {
        // Dropping the response releases the connection
        drop(self);
    }
}

/// Mock transport for testing.
///
/// Returns configurable responses for testing different scenarios.
#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory body that counts how often it was closed
    pub struct MockBody {
        pub data: Vec<u8>,
        pub closes: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ResponseBody for MockBody {
        async fn read_all(self: Box<Self>) -> Result<Vec<u8>, TransportError> {
            Ok(self.data.clone())
        }

        fn close(self: Box<Self>) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// What the mock answers with
    pub enum MockReply {
        Body { status: u16, data: Vec<u8> },
        Fail { message: String, partial: bool },
    }

    /// Mock transport that records requested URLs and replies with a fixed answer
    pub struct MockTransport {
        reply: MockReply,
        /// URLs passed to `get`, in call order
        pub requests: Mutex<Vec<String>>,
        /// Number of `close` calls across every body handed out
        pub closes: Arc<AtomicUsize>,
    }

    impl MockTransport {
        fn with_reply(reply: MockReply) -> Self {
            Self {
                reply,
                requests: Mutex::new(Vec::new()),
                closes: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Reply 200 with the given XML body
        pub fn ok(xml: &str) -> Self {
            Self::with_status(200, xml)
        }

        /// Reply with an arbitrary status and body
        pub fn with_status(status: u16, xml: &str) -> Self {
            Self::with_reply(MockReply::Body {
                status,
                data: xml.as_bytes().to_vec(),
            })
        }

        /// Fail without any response
        pub fn failing(message: &str) -> Self {
            Self::with_reply(MockReply::Fail {
                message: message.to_string(),
                partial: false,
            })
        }

        /// Fail, but hand back a partial response whose body must be closed
        pub fn failing_with_partial(message: &str) -> Self {
            Self::with_reply(MockReply::Fail {
                message: message.to_string(),
                partial: true,
            })
        }

        pub fn close_count(&self) -> usize {
            self.closes.load(Ordering::SeqCst)
        }

        pub fn last_url(&self) -> Option<String> {
            self.requests.lock().unwrap().last().cloned()
        }

        fn body(&self, data: Vec<u8>) -> Box<dyn ResponseBody> {
            Box::new(MockBody {
                data,
                closes: Arc::clone(&self.closes),
            })
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(&self, url: &str) -> Result<HttpResponse, TransportFailure> {
            self.requests.lock().unwrap().push(url.to_string());
            match &self.reply {
                MockReply::Body { status, data } => Ok(HttpResponse {
                    status: *status,
                    body: self.body(data.clone()),
                }),
                MockReply::Fail { message, partial } => {
                    if *partial {
                        let response = HttpResponse {
                            status: 502,
                            body: self.body(b"<html>Bad Gateway".to_vec()),
                        };
                        Err(TransportFailure::with_partial(message.clone(), response))
                    } else {
                        Err(TransportFailure::new(message.clone()))
                    }
                }
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_records_urls() {
            let mock = MockTransport::ok("<lfm status=\"ok\"/>");
            let response = mock.get("http://example.com/?a=1").await.unwrap();
            assert!(response.is_success());
            assert_eq!(mock.last_url().as_deref(), Some("http://example.com/?a=1"));

            let body = response.body.read_all().await.unwrap();
            assert_eq!(body, b"<lfm status=\"ok\"/>");
            assert_eq!(mock.close_count(), 0);
        }

        #[tokio::test]
        async fn test_mock_partial_failure() {
            let mock = MockTransport::failing_with_partial("reset by peer");
            let failure = mock.get("http://example.com/").await.unwrap_err();
            assert_eq!(failure.error, TransportError("reset by peer".to_string()));

            let partial = failure.partial.expect("partial response");
            assert_eq!(partial.status, 502);
            partial.body.close();
            assert_eq!(mock.close_count(), 1);
        }
    }
}
