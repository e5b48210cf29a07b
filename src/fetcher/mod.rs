pub mod http_fetcher;

use async_trait::async_trait;
use thiserror::Error;

pub use http_fetcher::HttpFeedClient;

/// Transport-level failure of a single feed request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("could not resolve host: {0}")]
    HostLookup(String),

    #[error("could not connect: {0}")]
    Connect(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Source of raw feed bytes.
///
/// One call is one attempt: implementations do not retry and do not cache.
#[async_trait]
pub trait FeedClient {
    async fn fetch(&self) -> std::result::Result<Vec<u8>, FetchError>;
}
