use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::app::{QuakeError, Result};
use crate::config::FeedConfig;
use crate::fetcher::{FeedClient, FetchError};

pub struct HttpFeedClient {
    client: Client,
    url: Url,
    timeout: Duration,
}

impl HttpFeedClient {
    /// Builds a client for the configured feed URL.
    ///
    /// The URL is fixed for the lifetime of the client, so a malformed one
    /// is rejected here instead of surfacing on every fetch.
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let url = Url::parse(&config.url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(QuakeError::UnsupportedScheme(url.scheme().to_string()));
        }

        let timeout = config.timeout();
        let mut builder = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str());
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    async fn fetch(&self) -> std::result::Result<Vec<u8>, FetchError> {
        debug!(url = %self.url, timeout = ?self.timeout, "Requesting earthquake feed");

        let response = self.client.get(self.url.clone()).send().await?;

        // Exactly 200; any other status, other 2xx codes included, is a failure.
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Received earthquake feed");

        Ok(body.to_vec())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return FetchError::Timeout;
        }

        let chain = error_chain(&err);
        if err.is_connect() {
            if is_dns_failure(&chain) {
                FetchError::HostLookup(chain)
            } else {
                FetchError::Connect(chain)
            }
        } else {
            FetchError::Transport(chain)
        }
    }
}

/// Flattens an error and its sources into one line.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Resolver failures only show up in the error text; hyper does not expose
/// a dedicated kind for them.
fn is_dns_failure(chain: &str) -> bool {
    let lower = chain.to_lowercase();
    [
        "dns error",
        "failed to lookup address",
        "name or service not known",
        "no such host",
        "nodename nor servname",
    ]
    .iter()
    .any(|needle| lower.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn config_for(url: &str, timeout_secs: u64) -> FeedConfig {
        FeedConfig {
            url: url.to_string(),
            timeout_secs,
            use_env_proxy: false,
            ..FeedConfig::default()
        }
    }

    /// Serves exactly one canned HTTP response and returns the URL to hit.
    async fn serve_once(status_line: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}/summary/all_day.geojson", addr)
    }

    #[test]
    fn test_rejects_malformed_url() {
        let result = HttpFeedClient::new(&config_for("not a url", 5));
        assert!(matches!(result, Err(QuakeError::InvalidUrl(_))));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let result = HttpFeedClient::new(&config_for("ftp://example.com/feed", 5));
        assert!(matches!(result, Err(QuakeError::UnsupportedScheme(s)) if s == "ftp"));
    }

    #[tokio::test]
    async fn test_fetch_returns_body_on_200() {
        let url = serve_once("200 OK", r#"{"features":[]}"#).await;
        let client = HttpFeedClient::new(&config_for(&url, 5)).unwrap();

        let body = client.fetch().await.unwrap();
        assert_eq!(body, br#"{"features":[]}"#.to_vec());
    }

    #[tokio::test]
    async fn test_fetch_rejects_503() {
        let url = serve_once("503 Service Unavailable", "").await;
        let client = HttpFeedClient::new(&config_for(&url, 5)).unwrap();

        assert_eq!(client.fetch().await, Err(FetchError::Status(503)));
    }

    #[tokio::test]
    async fn test_fetch_rejects_other_success_codes() {
        let url = serve_once("202 Accepted", r#"{"features":[]}"#).await;
        let client = HttpFeedClient::new(&config_for(&url, 5)).unwrap();

        assert_eq!(client.fetch().await, Err(FetchError::Status(202)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Grab a free port, then close it so nothing is listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{}/feed", addr);
        let client = HttpFeedClient::new(&config_for(&url, 5)).unwrap();

        assert!(matches!(client.fetch().await, Err(FetchError::Connect(_))));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let url = format!("http://{}/feed", addr);
        let client = HttpFeedClient::new(&config_for(&url, 1)).unwrap();

        assert_eq!(client.fetch().await, Err(FetchError::Timeout));
    }

    #[test]
    fn test_dns_failure_detection() {
        assert!(is_dns_failure(
            "error sending request: client error (Connect): dns error: failed to lookup address information"
        ));
        assert!(is_dns_failure("No such host is known. (os error 11001)"));
        assert!(!is_dns_failure("tcp connect error: Connection refused (os error 111)"));
    }
}
