use std::sync::Arc;

use crate::app::Result;
use crate::config::{Config, FeedConfig};
use crate::fetcher::{FeedClient, HttpFeedClient};
use crate::store::EarthquakeStore;

/// Wires the feed client and the store for one session.
pub struct AppContext {
    pub feed: FeedConfig,
    pub store: Arc<EarthquakeStore>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let client = HttpFeedClient::new(&config.feed)?;
        Ok(Self::with_client(config.feed, Arc::new(client)))
    }

    pub fn with_client(feed: FeedConfig, client: Arc<dyn FeedClient + Send + Sync>) -> Self {
        Self {
            feed,
            store: Arc::new(EarthquakeStore::new(client)),
        }
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.store.close();
    }
}
