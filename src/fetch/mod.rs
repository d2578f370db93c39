// src/fetch/mod.rs

pub mod urls;
pub mod zips;

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::error::Result;

/// Blocking "bytes from a URL" capability.
///
/// The pipeline needs exactly one network primitive: GET a URL and hand
/// back the body, failing on any non-success status. Keeping it behind a
/// trait lets the cache gate and the download operations be driven by a
/// counting stub in tests.
pub trait Fetcher {
    fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>>;
}

/// Production fetcher over a blocking reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        debug!(%url, "GET");
        let resp = self.client.get(url.clone()).send()?.error_for_status()?;
        Ok(resp.bytes()?.to_vec())
    }
}
