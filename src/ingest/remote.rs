//! HTTP client for databases published at a URL.

use super::lines::{read_transactions, LineFormat};
use crate::store::TransactionStore;
use crate::utils::config::DEFAULT_FETCH_TIMEOUT;
use crate::utils::error::IngestError;
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::Url;
use std::io::Cursor;
use std::path::Path;

/// Blocking client that downloads a line-oriented database
pub struct RemoteClient {
    client: Client,
}

impl RemoteClient {
    /// Create a new client with the default timeout
    pub fn new() -> Result<Self, IngestError> {
        let client = Client::builder()
            .timeout(DEFAULT_FETCH_TIMEOUT)
            .build()
            .map_err(IngestError::FetchFailed)?;

        Ok(Self { client })
    }

    /// Fetch `url` and parse it line by line
    pub fn fetch(
        &self,
        url: &Url,
        separator: &str,
        format: LineFormat,
    ) -> Result<TransactionStore, IngestError> {
        info!("Fetching database from: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(IngestError::FetchFailed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(IngestError::FetchFailed)?;
        debug!("Downloaded {} bytes", body.len());

        read_transactions(Cursor::new(body), separator, format, Path::new(url.as_str()))
    }
}

/// Parse `input` as a remote location if it is an http(s) URL
pub fn parse_remote(input: &str) -> Option<Url> {
    Url::parse(input)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}
