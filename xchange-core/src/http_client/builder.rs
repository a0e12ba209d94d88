use crate::error::{Error, Result};
use reqwest::Client;

use super::config::HttpConfig;

/// reqwest client plus its settings
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpConfig,
}

impl HttpClient {
    /// Builds the underlying reqwest client.
    pub fn new(config: HttpConfig) -> Result<Self> {
        if config.timeout.is_zero() {
            return Err(Error::configuration("timeout cannot be zero"));
        }
        if config.connect_timeout.is_zero() {
            return Err(Error::configuration("connect_timeout cannot be zero"));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Settings in use.
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}
