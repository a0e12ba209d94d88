use crate::base_exchange::ExchangeConfig;
use std::time::Duration;

/// HTTP client settings
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Total time allowed for one request
    pub timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Log request bodies at debug level
    pub verbose: bool,
    /// User agent header
    pub user_agent: String,
    /// Maximum response body size in bytes
    pub max_response_size: usize,
    /// Maximum request body size in bytes
    pub max_request_size: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            verbose: false,
            user_agent: format!("xchange/{}", env!("CARGO_PKG_VERSION")),
            max_response_size: 10 * 1024 * 1024,
            max_request_size: 10 * 1024 * 1024,
        }
    }
}

impl From<&ExchangeConfig> for HttpConfig {
    fn from(config: &ExchangeConfig) -> Self {
        Self {
            timeout: config.timeout,
            connect_timeout: config.connect_timeout,
            verbose: config.verbose,
            ..Self::default()
        }
    }
}
