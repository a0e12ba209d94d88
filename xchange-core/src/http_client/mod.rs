//! Default reqwest-backed transport
//!
//! One `tokio::time::timeout` bounds each call; there is no retry. Response bodies are
//! streamed against a size cap, decoded as JSON when possible, and non-success statuses are
//! mapped onto [`Error`](crate::error::Error) variants.
//!
//! # Example
//!
//! ```rust,no_run
//! use xchange_core::http_client::{HttpClient, HttpConfig};
//!
//! # async fn run() -> xchange_core::Result<()> {
//! let client = HttpClient::new(HttpConfig::default())?;
//! let time = client.get("https://api.binance.com/api/v1/time", None).await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;
mod request;
mod response;


pub use builder::HttpClient;
pub use config::HttpConfig;
