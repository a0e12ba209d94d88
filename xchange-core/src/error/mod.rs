//! # Error handling for xchange
//!
//! Every fallible operation in the workspace returns [`Result<T>`], whose error side is the
//! [`Error`] enum defined here. The taxonomy mirrors the points at which an adapter call can
//! fail:
//!
//! ```text
//! Error
//! ├── Authentication  - a signed endpoint was reached without the required credentials
//! ├── Configuration   - an adapter was built with an inconsistent credential set
//! ├── MarketNotLoaded - the catalog was read before load_markets()
//! ├── MarketNotFound  - an unknown symbol, id or currency code was requested
//! ├── Parse           - a raw payload lacked a required field (malformed response)
//! ├── NotSupported    - the operation is not available for this exchange or argument set
//! ├── InvalidRequest  - a request could not be built (unfilled path placeholder, bad argument)
//! ├── Exchange        - the exchange answered with an error payload or status
//! ├── Network         - transport failure, passed through unchanged
//! ├── Timeout         - the request exceeded the configured timeout
//! └── Context         - any of the above wrapped with a description of the failing step
//! ```
//!
//! Validation errors (`Authentication`, `Configuration`, `InvalidRequest`) are raised before
//! any I/O happens. Parse errors abort the whole call, so a partially normalized record is
//! never returned.
//!
//! ## Example
//!
//! ```rust
//! use xchange_core::error::{ContextExt, Error, Result};
//!
//! fn lookup(symbol: &str) -> Result<()> {
//!     Err(Error::market_not_found(symbol.to_string()))
//! }
//!
//! let err = lookup("DOGE/EUR").context("Failed to fetch ticker").unwrap_err();
//! assert!(err.as_market_not_found().is_some());
//! println!("{}", err.report());
//! ```

mod context;
mod convert;
mod details;
mod network;
mod parse;

use std::borrow::Cow;
use std::error::Error as StdError;
use thiserror::Error;

pub use context::ContextExt;
pub use details::ExchangeErrorDetails;
pub use network::NetworkError;
pub use parse::ParseError;

pub(crate) use convert::truncate_message;

/// Result type alias for all xchange operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The primary error type.
///
/// Large variants are boxed and messages use `Cow<'static, str>` so that static messages do
/// not allocate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Exchange-specific errors returned by the exchange API.
    #[error("Exchange error: {0}")]
    Exchange(Box<ExchangeErrorDetails>),

    /// Network-related errors encapsulating transport layer issues.
    #[error("Network error: {0}")]
    Network(Box<NetworkError>),

    /// Required credentials are missing or were rejected.
    #[error("Authentication error: {0}")]
    Authentication(Cow<'static, str>),

    /// The adapter configuration is inconsistent.
    #[error("Configuration error: {0}")]
    Configuration(Cow<'static, str>),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(Cow<'static, str>),

    /// The market catalog was accessed before it was loaded.
    #[error("{0} markets not loaded")]
    MarketNotLoaded(Cow<'static, str>),

    /// Unknown market symbol, market id or currency code.
    #[error("Market not found: {0}")]
    MarketNotFound(Cow<'static, str>),

    /// Errors during response parsing.
    #[error("Parse error: {0}")]
    Parse(Box<ParseError>),

    /// The operation is not supported by this exchange.
    #[error("Not supported: {0}")]
    NotSupported(Cow<'static, str>),

    /// Operation timeout.
    #[error("Timeout: {0}")]
    Timeout(Cow<'static, str>),

    /// Error with additional context, preserving the error chain.
    #[error("{context}")]
    Context {
        /// Context message describing what operation failed
        context: String,
        /// The underlying error
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Creates a new exchange error.
    pub fn exchange(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Exchange(Box::new(ExchangeErrorDetails::new(code, message)))
    }

    /// Creates a new exchange error carrying the raw response.
    pub fn exchange_with_data(
        code: impl Into<String>,
        message: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self::Exchange(Box::new(ExchangeErrorDetails::with_data(
            code, message, data,
        )))
    }

    /// Creates an authentication error.
    pub fn authentication(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Creates a configuration error.
    pub fn configuration(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a network error from a message.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(Box::new(NetworkError::ConnectionFailed(msg.into())))
    }

    /// Creates a "markets not loaded" error for the given exchange id.
    pub fn market_not_loaded(exchange_id: impl Into<Cow<'static, str>>) -> Self {
        Self::MarketNotLoaded(exchange_id.into())
    }

    /// Creates a market not found error.
    pub fn market_not_found(symbol: impl Into<Cow<'static, str>>) -> Self {
        Self::MarketNotFound(symbol.into())
    }

    /// Creates a bad symbol error for an exchange that does not list the symbol.
    pub fn bad_symbol(exchange_id: &str, symbol: &str) -> Self {
        Self::MarketNotFound(Cow::Owned(format!(
            "{exchange_id} does not have market symbol {symbol}"
        )))
    }

    /// Creates a not supported error.
    pub fn not_supported(feature: impl Into<Cow<'static, str>>) -> Self {
        Self::NotSupported(feature.into())
    }

    /// Creates an invalid request error.
    pub fn invalid_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Creates a malformed-response error for a payload missing a required field.
    pub fn malformed(field: &'static str) -> Self {
        Self::Parse(Box::new(ParseError::missing_field(field)))
    }

    /// Creates a timeout error.
    pub fn timeout(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Attaches context to an existing error.
    ///
    /// ```rust
    /// use xchange_core::error::Error;
    ///
    /// let err = Error::network("Connection refused").context("Failed to fetch ticker");
    /// assert!(err.report().contains("Connection refused"));
    /// ```
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    fn iter_chain(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |err| match err {
            Error::Context { source, .. } => Some(source.as_ref()),
            _ => None,
        })
    }

    /// Returns the root cause of the error, skipping Context layers.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        self.iter_chain().last().unwrap_or(self)
    }

    /// Generates a report with the full chain, one cause per line.
    #[must_use]
    pub fn report(&self) -> String {
        use std::fmt::Write;
        let mut report = String::new();
        report.push_str(&self.to_string());

        let mut current: Option<&(dyn StdError + 'static)> = self.source();
        while let Some(err) = current {
            let _ = write!(report, "\nCaused by: {err}");
            current = err.source();
        }
        report
    }

    /// Checks if this error is transient (penetrates Context layers).
    ///
    /// The library never retries on its own; callers use this to decide.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self.root_cause() {
            Error::Network(ne) => matches!(
                ne.as_ref(),
                NetworkError::Timeout | NetworkError::ConnectionFailed(_)
            ),
            Error::Timeout(_) => true,
            _ => false,
        }
    }

    /// Returns the message if this is an authentication error (penetrates Context layers).
    #[must_use]
    pub fn as_authentication(&self) -> Option<&str> {
        match self.root_cause() {
            Error::Authentication(msg) => Some(msg.as_ref()),
            _ => None,
        }
    }

    /// Returns the message if this is a market-not-found error (penetrates Context layers).
    #[must_use]
    pub fn as_market_not_found(&self) -> Option<&str> {
        match self.root_cause() {
            Error::MarketNotFound(msg) => Some(msg.as_ref()),
            _ => None,
        }
    }

    /// Returns the parse error if this is a malformed response (penetrates Context layers).
    #[must_use]
    pub fn as_parse(&self) -> Option<&ParseError> {
        match self.root_cause() {
            Error::Parse(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    /// Returns the message if this is a not-supported error (penetrates Context layers).
    #[must_use]
    pub fn as_not_supported(&self) -> Option<&str> {
        match self.root_cause() {
            Error::NotSupported(msg) => Some(msg.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests;
