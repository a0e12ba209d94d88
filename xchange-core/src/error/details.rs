//! Details carried by [`Error::Exchange`](crate::error::Error::Exchange).

use serde_json::Value;

/// Code, message and optional raw body of an exchange-reported failure.
///
/// ```rust
/// use xchange_core::error::ExchangeErrorDetails;
///
/// let details = ExchangeErrorDetails::new("-1121", "Invalid symbol.");
/// assert_eq!(details.code, "-1121");
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub struct ExchangeErrorDetails {
    /// Error code as reported (numeric or alphanumeric).
    pub code: String,
    /// Descriptive message from the exchange.
    pub message: String,
    /// Optional raw response data.
    pub data: Option<Value>,
}

impl ExchangeErrorDetails {
    /// Creates details from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }

    /// Creates details that keep the raw response.
    pub fn with_data(code: impl Into<String>, message: impl Into<String>, data: Value) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: Some(data),
        }
    }
}

impl std::fmt::Display for ExchangeErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)
    }
}
