//! Transport seam between the endpoint table and the network.
//!
//! The endpoint layer never touches `reqwest` directly. It hands a fully built
//! [`HttpRequest`] to a [`Transport`]; [`HttpClient`](crate::http_client::HttpClient) is the
//! default implementation and tests substitute their own.

use crate::error::Result;
use crate::signed_request::HttpMethod;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::fmt;

/// A request ready to be sent.
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL without query string
    pub url: String,
    /// Query parameters, sent in this order
    pub params: Vec<(String, String)>,
    /// JSON body
    pub body: Option<Value>,
    /// Headers, including authentication headers for signed calls
    pub headers: HeaderMap,
    /// Whether the request was signed
    pub signed: bool,
}

impl HttpRequest {
    /// URL with the encoded query string appended.
    pub fn full_url(&self) -> String {
        let query = crate::signed_request::build_query_string(&self.params);
        if query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{query}", self.url)
        }
    }
}

/// Performs HTTP calls and returns the decoded body.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends the request; HTTP error statuses map onto the error taxonomy.
    async fn request(&self, request: HttpRequest) -> Result<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url() {
        let mut request = HttpRequest {
            url: "https://api.binance.com/api/v1/depth".to_string(),
            ..HttpRequest::default()
        };
        assert_eq!(request.full_url(), "https://api.binance.com/api/v1/depth");
        request.params.push(("symbol".into(), "ETHBTC".into()));
        request.params.push(("limit".into(), "100".into()));
        assert_eq!(
            request.full_url(),
            "https://api.binance.com/api/v1/depth?symbol=ETHBTC&limit=100"
        );
    }
}
