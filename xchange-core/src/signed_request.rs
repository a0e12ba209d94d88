//! Request signing seam.
//!
//! Each exchange family implements [`SigningStrategy`]. The endpoint layer builds a
//! [`SigningContext`] for every call to a signed namespace, lets the strategy stamp and sign
//! it, then hands the resulting query, body and headers to the transport unchanged.
//!
//! ```rust,ignore
//! let mut ctx = SigningContext::new(HttpMethod::Get, "https://api.binance.com/api/v3/account")?;
//! strategy.prepare_request(&mut ctx).await?;
//! let mut headers = HeaderMap::new();
//! strategy.add_auth_headers(&mut headers, &ctx)?;
//! ```

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::collections::BTreeMap;

/// HTTP request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    /// GET
    #[default]
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Uppercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Lowercase verb as used in endpoint catalogs.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Everything a signer may read or amend.
#[derive(Debug, Clone)]
pub struct SigningContext {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute request URL without query string.
    pub url: String,
    /// Path component of `url`, e.g. `/v1/account/balance`.
    pub path: String,
    /// Query parameters in the order they will be sent.
    pub params: Vec<(String, String)>,
    /// JSON body for POST/PUT.
    pub body: Option<Value>,
    /// Nonce or timestamp string as the exchange expects it.
    pub timestamp: String,
    /// Computed signature.
    pub signature: Option<String>,
}

impl SigningContext {
    /// Creates a context for `url`, deriving its path.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let path = url::Url::parse(&url)
            .map_err(|e| Error::invalid_request(format!("Invalid URL {url}: {e}")))?
            .path()
            .to_string();
        Ok(Self {
            method,
            url,
            path,
            params: Vec::new(),
            body: None,
            timestamp: String::new(),
            signature: None,
        })
    }

    /// Replaces the query parameters.
    #[must_use]
    pub fn with_params(mut self, params: &BTreeMap<String, String>) -> Self {
        self.params = params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    /// Appends a query parameter.
    pub fn push_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.push((key.into(), value.into()));
    }

    /// Serialized body as sent on the wire, or an empty string.
    pub fn body_string(&self) -> Result<String> {
        match &self.body {
            Some(body) => Ok(serde_json::to_string(body)?),
            None => Ok(String::new()),
        }
    }
}

/// Exchange-specific request signing.
#[async_trait]
pub trait SigningStrategy: Send + Sync {
    /// Stamps the request with a nonce and computes its signature.
    ///
    /// May append parameters (timestamp, signature) to `ctx.params`.
    async fn prepare_request(&self, ctx: &mut SigningContext) -> Result<()>;

    /// Adds authentication headers; called after [`prepare_request`](Self::prepare_request).
    fn add_auth_headers(&self, headers: &mut HeaderMap, ctx: &SigningContext) -> Result<()>;
}

/// Inserts a header, rejecting values that are not valid header text.
pub fn insert_header(headers: &mut HeaderMap, name: &'static str, value: &str) -> Result<()> {
    let value = HeaderValue::from_str(value)
        .map_err(|e| Error::invalid_request(format!("Invalid value for header {name}: {e}")))?;
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}

/// URL-encoded query string, in the given order.
pub fn build_query_string(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Query string without URL encoding.
pub fn build_query_string_raw(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}
