use crate::error::{Error, Result};
use crate::transport::{HttpRequest, Transport};
use async_trait::async_trait;
use reqwest::{Method, header::HeaderMap};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use super::builder::HttpClient;

impl HttpClient {
    /// Executes one HTTP request under the configured timeout.
    #[instrument(
        name = "http_fetch",
        skip(self, headers, body),
        fields(method = %method, url = %url, timeout_ms = %self.config().timeout.as_millis())
    )]
    pub async fn fetch(
        &self,
        url: &str,
        method: Method,
        headers: Option<HeaderMap>,
        body: Option<Value>,
    ) -> Result<Value> {
        let timeout = self.config().timeout;
        match tokio::time::timeout(timeout, self.fetch_once(url, method, headers, body)).await {
            Ok(result) => result,
            Err(_elapsed) => {
                warn!(
                    url = %url,
                    timeout_ms = %timeout.as_millis(),
                    "HTTP request timed out"
                );
                Err(Error::timeout(format!(
                    "Request to {url} timed out after {}ms",
                    timeout.as_millis()
                )))
            }
        }
    }

    async fn fetch_once(
        &self,
        url: &str,
        method: Method,
        headers: Option<HeaderMap>,
        body: Option<Value>,
    ) -> Result<Value> {
        let mut request = self.client().request(method, url);

        if let Some(headers) = headers {
            request = request.headers(headers);
        }

        if let Some(ref body) = body {
            let body_str = serde_json::to_string(body)
                .map_err(|e| Error::invalid_request(format!("JSON serialization failed: {e}")))?;

            if body_str.len() > self.config().max_request_size {
                return Err(Error::invalid_request(format!(
                    "Request body {} bytes exceeds limit {} bytes",
                    body_str.len(),
                    self.config().max_request_size
                )));
            }

            if self.config().verbose {
                debug!(body = %body_str, "HTTP request with body");
            }

            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body_str);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, "HTTP request send failed");
            Error::from(e)
        })?;

        self.process_response_with_limit(response, url).await
    }

    /// Executes a GET request.
    pub async fn get(&self, url: &str, headers: Option<HeaderMap>) -> Result<Value> {
        self.fetch(url, Method::GET, headers, None).await
    }

    /// Executes a POST request.
    pub async fn post(
        &self,
        url: &str,
        headers: Option<HeaderMap>,
        body: Option<Value>,
    ) -> Result<Value> {
        self.fetch(url, Method::POST, headers, body).await
    }

    /// Executes a PUT request.
    pub async fn put(
        &self,
        url: &str,
        headers: Option<HeaderMap>,
        body: Option<Value>,
    ) -> Result<Value> {
        self.fetch(url, Method::PUT, headers, body).await
    }

    /// Executes a DELETE request.
    pub async fn delete(
        &self,
        url: &str,
        headers: Option<HeaderMap>,
        body: Option<Value>,
    ) -> Result<Value> {
        self.fetch(url, Method::DELETE, headers, body).await
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn request(&self, request: HttpRequest) -> Result<Value> {
        let url = request.full_url();
        if self.config().verbose {
            debug!(method = %request.method, url = %url, signed = request.signed, "Dispatching request");
        }
        self.fetch(&url, request.method.into(), Some(request.headers), request.body)
            .await
    }
}
