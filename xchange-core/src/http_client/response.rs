use crate::error::{Error, NetworkError, Result};
use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use super::builder::HttpClient;

const BODY_PREVIEW_SIZE: usize = 200;

impl HttpClient {
    #[instrument(name = "http_process_response", skip(self, response), fields(status, url = %url))]
    pub(crate) async fn process_response_with_limit(
        &self,
        response: Response,
        url: &str,
    ) -> Result<Value> {
        let status = response.status();
        let max_size = self.config().max_response_size;

        tracing::Span::current().record("status", status.as_u16());

        if let Some(content_length) = response.content_length()
            && content_length > max_size as u64
        {
            warn!(
                url = %url,
                content_length = content_length,
                max_size = max_size,
                "Response exceeds size limit (Content-Length check)"
            );
            return Err(Error::invalid_request(format!(
                "Response size {content_length} bytes exceeds limit {max_size} bytes"
            )));
        }

        let body_bytes = Self::stream_response_with_limit(response, url, max_size).await?;

        let result: Value = serde_json::from_slice(&body_bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body_bytes).to_string()));

        let preview_end = body_bytes.len().min(BODY_PREVIEW_SIZE);
        let body_preview = String::from_utf8_lossy(&body_bytes[..preview_end]).to_string();

        debug!(
            status = %status,
            body_length = body_bytes.len(),
            body_preview = %body_preview,
            "HTTP response received"
        );

        if !status.is_success() {
            let body_text = String::from_utf8_lossy(&body_bytes).to_string();
            let err = Self::handle_http_error(status, &body_text, result);
            error!(
                status = status.as_u16(),
                error = %err,
                "HTTP error response"
            );
            return Err(err);
        }

        Ok(result)
    }

    async fn stream_response_with_limit(
        response: Response,
        url: &str,
        max_size: usize,
    ) -> Result<Vec<u8>> {
        use futures_util::StreamExt;

        let initial_capacity = response
            .content_length()
            .and_then(|len| usize::try_from(len).ok())
            .map_or(64 * 1024, |len| len.min(max_size));

        let mut stream = response.bytes_stream();
        let mut body = Vec::with_capacity(initial_capacity);

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| {
                error!(error = %e, "Failed to read response chunk");
                Error::network(format!("Failed to read response chunk: {e}"))
            })?;

            if body.len().saturating_add(chunk.len()) > max_size {
                warn!(
                    url = %url,
                    max_size = max_size,
                    "Response exceeds size limit during streaming"
                );
                return Err(Error::invalid_request(format!(
                    "Response exceeds limit {max_size} bytes (streaming)"
                )));
            }

            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }

    fn handle_http_error(status: StatusCode, body: &str, result: Value) -> Error {
        let body_preview: String = body.chars().take(BODY_PREVIEW_SIZE).collect();

        match status {
            StatusCode::BAD_REQUEST => {
                info!(body_preview = %body_preview, "Bad request error");
                Error::invalid_request(crate::error::truncate_message(body.to_string()))
            }
            StatusCode::UNAUTHORIZED => {
                warn!("Authentication error: Unauthorized");
                Error::authentication("Unauthorized")
            }
            StatusCode::FORBIDDEN => {
                warn!("Authentication error: Forbidden");
                Error::authentication("Forbidden")
            }
            StatusCode::NOT_FOUND => {
                info!("Resource not found");
                Error::invalid_request("Not found")
            }
            StatusCode::GATEWAY_TIMEOUT => Error::from(NetworkError::Timeout),
            s if s.is_server_error() => {
                error!(body_preview = %body_preview, "Server error");
                Error::exchange_with_data(
                    s.as_u16().to_string(),
                    s.canonical_reason().unwrap_or("Server error"),
                    result,
                )
            }
            _ => Error::from(NetworkError::RequestFailed {
                status: status.as_u16(),
                message: crate::error::truncate_message(body.to_string()),
            }),
        }
    }
}
