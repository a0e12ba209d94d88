//! Gdax signing strategy.
//!
//! Gdax signs `timestamp + METHOD + path[?query] + body` with the base64-decoded secret and
//! sends the base64 signature alongside key, timestamp and passphrase headers:
//! - `CB-ACCESS-KEY`
//! - `CB-ACCESS-SIGN`
//! - `CB-ACCESS-TIMESTAMP`: seconds with millisecond decimals
//! - `CB-ACCESS-PASSPHRASE`

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::sync::Arc;
use xchange_core::auth::{DigestFormat, HashAlgorithm, base64_decode, hmac_sign_bytes};
use xchange_core::base_exchange::ExchangeConfig;
use xchange_core::credentials::SecretString;
use xchange_core::error::{Error, Result};
use xchange_core::nonce::NonceSource;
use xchange_core::signed_request::{
    SigningContext, SigningStrategy, build_query_string, insert_header,
};

/// Signs `private` requests.
///
/// Credentials are zeroed from memory when the strategy is dropped.
#[derive(Debug)]
pub struct GdaxSigningStrategy {
    api_key: Option<SecretString>,
    secret: Option<SecretString>,
    password: Option<SecretString>,
    nonce: Arc<dyn NonceSource>,
}

impl GdaxSigningStrategy {
    /// Creates a strategy from the configured credentials.
    pub fn new(config: &ExchangeConfig, nonce: Arc<dyn NonceSource>) -> Self {
        Self {
            api_key: config.api_key.clone(),
            secret: config.secret.clone(),
            password: config.password.clone(),
            nonce,
        }
    }

    fn required<'a>(value: Option<&'a SecretString>, name: &str) -> Result<&'a str> {
        value
            .map(SecretString::expose_secret)
            .ok_or_else(|| Error::authentication(format!("gdax requires `{name}`")))
    }
}

/// Millisecond nonce rendered as seconds with three decimals.
fn seconds_timestamp(nonce_ms: i64) -> String {
    format!("{}.{:03}", nonce_ms.div_euclid(1000), nonce_ms.rem_euclid(1000))
}

#[async_trait]
impl SigningStrategy for GdaxSigningStrategy {
    async fn prepare_request(&self, ctx: &mut SigningContext) -> Result<()> {
        let secret = Self::required(self.secret.as_ref(), "secret")?;
        ctx.timestamp = seconds_timestamp(self.nonce.next_nonce());

        let mut request_path = ctx.path.clone();
        if !ctx.params.is_empty() {
            request_path.push('?');
            request_path.push_str(&build_query_string(&ctx.params));
        }
        let prehash = format!(
            "{}{}{}{}",
            ctx.timestamp,
            ctx.method.as_str(),
            request_path,
            ctx.body_string()?
        );

        let key = base64_decode(secret)?;
        let signature = hmac_sign_bytes(
            prehash.as_bytes(),
            &key,
            HashAlgorithm::Sha256,
            DigestFormat::Base64,
        )?;
        ctx.signature = Some(signature);
        Ok(())
    }

    fn add_auth_headers(&self, headers: &mut HeaderMap, ctx: &SigningContext) -> Result<()> {
        let signature = ctx
            .signature
            .as_deref()
            .ok_or_else(|| Error::authentication("gdax request was not signed"))?;
        insert_header(headers, "cb-access-key", Self::required(self.api_key.as_ref(), "apiKey")?)?;
        insert_header(headers, "cb-access-sign", signature)?;
        insert_header(headers, "cb-access-timestamp", &ctx.timestamp)?;
        insert_header(
            headers,
            "cb-access-passphrase",
            Self::required(self.password.as_ref(), "password")?,
        )
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use serde_json::json;
    use xchange_core::auth::base64_encode;
    use xchange_core::nonce::FixedNonce;
    use xchange_core::signed_request::HttpMethod;

    fn secret() -> String {
        base64_encode(b"gdax-test-secret")
    }

    fn strategy(nonce: i64) -> GdaxSigningStrategy {
        let config = ExchangeConfig::builder()
            .api_key("key")
            .secret(secret())
            .password("pass")
            .build();
        GdaxSigningStrategy::new(&config, Arc::new(FixedNonce(nonce)))
    }

    #[test]
    fn test_seconds_timestamp() {
        assert_eq!(seconds_timestamp(1_500_000_000_123), "1500000000.123");
        assert_eq!(seconds_timestamp(1_500_000_000_005), "1500000000.005");
    }

    #[tokio::test]
    async fn test_prehash_includes_query_and_body() {
        let mut ctx = SigningContext::new(HttpMethod::Post, "https://api.gdax.com/orders").unwrap();
        ctx.push_param("product_id", "BTC-USD");
        ctx.body = Some(json!({"size": "1"}));
        strategy(1_500_000_000_000).prepare_request(&mut ctx).await.unwrap();

        let expected = hmac_sign_bytes(
            br#"1500000000.000POST/orders?product_id=BTC-USD{"size":"1"}"#,
            b"gdax-test-secret",
            HashAlgorithm::Sha256,
            DigestFormat::Base64,
        )
        .unwrap();
        assert_eq!(ctx.signature.as_deref(), Some(expected.as_str()));
        assert_eq!(ctx.timestamp, "1500000000.000");
        assert_eq!(ctx.params.len(), 1);
    }

    #[tokio::test]
    async fn test_headers() {
        let strategy = strategy(2_000);
        let mut ctx = SigningContext::new(HttpMethod::Get, "https://api.gdax.com/accounts").unwrap();
        strategy.prepare_request(&mut ctx).await.unwrap();
        let mut headers = HeaderMap::new();
        strategy.add_auth_headers(&mut headers, &ctx).unwrap();
        assert_eq!(headers.get("CB-ACCESS-KEY").unwrap(), "key");
        assert_eq!(headers.get("CB-ACCESS-TIMESTAMP").unwrap(), "2.000");
        assert_eq!(headers.get("CB-ACCESS-PASSPHRASE").unwrap(), "pass");
        assert!(headers.contains_key("cb-access-sign"));
    }

    #[tokio::test]
    async fn test_secret_must_be_base64() {
        let config = ExchangeConfig::builder()
            .api_key("key")
            .secret("not base64!")
            .password("pass")
            .build();
        let strategy = GdaxSigningStrategy::new(&config, Arc::new(FixedNonce(1)));
        let mut ctx = SigningContext::new(HttpMethod::Get, "https://api.gdax.com/accounts").unwrap();
        let err = strategy.prepare_request(&mut ctx).await.unwrap_err();
        assert!(err.as_authentication().is_some());
    }
}
