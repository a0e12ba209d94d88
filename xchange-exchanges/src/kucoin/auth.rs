//! Kucoin signing strategy.
//!
//! The string to sign is `base64(path + "/" + nonce + "/" + query)` with the query sorted by
//! key; the signature is its hex HMAC-SHA256.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::sync::Arc;
use xchange_core::auth::{DigestFormat, HashAlgorithm, base64_encode, hmac_sign};
use xchange_core::base_exchange::ExchangeConfig;
use xchange_core::credentials::SecretString;
use xchange_core::error::{Error, Result};
use xchange_core::nonce::NonceSource;
use xchange_core::signed_request::{
    SigningContext, SigningStrategy, build_query_string, insert_header,
};

/// Signs `private` requests.
#[derive(Debug)]
pub struct KucoinSigningStrategy {
    api_key: Option<SecretString>,
    secret: Option<SecretString>,
    nonce: Arc<dyn NonceSource>,
}

impl KucoinSigningStrategy {
    /// Creates a strategy from the configured credentials.
    pub fn new(config: &ExchangeConfig, nonce: Arc<dyn NonceSource>) -> Self {
        Self {
            api_key: config.api_key.clone(),
            secret: config.secret.clone(),
            nonce,
        }
    }
}

#[async_trait]
impl SigningStrategy for KucoinSigningStrategy {
    async fn prepare_request(&self, ctx: &mut SigningContext) -> Result<()> {
        let secret = self
            .secret
            .as_ref()
            .ok_or_else(|| Error::authentication("kucoin requires `secret`"))?;

        ctx.params.sort_by(|a, b| a.0.cmp(&b.0));
        ctx.timestamp = self.nonce.next_nonce().to_string();

        let query = build_query_string(&ctx.params);
        let payload = base64_encode(format!("{}/{}/{}", ctx.path, ctx.timestamp, query).as_bytes());
        let signature = hmac_sign(
            &payload,
            secret.expose_secret(),
            HashAlgorithm::Sha256,
            DigestFormat::Hex,
        )?;
        ctx.signature = Some(signature);
        Ok(())
    }

    fn add_auth_headers(&self, headers: &mut HeaderMap, ctx: &SigningContext) -> Result<()> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| Error::authentication("kucoin requires `apiKey`"))?;
        let signature = ctx
            .signature
            .as_deref()
            .ok_or_else(|| Error::authentication("kucoin request was not signed"))?;
        insert_header(headers, "kc-api-key", api_key.expose_secret())?;
        insert_header(headers, "kc-api-nonce", &ctx.timestamp)?;
        insert_header(headers, "kc-api-signature", signature)
    }
}
