//! Binance signing strategy.
//!
//! Handles Binance-specific signing requirements:
//! - Millisecond timestamp, shifted by the server clock offset when enabled
//! - HMAC-SHA256 over the urlencoded query plus `timestamp`, hex encoded
//! - `timestamp` then `signature` appended last to the query
//! - `X-MBX-APIKEY` header

use super::time_sync::TimeDifference;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::sync::Arc;
use xchange_core::auth::{DigestFormat, HashAlgorithm, hmac_sign};
use xchange_core::base_exchange::ExchangeConfig;
use xchange_core::credentials::SecretString;
use xchange_core::error::{Error, Result};
use xchange_core::nonce::{NonceSource, StrictlyIncreasing};
use xchange_core::signed_request::{
    SigningContext, SigningStrategy, build_query_string, insert_header,
};

/// Signs `private` and `wapi` requests.
#[derive(Debug)]
pub struct BinanceSigningStrategy {
    api_key: Option<SecretString>,
    secret: Option<SecretString>,
    nonce: Arc<dyn NonceSource>,
    time_difference: Arc<TimeDifference>,
    adjust_for_time_difference: bool,
    issued: StrictlyIncreasing,
}

impl BinanceSigningStrategy {
    /// Creates a strategy from the configured credentials.
    pub fn new(
        config: &ExchangeConfig,
        nonce: Arc<dyn NonceSource>,
        time_difference: Arc<TimeDifference>,
    ) -> Self {
        Self {
            api_key: config.api_key.clone(),
            secret: config.secret.clone(),
            nonce,
            time_difference,
            adjust_for_time_difference: config.adjust_for_time_difference,
            issued: StrictlyIncreasing::new(),
        }
    }

    /// A re-measured offset may shift the clock back, so adjusted timestamps pass through
    /// a guard that keeps them strictly increasing.
    fn timestamp(&self) -> i64 {
        let nonce = self.nonce.next_nonce();
        if self.adjust_for_time_difference {
            self.issued.issue(self.time_difference.adjust(nonce))
        } else {
            nonce
        }
    }
}

#[async_trait]
impl SigningStrategy for BinanceSigningStrategy {
    async fn prepare_request(&self, ctx: &mut SigningContext) -> Result<()> {
        let secret = self
            .secret
            .as_ref()
            .ok_or_else(|| Error::authentication("binance requires `secret`"))?;

        ctx.timestamp = self.timestamp().to_string();
        ctx.push_param("timestamp", ctx.timestamp.clone());

        let payload = build_query_string(&ctx.params);
        let signature = hmac_sign(
            &payload,
            secret.expose_secret(),
            HashAlgorithm::Sha256,
            DigestFormat::Hex,
        )?;

        ctx.push_param("signature", signature.clone());
        ctx.signature = Some(signature);
        Ok(())
    }

    fn add_auth_headers(&self, headers: &mut HeaderMap, _ctx: &SigningContext) -> Result<()> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| Error::authentication("binance requires `apiKey`"))?;
        insert_header(headers, "x-mbx-apikey", api_key.expose_secret())
    }
}
