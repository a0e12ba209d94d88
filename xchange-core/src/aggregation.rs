//! Fan-out helpers over several adapters.

use crate::error::Result;
use crate::exchange::ArcExchange;
use crate::types::Balance;
use futures::future::try_join_all;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Fetches every adapter's balance concurrently, keyed by lowercase exchange id.
///
/// Fails as a whole if any single call fails.
#[instrument(name = "fetch_balances", skip(exchanges), fields(count = exchanges.len()))]
pub async fn fetch_balances(exchanges: &[ArcExchange]) -> Result<HashMap<String, Balance>> {
    let balances = try_join_all(exchanges.iter().map(|exchange| async move {
        let balance = exchange.fetch_balance().await?;
        debug!(exchange = exchange.id(), currencies = balance.len(), "Balance fetched");
        Ok::<_, crate::error::Error>((exchange.id().to_lowercase(), balance))
    }))
    .await?;
    Ok(balances.into_iter().collect())
}
