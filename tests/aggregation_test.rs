//! Fan-out balance aggregation across adapters.
#![allow(clippy::disallowed_methods)]

use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xchange::prelude::*;
use xchange::{ArcExchange, Binance, Gdax};
use xchange_core::aggregation::fetch_balances;

async fn binance(server: &MockServer) -> ArcExchange {
    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "balances": [{"asset": "BTC", "free": "1.0", "locked": "0.5"}]
        })))
        .mount(server)
        .await;
    let config = ExchangeConfig::builder()
        .api_key("key")
        .secret("secret")
        .url_override("private", server.uri())
        .build();
    Arc::new(Binance::new(config).unwrap())
}

fn gdax(server: &MockServer) -> ArcExchange {
    let config = ExchangeConfig::builder()
        .api_key("key")
        .secret("Z2RheC1zZWNyZXQ=")
        .password("passphrase")
        .url_override("private", server.uri())
        .build();
    Arc::new(Gdax::new(config).unwrap())
}

#[tokio::test]
async fn test_balances_keyed_by_exchange_id() {
    let binance_server = MockServer::start().await;
    let gdax_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"currency": "USD", "balance": "100.0", "available": "90.0", "hold": "10.0"}
        ])))
        .mount(&gdax_server)
        .await;

    let exchanges = vec![binance(&binance_server).await, gdax(&gdax_server)];
    let balances = fetch_balances(&exchanges).await.unwrap();

    assert_eq!(balances.len(), 2);
    assert_eq!(balances["binance"].total["BTC"], dec!(1.5));
    assert_eq!(balances["gdax"].used["USD"], dec!(10));
}

#[tokio::test]
async fn test_one_failure_fails_the_whole_aggregate() {
    let binance_server = MockServer::start().await;
    let gdax_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&gdax_server)
        .await;

    let exchanges = vec![binance(&binance_server).await, gdax(&gdax_server)];
    let err = fetch_balances(&exchanges).await.unwrap_err();
    assert!(err.as_authentication().is_some());
}
