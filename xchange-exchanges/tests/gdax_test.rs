//! Gdax adapter against a mocked REST API.
#![allow(clippy::disallowed_methods)]

use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xchange_core::nonce::FixedNonce;
use xchange_core::{Exchange, ExchangeConfig, OrderSide, OrderStatus};
use xchange_exchanges::gdax::Gdax;

async fn mount_products(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "BTC-USD",
                "base_currency": "BTC",
                "quote_currency": "USD",
                "base_min_size": "0.01",
                "base_max_size": "10000.00",
                "quote_increment": "0.01",
                "status": "online"
            },
            {
                "id": "ETH-BTC",
                "base_currency": "ETH",
                "quote_currency": "BTC",
                "base_min_size": "0.01",
                "base_max_size": "600",
                "quote_increment": "0.00001",
                "status": "offline"
            }
        ])))
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> Gdax {
    let config = ExchangeConfig::builder()
        .api_key("key")
        .secret("Z2RheC1zZWNyZXQ=")
        .password("passphrase")
        .url_override("public", server.uri())
        .url_override("private", server.uri())
        .build();
    Gdax::with_nonce(config, Arc::new(FixedNonce(1_500_000_000_000))).unwrap()
}

#[tokio::test]
async fn test_load_markets() {
    let server = MockServer::start().await;
    mount_products(&server).await;
    let markets = client(&server).load_markets(false).await.unwrap();

    let btc_usd = &markets["BTC/USD"];
    assert!(btc_usd.active);
    assert_eq!(btc_usd.precision.price, Some(2));
    assert_eq!(btc_usd.taker, Some(dec!(0.0025)));

    let eth_btc = &markets["ETH/BTC"];
    assert!(!eth_btc.active);
    assert_eq!(eth_btc.taker, Some(dec!(0.003)));
}

#[tokio::test]
async fn test_fetch_ticker() {
    let server = MockServer::start().await;
    mount_products(&server).await;
    Mock::given(method("GET"))
        .and(path("/products/BTC-USD/ticker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "trade_id": 4729088,
            "price": "333.99",
            "size": "0.193",
            "bid": "333.98",
            "ask": "333.99",
            "volume": "5957.11914015",
            "time": "2015-11-14T20:46:03.511254Z"
        })))
        .mount(&server)
        .await;

    let ticker = client(&server).fetch_ticker("BTC/USD").await.unwrap();
    assert_eq!(ticker.symbol, "BTC/USD");
    assert_eq!(ticker.timestamp, 1_447_533_963_511);
    assert_eq!(ticker.last, Some(dec!(333.99)));
    assert_eq!(ticker.base_volume, Some(dec!(5957.11914015)));
}

#[tokio::test]
async fn test_fetch_order_book_uses_level_two() {
    let server = MockServer::start().await;
    mount_products(&server).await;
    Mock::given(method("GET"))
        .and(path("/products/BTC-USD/book"))
        .and(query_param("level", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sequence": 3,
            "bids": [["295.96", "4.39088265", 2]],
            "asks": [["295.97", "25.23542881", 12]]
        })))
        .mount(&server)
        .await;

    let book = client(&server)
        .fetch_order_book("BTC/USD", Some(10))
        .await
        .unwrap();
    assert_eq!(book.nonce, Some(3));
    assert_eq!(book.bids[0].amount, dec!(4.39088265));
    assert_eq!(book.asks[0].price, dec!(295.97));
}

#[tokio::test]
async fn test_public_trades_carry_the_taker_side() {
    let server = MockServer::start().await;
    mount_products(&server).await;
    Mock::given(method("GET"))
        .and(path("/products/BTC-USD/trades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"time": "2014-11-07T22:19:28.578544Z", "trade_id": 74, "price": "10.00000000", "size": "0.01000000", "side": "buy"}
        ])))
        .mount(&server)
        .await;

    let trades = client(&server).fetch_trades("BTC/USD", None, None).await.unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].side, OrderSide::Sell);
    assert_eq!(trades[0].id.as_deref(), Some("74"));
}

#[tokio::test]
async fn test_signed_balance_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .and(header("cb-access-key", "key"))
        .and(header("cb-access-passphrase", "passphrase"))
        .and(header("cb-access-timestamp", "1500000000.000"))
        .and(header(
            "cb-access-sign",
            "e5rh+3VC8qnh+CkjGwsWv22Y2Ccm6AUnoJ51LUBw1cs=",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a1", "currency": "BTC", "balance": "1.100", "available": "1.00", "hold": "0.100"},
            {"id": "a2", "currency": "USD", "balance": "10.00", "available": "10.00", "hold": "0.00"}
        ])))
        .mount(&server)
        .await;

    let balance = client(&server).fetch_balance().await.unwrap();
    assert_eq!(balance.free["BTC"], dec!(1));
    assert_eq!(balance.used["BTC"], dec!(0.1));
    assert_eq!(balance.total["BTC"], dec!(1.1));
    assert_eq!(balance.total["USD"], dec!(10));
}

#[tokio::test]
async fn test_fetch_closed_orders_sends_done_status() {
    let server = MockServer::start().await;
    mount_products(&server).await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("status", "done"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "d0c5340b-6d6c-49d9-b567-48c4bfca13d2",
                "price": "0.10000000",
                "size": "0.01000000",
                "product_id": "BTC-USD",
                "side": "buy",
                "type": "limit",
                "created_at": "2016-12-08T20:02:28.53864Z",
                "fill_fees": "0.0000000000000000",
                "filled_size": "0.01000000",
                "executed_value": "0.0010000000000000",
                "status": "done"
            }
        ])))
        .mount(&server)
        .await;

    let gdax = client(&server);
    let orders = gdax.fetch_closed_orders(None, None, None).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].symbol, "BTC/USD");
    assert_eq!(orders[0].status, OrderStatus::Closed);
    assert_eq!(orders[0].remaining, dec!(0));
    assert_eq!(gdax.base().orders.len().await, 1);
}

#[tokio::test]
async fn test_missing_passphrase_is_rejected_at_construction() {
    let config = ExchangeConfig::builder()
        .api_key("key")
        .secret("Z2RheC1zZWNyZXQ=")
        .build();
    assert!(Gdax::new(config).is_err());
}
