//! Binance adapter against a mocked REST API.
#![allow(clippy::disallowed_methods)]

use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xchange_core::nonce::FixedNonce;
use xchange_core::{Exchange, ExchangeConfig, OrderSide, OrderStatus, OrderType};
use xchange_exchanges::binance::Binance;

fn exchange_info() -> serde_json::Value {
    json!({
        "timezone": "UTC",
        "serverTime": 1_508_631_584_636_i64,
        "symbols": [
            {
                "symbol": "ETHBTC",
                "status": "TRADING",
                "baseAsset": "ETH",
                "baseAssetPrecision": 8,
                "quoteAsset": "BTC",
                "quotePrecision": 8,
                "filters": [
                    {"filterType": "PRICE_FILTER", "minPrice": "0.00000100", "maxPrice": "100000.00000000", "tickSize": "0.00000100"},
                    {"filterType": "LOT_SIZE", "minQty": "0.00100000", "maxQty": "100000.00000000", "stepSize": "0.00100000"}
                ]
            },
            {
                "symbol": "123456",
                "status": "TRADING",
                "baseAsset": "123",
                "quoteAsset": "456"
            }
        ]
    })
}

async fn mount_exchange_info(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/exchangeInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(exchange_info()))
        .expect(1)
        .mount(server)
        .await;
}

fn public_client(server: &MockServer) -> Binance {
    let config = ExchangeConfig::builder()
        .url_override("public", server.uri())
        .build();
    Binance::new(config).unwrap()
}

fn signed_client(server: &MockServer) -> Binance {
    let config = ExchangeConfig::builder()
        .api_key("key")
        .secret("secret")
        .url_override("public", server.uri())
        .url_override("private", server.uri())
        .build();
    Binance::with_nonce(config, Arc::new(FixedNonce(1_500_000_000_000))).unwrap()
}

#[tokio::test]
async fn test_load_markets_skips_placeholder_and_caches() {
    let server = MockServer::start().await;
    mount_exchange_info(&server).await;
    let binance = public_client(&server);

    let markets = binance.load_markets(false).await.unwrap();
    assert_eq!(markets.len(), 1);
    let market = &markets["ETH/BTC"];
    assert_eq!(market.precision.amount, Some(3));
    assert_eq!(market.taker, Some(dec!(0.001)));

    // second call is served from the cache; the mock expects exactly one hit
    binance.load_markets(false).await.unwrap();
    assert_eq!(binance.base().currency("ETH").await.unwrap().code, "ETH");
}

#[tokio::test]
async fn test_fetch_ticker() {
    let server = MockServer::start().await;
    mount_exchange_info(&server).await;
    Mock::given(method("GET"))
        .and(path("/ticker/24hr"))
        .and(query_param("symbol", "ETHBTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": "ETHBTC",
            "priceChange": "-0.00010000",
            "priceChangePercent": "-0.200",
            "weightedAvgPrice": "0.05000000",
            "prevClosePrice": "0.05010000",
            "lastPrice": "0.05000000",
            "bidPrice": "0.04990000",
            "bidQty": "1.00000000",
            "askPrice": "0.05010000",
            "askQty": "2.00000000",
            "openPrice": "0.05010000",
            "highPrice": "0.05100000",
            "lowPrice": "0.04900000",
            "volume": "1000.00000000",
            "quoteVolume": "50.00000000",
            "closeTime": 1_499_869_899_040_i64
        })))
        .mount(&server)
        .await;

    let ticker = public_client(&server).fetch_ticker("ETH/BTC").await.unwrap();
    assert_eq!(ticker.symbol, "ETH/BTC");
    assert_eq!(ticker.timestamp, 1_499_869_899_040);
    assert_eq!(ticker.last, Some(dec!(0.05)));
    assert_eq!(ticker.ask_volume, Some(dec!(2)));
}

#[tokio::test]
async fn test_fetch_order_book_is_sorted() {
    let server = MockServer::start().await;
    mount_exchange_info(&server).await;
    Mock::given(method("GET"))
        .and(path("/depth"))
        .and(query_param("symbol", "ETHBTC"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lastUpdateId": 1027024,
            "bids": [["0.04000000", "1.0", []], ["0.04100000", "2.0", []]],
            "asks": [["0.04300000", "1.0", []], ["0.04200000", "3.0", []]]
        })))
        .mount(&server)
        .await;

    let book = public_client(&server)
        .fetch_order_book("ETH/BTC", None)
        .await
        .unwrap();
    assert_eq!(book.nonce, Some(1027024));
    assert_eq!(book.bids[0].price, dec!(0.041));
    assert_eq!(book.asks[0].price, dec!(0.042));
}

#[tokio::test]
async fn test_signed_balance_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account"))
        .and(header("X-MBX-APIKEY", "key"))
        .and(query_param("timestamp", "1500000000000"))
        .and(query_param(
            "signature",
            "bc19e90933a777082ffe01a6957c26e338924d884f0fffde114952a32f092a6e",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "makerCommission": 15,
            "balances": [
                {"asset": "BTC", "free": "4723846.89208129", "locked": "0.00000000"},
                {"asset": "LTC", "free": "4763368.68006011", "locked": "1.50000000"}
            ]
        })))
        .mount(&server)
        .await;

    let balance = signed_client(&server).fetch_balance().await.unwrap();
    assert_eq!(balance.free["BTC"], dec!(4723846.89208129));
    assert_eq!(balance.used["LTC"], dec!(1.5));
    assert_eq!(balance.total["LTC"], dec!(4763370.18006011));
}

#[tokio::test]
async fn test_create_limit_order() {
    let server = MockServer::start().await;
    mount_exchange_info(&server).await;
    Mock::given(method("POST"))
        .and(path("/order"))
        .and(query_param("symbol", "ETHBTC"))
        .and(query_param("side", "BUY"))
        .and(query_param("type", "LIMIT"))
        .and(query_param("quantity", "1.234"))
        .and(query_param("timeInForce", "GTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": "ETHBTC",
            "orderId": 28,
            "clientOrderId": "6gCrw2kRUAF9CvJDGP16IP",
            "transactTime": 1_507_725_176_595_i64,
            "price": "0.05000000",
            "origQty": "1.23400000",
            "executedQty": "0.00000000",
            "status": "NEW",
            "timeInForce": "GTC",
            "type": "LIMIT",
            "side": "BUY"
        })))
        .mount(&server)
        .await;

    let binance = signed_client(&server);
    let order = binance
        .create_order(
            "ETH/BTC",
            OrderType::Limit,
            OrderSide::Buy,
            dec!(1.2345678),
            Some(dec!(0.05)),
            None,
        )
        .await
        .unwrap();
    assert_eq!(order.id, "28");
    assert_eq!(order.status, OrderStatus::Open);
    assert_eq!(binance.base().orders.open_count().await, 1);

    Mock::given(method("DELETE"))
        .and(path("/order"))
        .and(query_param("symbol", "ETHBTC"))
        .and(query_param("orderId", "28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": "ETHBTC",
            "origClientOrderId": "6gCrw2kRUAF9CvJDGP16IP",
            "orderId": 28,
            "clientOrderId": "cancelMyOrder1"
        })))
        .mount(&server)
        .await;
    let ack = binance.cancel_order("28", Some("ETH/BTC"), None).await.unwrap();
    assert_eq!(ack["orderId"], 28);
    assert_eq!(binance.base().orders.open_count().await, 0);
    assert_eq!(
        binance.base().orders.get("28").await.unwrap().status,
        OrderStatus::Canceled
    );
}

#[tokio::test]
async fn test_missing_credentials_fail_before_io() {
    let server = MockServer::start().await;
    let config = ExchangeConfig::builder()
        .url_override("private", server.uri())
        .build();
    let binance = Binance::new(config).unwrap();

    let err = binance.fetch_balance().await.unwrap_err();
    assert!(err.as_authentication().is_some());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_server_error_maps_to_exchange_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/time"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = public_client(&server).fetch_time().await.unwrap_err();
    assert!(matches!(err, xchange_core::Error::Exchange(_)));
}
