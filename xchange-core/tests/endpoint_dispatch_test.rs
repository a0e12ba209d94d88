//! Endpoint dispatch through a recording transport.
#![allow(clippy::disallowed_methods)]

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use xchange_core::base_exchange::{BaseExchange, ExchangeConfig, ExchangeDescriptor};
use xchange_core::credentials::RequiredCredentials;
use xchange_core::endpoint::{ApiCatalog, RequestDescriptor};
use xchange_core::error::Result;
use xchange_core::signed_request::HttpMethod::{Delete, Get, Post};
use xchange_core::signed_request::{SigningContext, SigningStrategy, insert_header};
use xchange_core::transport::{HttpRequest, Transport};
use xchange_core::types::TradingFees;

static CATALOG: ApiCatalog = ApiCatalog {
    urls: &[
        ("public", "https://api.example.com/v1"),
        ("private", "https://api.example.com/v1"),
    ],
    api: &[
        ("public", &[(Get, &["/products/{id}/book", "/ticker/24hr"])]),
        (
            "private",
            &[(Get, &["/accounts"]), (Post, &["/orders"]), (Delete, &["/orders/{id}"])],
        ),
    ],
    signed: &["private"],
};

static DESCRIPTOR: ExchangeDescriptor = ExchangeDescriptor {
    id: "fixture",
    name: "Fixture",
    catalog: &CATALOG,
    required_credentials: RequiredCredentials::KEY_SECRET,
    fees: TradingFees::new(dec!(0.001), dec!(0.002)),
};

#[derive(Debug, Default)]
struct Recorder {
    requests: Mutex<Vec<HttpRequest>>,
}

#[async_trait]
impl Transport for Recorder {
    async fn request(&self, request: HttpRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request);
        Ok(json!({"ok": true}))
    }
}

struct StampSigner;

#[async_trait]
impl SigningStrategy for StampSigner {
    async fn prepare_request(&self, ctx: &mut SigningContext) -> Result<()> {
        ctx.timestamp = "42".to_string();
        ctx.push_param("nonce", "42");
        ctx.signature = Some(format!("{}:{}", ctx.method, ctx.path));
        Ok(())
    }

    fn add_auth_headers(&self, headers: &mut HeaderMap, ctx: &SigningContext) -> Result<()> {
        insert_header(headers, "x-signature", ctx.signature.as_deref().unwrap_or_default())
    }
}

fn exchange(config: ExchangeConfig) -> (BaseExchange, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let base = BaseExchange::with_transport(
        config,
        &DESCRIPTOR,
        Arc::new(StampSigner),
        Arc::clone(&recorder) as Arc<dyn Transport>,
    )
    .unwrap();
    (base, recorder)
}

fn credentials() -> ExchangeConfig {
    ExchangeConfig::builder().api_key("key").secret("secret").build()
}

#[tokio::test]
async fn test_public_call_resolves_placeholders_unsigned() {
    let (base, recorder) = exchange(ExchangeConfig::default());
    let request = RequestDescriptor::new()
        .field("id", "BTC-USD")
        .param("level", 2);
    base.api.get("public", "productsIdBook", request).await.unwrap();

    let sent = recorder.requests.lock().unwrap().remove(0);
    assert_eq!(sent.url, "https://api.example.com/v1/products/BTC-USD/book");
    assert_eq!(sent.full_url(), "https://api.example.com/v1/products/BTC-USD/book?level=2");
    assert!(!sent.signed);
    assert!(sent.headers.is_empty());
}

#[tokio::test]
async fn test_signed_call_carries_signer_output() {
    let (base, recorder) = exchange(credentials());
    let request = RequestDescriptor::new().data(json!({"size": "1"}));
    base.api.post("private", "orders", request).await.unwrap();

    let sent = recorder.requests.lock().unwrap().remove(0);
    assert!(sent.signed);
    assert_eq!(sent.params, vec![("nonce".to_string(), "42".to_string())]);
    assert_eq!(sent.body, Some(json!({"size": "1"})));
    assert_eq!(sent.headers["x-signature"], "POST:/v1/orders");
}

#[tokio::test]
async fn test_signed_call_without_credentials_never_reaches_transport() {
    let (base, recorder) = exchange(ExchangeConfig::default());
    let err = base
        .api
        .get("private", "accounts", RequestDescriptor::new())
        .await
        .unwrap_err();

    assert_eq!(err.as_authentication(), Some("fixture requires `apiKey`"));
    assert!(recorder.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_endpoint_and_missing_field() {
    let (base, _recorder) = exchange(credentials());
    assert!(
        base.api
            .get("public", "noSuchEndpoint", RequestDescriptor::new())
            .await
            .is_err()
    );
    assert!(
        base.api
            .delete("private", "ordersId", RequestDescriptor::new())
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_url_override_rebases_a_namespace() {
    let config = ExchangeConfig::builder()
        .url_override("public", "http://localhost:8080/")
        .build();
    let (base, recorder) = exchange(config);
    base.api
        .get("public", "ticker24Hr", RequestDescriptor::new())
        .await
        .unwrap();

    let sent = recorder.requests.lock().unwrap().remove(0);
    assert_eq!(sent.url, "http://localhost:8080/ticker/24hr");
}
