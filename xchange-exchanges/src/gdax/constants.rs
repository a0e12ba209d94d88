//! Gdax API constants.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use xchange_core::base_exchange::ExchangeDescriptor;
use xchange_core::credentials::RequiredCredentials;
use xchange_core::endpoint::ApiCatalog;
use xchange_core::signed_request::HttpMethod::{Delete, Get, Post};
use xchange_core::types::TradingFees;

/// REST surface of Gdax.
pub static CATALOG: ApiCatalog = ApiCatalog {
    urls: &[
        ("public", "https://api.gdax.com"),
        ("private", "https://api.gdax.com"),
    ],
    api: &[
        (
            "public",
            &[(
                Get,
                &[
                    "/currencies",
                    "/products",
                    "/products/{id}/book",
                    "/products/{id}/candles",
                    "/products/{id}/stats",
                    "/products/{id}/ticker",
                    "/products/{id}/trades",
                    "/time",
                ],
            )],
        ),
        (
            "private",
            &[
                (
                    Get,
                    &[
                        "/accounts",
                        "/accounts/{id}",
                        "/accounts/{id}/holds",
                        "/accounts/{id}/ledger",
                        "/accounts/{id}/transfers",
                        "/coinbase-accounts",
                        "/fills",
                        "/funding",
                        "/orders",
                        "/orders/{id}",
                        "/payment-methods",
                        "/position",
                        "/reports/{id}",
                        "/users/self/trailing-volume",
                    ],
                ),
                (
                    Post,
                    &[
                        "/deposits/coinbase-account",
                        "/deposits/payment-method",
                        "/funding/repay",
                        "/orders",
                        "/position/close",
                        "/profiles/margin-transfer",
                        "/reports",
                        "/withdrawals/coinbase",
                        "/withdrawals/crypto",
                        "/withdrawals/payment-method",
                    ],
                ),
                (Delete, &["/orders", "/orders/{id}"]),
            ],
        ),
    ],
    signed: &["private"],
};

/// Static exchange facts.
pub static DESCRIPTOR: ExchangeDescriptor = ExchangeDescriptor {
    id: "gdax",
    name: "GDAX",
    catalog: &CATALOG,
    required_credentials: RequiredCredentials::KEY_SECRET_PASSWORD,
    fees: TradingFees::new(dec!(0), dec!(0.0025)),
};

/// Candle granularities in seconds.
pub const TIMEFRAMES: &[(&str, &str)] = &[
    ("1m", "60"),
    ("5m", "300"),
    ("15m", "900"),
    ("30m", "1800"),
    ("1h", "3600"),
    ("2h", "7200"),
    ("4h", "14400"),
    ("12h", "43200"),
    ("1d", "86400"),
    ("1w", "604800"),
    ("1M", "2592000"),
    ("1y", "31536000"),
];

/// Amount precision of every product.
pub const AMOUNT_PRECISION: u32 = 8;

/// Candles per request when only `since` is given.
pub const DEFAULT_OHLCV_LIMIT: i64 = 350;

/// Level-2 book: top 50 aggregated levels.
pub const ORDER_BOOK_LEVEL: u32 = 2;

/// Product status of a tradable market.
pub const PRODUCT_STATUS_ONLINE: &str = "online";

/// Taker fee of a product's base currency.
pub fn taker_fee(base: &str) -> Decimal {
    match base {
        "ETH" | "LTC" => dec!(0.003),
        _ => dec!(0.0025),
    }
}
