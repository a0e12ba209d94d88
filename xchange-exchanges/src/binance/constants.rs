//! Binance API constants.
//!
//! The REST catalog, fee table and candle intervals, plus the fixed strings the parsers
//! match against.

use rust_decimal_macros::dec;
use xchange_core::base_exchange::ExchangeDescriptor;
use xchange_core::credentials::RequiredCredentials;
use xchange_core::endpoint::ApiCatalog;
use xchange_core::signed_request::HttpMethod::{Delete, Get, Post, Put};
use xchange_core::types::TradingFees;

/// REST surface of Binance.
pub static CATALOG: ApiCatalog = ApiCatalog {
    urls: &[
        ("web", "https://www.binance.com"),
        ("wapi", "https://api.binance.com/wapi/v3"),
        ("public", "https://api.binance.com/api/v1"),
        ("private", "https://api.binance.com/api/v3"),
        ("v3", "https://api.binance.com/api/v3"),
        ("v1", "https://api.binance.com/api/v1"),
    ],
    api: &[
        ("web", &[(Get, &["/exchange/public/product"])]),
        (
            "wapi",
            &[
                (Post, &["/withdraw"]),
                (Get, &["/depositHistory", "/withdrawHistory", "/depositAddress"]),
            ],
        ),
        ("v3", &[(Get, &["/ticker/price", "/ticker/bookTicker"])]),
        (
            "public",
            &[(
                Get,
                &[
                    "/exchangeInfo",
                    "/ping",
                    "/time",
                    "/depth",
                    "/aggTrades",
                    "/klines",
                    "/ticker/24hr",
                    "/ticker/allPrices",
                    "/ticker/allBookTickers",
                    "/ticker/price",
                    "/ticker/bookTicker",
                ],
            )],
        ),
        (
            "private",
            &[
                (Get, &["/order", "/openOrders", "/allOrders", "/account", "/myTrades"]),
                (Post, &["/order", "/order/test"]),
                (Delete, &["/order"]),
            ],
        ),
        (
            "v1",
            &[
                (Put, &["/userDataStream"]),
                (Post, &["/userDataStream"]),
                (Delete, &["/userDataStream"]),
            ],
        ),
    ],
    signed: &["private", "wapi"],
};

/// Static exchange facts.
pub static DESCRIPTOR: ExchangeDescriptor = ExchangeDescriptor {
    id: "binance",
    name: "Binance",
    catalog: &CATALOG,
    required_credentials: RequiredCredentials::KEY_SECRET,
    fees: TradingFees::new(dec!(0.001), dec!(0.001)),
};

/// Candle intervals as `(canonical, exchange)` pairs.
pub const TIMEFRAMES: &[(&str, &str)] = &[
    ("1m", "1m"),
    ("3m", "3m"),
    ("5m", "5m"),
    ("15m", "15m"),
    ("30m", "30m"),
    ("1h", "1h"),
    ("2h", "2h"),
    ("4h", "4h"),
    ("6h", "6h"),
    ("8h", "8h"),
    ("12h", "12h"),
    ("1d", "1d"),
    ("3d", "3d"),
    ("1w", "1w"),
    ("1M", "1M"),
];

/// Placeholder market the exchange lists but never trades.
pub const NULL_ID: &str = "123456";

/// Default and maximum depth of `/depth`.
pub const DEFAULT_ORDER_BOOK_LIMIT: u32 = 100;

/// Default and maximum row count of `/klines`.
pub const DEFAULT_OHLCV_LIMIT: usize = 500;

/// Window of `/aggTrades` when a start time is given.
pub const AGG_TRADES_WINDOW_MS: i64 = 3_600_000;

/// Withdrawal label length.
pub const WITHDRAW_NAME_LEN: usize = 20;

/// Market status of a tradable symbol.
pub const MARKET_STATUS_TRADING: &str = "TRADING";

/// Order statuses
pub mod status {
    /// The order has been accepted by the engine.
    pub const NEW: &str = "NEW";
    /// A part of the order has been filled.
    pub const PARTIALLY_FILLED: &str = "PARTIALLY_FILLED";
    /// The order has been completed.
    pub const FILLED: &str = "FILLED";
    /// The order has been canceled by the user.
    pub const CANCELED: &str = "CANCELED";
}

/// Time in force
pub mod time_in_force {
    /// Good till canceled.
    pub const GTC: &str = "GTC";
}

/// Symbol filters
pub mod filters {
    /// Tick size and price bounds.
    pub const PRICE_FILTER: &str = "PRICE_FILTER";
    /// Step size and quantity bounds.
    pub const LOT_SIZE: &str = "LOT_SIZE";
    /// Minimum order value.
    pub const MIN_NOTIONAL: &str = "MIN_NOTIONAL";
}
