//! Kucoin API constants.

use rust_decimal_macros::dec;
use xchange_core::base_exchange::ExchangeDescriptor;
use xchange_core::credentials::RequiredCredentials;
use xchange_core::endpoint::ApiCatalog;
use xchange_core::signed_request::HttpMethod::{Get, Post};
use xchange_core::types::TradingFees;

/// REST surface of Kucoin, including the TradingView chart host.
pub static CATALOG: ApiCatalog = ApiCatalog {
    urls: &[
        ("public", "https://api.kucoin.com/v1"),
        ("private", "https://api.kucoin.com/v1"),
        ("kitchen", "https://kitchen.kucoin.com"),
    ],
    api: &[
        ("kitchen", &[(Get, &["/open/chart/history"])]),
        (
            "public",
            &[(
                Get,
                &[
                    "/open/chart/config",
                    "/open/chart/history",
                    "/open/chart/symbol",
                    "/open/currencies",
                    "/open/deal-orders",
                    "/open/kline",
                    "/open/lang-list",
                    "/open/orders",
                    "/open/orders-buy",
                    "/open/orders-sell",
                    "/open/tick",
                    "/market/open/coin-info",
                    "/market/open/coins",
                    "/market/open/coins-trending",
                    "/market/open/symbols",
                ],
            )],
        ),
        (
            "private",
            &[
                (
                    Get,
                    &[
                        "/account/balance",
                        "/account/{coin}/wallet/address",
                        "/account/{coin}/wallet/records",
                        "/account/{coin}/balance",
                        "/account/promotion/info",
                        "/account/promotion/sum",
                        "/deal-orders",
                        "/order/active",
                        "/order/active-map",
                        "/order/dealt",
                        "/referrer/descendant/count",
                        "/user/info",
                    ],
                ),
                (
                    Post,
                    &[
                        "/account/{coin}/withdraw/apply",
                        "/account/{coin}/withdraw/cancel",
                        "/cancel-order",
                        "/order",
                        "/user/change-lang",
                    ],
                ),
            ],
        ),
    ],
    signed: &["private"],
};

/// Static exchange facts.
pub static DESCRIPTOR: ExchangeDescriptor = ExchangeDescriptor {
    id: "kucoin",
    name: "Kucoin",
    catalog: &CATALOG,
    required_credentials: RequiredCredentials::KEY_SECRET,
    fees: TradingFees::new(dec!(0.001), dec!(0.001)),
};

/// TradingView resolutions: minutes, or `D`/`W`.
pub const TIMEFRAMES: &[(&str, &str)] = &[
    ("1m", "1"),
    ("5m", "5"),
    ("15m", "15"),
    ("30m", "30"),
    ("1h", "60"),
    ("8h", "480"),
    ("1d", "D"),
    ("1w", "W"),
];

/// Price and amount precision of every market.
pub const MARKET_PRECISION: u32 = 8;

/// Page size of `/account/balance`; the exchange caps it at 20.
pub const BALANCE_PAGE_SIZE: u32 = 20;

/// Minutes in a day.
pub const MINUTES_PER_DAY: i64 = 1440;

/// Minutes in a week.
pub const MINUTES_PER_WEEK: i64 = 10_080;

/// Daily candles fetched when no limit is given.
pub const DEFAULT_DAILY_CANDLES: i64 = 30;

/// Weekly candles fetched when no limit is given.
pub const DEFAULT_WEEKLY_CANDLES: i64 = 52;

/// Candle count for intraday resolutions without a limit; the request falls back to daily.
pub const DEFAULT_CANDLES: i64 = 1440;
