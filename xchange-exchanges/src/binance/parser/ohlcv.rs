use serde_json::Value;
use xchange_core::error::Result;
use xchange_core::parser_utils::parse_ohlcv_row;
use xchange_core::types::Ohlcv;

/// Parse a `/klines` row.
///
/// Rows are `[openTime, open, high, low, close, volume, closeTime, ...]`; only the first six
/// columns are kept.
pub fn parse_ohlcv(row: &Value) -> Result<Ohlcv> {
    parse_ohlcv_row(row)
}
