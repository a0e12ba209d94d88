use super::currency_code;
use serde_json::Value;
use xchange_core::error::Result;
use xchange_core::parser_utils::{parse_decimal, require_array, require_string};
use xchange_core::reconcile::RawBalance;
use xchange_core::types::RawBalanceEntry;

/// Parse the `balances` array of `/account`.
///
/// Binance reports `free` and `locked` for every asset, so no entry needs reconciling.
pub fn parse_balance(data: &Value, substitute_codes: bool) -> Result<RawBalance> {
    let mut raw = RawBalance::new(data.clone());
    for entry in require_array(data, "balances")? {
        let asset = require_string(entry, "asset")?;
        let free = parse_decimal(entry, "free").unwrap_or_default();
        let locked = parse_decimal(entry, "locked").unwrap_or_default();
        raw.push(
            currency_code(&asset, substitute_codes),
            RawBalanceEntry::reported(free, locked),
        );
    }
    Ok(raw)
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_parse_account_balances() {
        let data = json!({
            "makerCommission": 15,
            "balances": [
                {"asset": "BTC", "free": "4723846.89208129", "locked": "0.00000000"},
                {"asset": "BCC", "free": "1.5", "locked": "0.5"}
            ]
        });
        let raw = parse_balance(&data, true).unwrap();
        assert_eq!(raw.entries.len(), 2);
        let (code, entry) = &raw.entries[1];
        assert_eq!(code, "BCH");
        assert_eq!(entry.free, dec!(1.5));
        assert_eq!(entry.used, Some(dec!(0.5)));
        assert_eq!(raw.open_orders, None);
    }

    #[test]
    fn test_missing_balances_is_parse_error() {
        let err = parse_balance(&json!({"code": -1}), true).unwrap_err();
        assert!(err.as_parse().is_some());
    }
}
