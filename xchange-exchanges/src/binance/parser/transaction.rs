use serde_json::Value;
use rust_decimal::Decimal;
use xchange_core::error::{Error, Result};
use xchange_core::parser_utils::{parse_bool, parse_string, require_string};
use xchange_core::types::{DepositAddress, Transaction};

/// Parse a `wapi` `/depositAddress` reply.
///
/// The endpoint answers HTTP 200 with `success: false` for unknown assets.
pub fn parse_deposit_address(data: &Value, code: &str) -> Result<DepositAddress> {
    if parse_bool(data, "success") != Some(true) {
        let msg = parse_string(data, "msg").unwrap_or_else(|| data.to_string());
        return Err(Error::exchange("depositAddress", msg));
    }
    Ok(DepositAddress {
        currency: code.to_string(),
        address: require_string(data, "address")?,
        tag: parse_string(data, "addressTag").filter(|tag| !tag.is_empty()),
        info: data.clone(),
    })
}

/// Parse a `wapi` `/withdraw` reply.
pub fn parse_withdrawal(data: &Value, code: &str, amount: Decimal, address: &str) -> Transaction {
    Transaction {
        id: parse_string(data, "id"),
        currency: code.to_string(),
        amount,
        address: Some(address.to_string()),
        info: data.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_deposit_address_success() {
        let data = json!({"address": "0x6915f16f8791d0a1cc2bf47c13a6b2a92000504b", "success": true, "addressTag": "1231212", "asset": "BNB"});
        let address = parse_deposit_address(&data, "BNB").unwrap();
        assert_eq!(address.currency, "BNB");
        assert_eq!(address.tag.as_deref(), Some("1231212"));
    }

    #[test]
    fn test_deposit_address_failure_is_exchange_error() {
        let data = json!({"success": false, "msg": "Asset not supported"});
        let err = parse_deposit_address(&data, "XYZ").unwrap_err();
        assert!(err.to_string().contains("Asset not supported"));
    }

    #[test]
    fn test_withdrawal_id() {
        let data = json!({"msg": "success", "success": true, "id": "7213fea8e94b4a5593d507237e5a555b"});
        let tx = parse_withdrawal(&data, "ETH", dec!(1.5), "0xabc");
        assert_eq!(tx.id.as_deref(), Some("7213fea8e94b4a5593d507237e5a555b"));
        assert_eq!(tx.amount, dec!(1.5));
    }
}
