//! Binance funding operations through `wapi`.

use super::super::constants::WITHDRAW_NAME_LEN;
use super::super::parser::{self, currency_id};
use super::super::Binance;
use rust_decimal::Decimal;
use xchange_core::endpoint::RequestDescriptor;
use xchange_core::types::{DepositAddress, Transaction};
use xchange_core::{Params, Result};

impl Binance {
    /// Deposit address of a currency.
    pub async fn fetch_deposit_address(&self, code: &str) -> Result<DepositAddress> {
        let request = RequestDescriptor::new().param("asset", currency_id(code));
        let response = self.base.api.get("wapi", "depositAddress", request).await?;
        parser::parse_deposit_address(&response, code)
    }

    /// Withdraws to an address.
    ///
    /// The withdrawal is labelled with the first characters of the address. A `tag` or
    /// `addressTag` param is forwarded as the address tag.
    pub async fn withdraw(
        &self,
        code: &str,
        amount: Decimal,
        address: &str,
        params: Option<&Params>,
    ) -> Result<Transaction> {
        let name: String = address.chars().take(WITHDRAW_NAME_LEN).collect();
        let tag = params.and_then(|p| p.get("addressTag").or_else(|| p.get("tag")));
        let extra = params.map(|p| {
            p.iter()
                .filter(|(k, _)| k.as_str() != "tag")
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<Params>()
        });
        let request = RequestDescriptor::new()
            .param("asset", currency_id(code))
            .param("address", address)
            .param("amount", amount)
            .param("name", name)
            .optional_param("addressTag", tag)
            .extend(extra.as_ref());
        let response = self.base.api.post("wapi", "withdraw", request).await?;
        Ok(parser::parse_withdrawal(&response, code, amount, address))
    }
}
