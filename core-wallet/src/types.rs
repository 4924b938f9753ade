//! Wallet domain types

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Capabilities a custom wallet can implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    ApproveTransaction,
    GetAccounts,
    SignTransaction,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::ApproveTransaction,
        Capability::GetAccounts,
        Capability::SignTransaction,
    ];

    /// Name of the remote method backed by this capability.
    pub fn method_name(&self) -> &'static str {
        match self {
            Capability::ApproveTransaction => "approveTransaction",
            Capability::GetAccounts => "getAccounts",
            Capability::SignTransaction => "signTransaction",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

/// A numeric transaction field as the widget sends it: a JSON number, or a
/// decimal / `0x`-prefixed hex string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(Number),
    Text(String),
}

impl Quantity {
    /// Numeric value, if it fits in a `u128`.
    pub fn to_u128(&self) -> Option<u128> {
        match self {
            Quantity::Number(n) => n.as_u64().map(u128::from),
            Quantity::Text(s) => match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                Some(hex) if hex.is_empty() => Some(0),
                Some(hex) => u128::from_str_radix(hex, 16).ok(),
                None => s.parse().ok(),
            },
        }
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Quantity::Number(value.into())
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Quantity::Text(value.to_string())
    }
}

/// Transaction the widget asks the host to approve or sign.
///
/// Every field is optional because the widget fills in only what it knows;
/// fields this struct does not model are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<Quantity>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TxData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_address(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn to_address(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<Quantity>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_capability_method_names() {
        let names: Vec<_> = Capability::ALL.iter().map(|c| c.method_name()).collect();
        assert_eq!(
            names,
            vec!["approveTransaction", "getAccounts", "signTransaction"]
        );
        assert_eq!(
            serde_json::to_value(Capability::GetAccounts).unwrap(),
            json!("getAccounts")
        );
    }

    #[test]
    fn test_tx_data_from_widget_payload() {
        let tx: TxData = serde_json::from_value(json!({
            "from": "0xabc",
            "to": "0xdef",
            "value": "0xde0b6b3a7640000",
            "gas": 21000,
            "gasPrice": "20000000000",
            "chainId": 1,
            "data": "0x",
            "hydroOrderId": "order-7"
        }))
        .unwrap();

        assert_eq!(tx.from.as_deref(), Some("0xabc"));
        assert_eq!(
            tx.value.as_ref().and_then(Quantity::to_u128),
            Some(1_000_000_000_000_000_000)
        );
        assert_eq!(tx.gas.as_ref().and_then(Quantity::to_u128), Some(21000));
        assert_eq!(
            tx.gas_price.as_ref().and_then(Quantity::to_u128),
            Some(20_000_000_000)
        );
        assert_eq!(tx.chain_id, Some(Quantity::from(1u64)));
        assert_eq!(tx.extra.get("hydroOrderId"), Some(&json!("order-7")));
    }

    #[test]
    fn test_tx_data_serializes_only_present_fields() {
        let tx = TxData::new()
            .from_address("0xabc")
            .with_value("0x10")
            .with_data("0x");
        assert_eq!(
            serde_json::to_value(&tx).unwrap(),
            json!({ "from": "0xabc", "value": "0x10", "data": "0x" })
        );
    }

    #[test]
    fn test_quantity_parsing_edge_cases() {
        assert_eq!(Quantity::from("0x").to_u128(), Some(0));
        assert_eq!(Quantity::from("42").to_u128(), Some(42));
        assert_eq!(Quantity::from("0xzz").to_u128(), None);
        assert_eq!(Quantity::Number(Number::from(-1)).to_u128(), None);
    }
}
