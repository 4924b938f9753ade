use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WidgetError;

/// Wallet options the widget can offer.
///
/// Only [`WalletKind::Custom`] changes how the widget is attached; the rest
/// are passed through to the widget as presentation choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Metamask,
    Browser,
    Ledger,
    Custom,
}

impl WalletKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletKind::Metamask => "metamask",
            WalletKind::Browser => "browser",
            WalletKind::Ledger => "ledger",
            WalletKind::Custom => "custom",
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WalletKind {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metamask" => Ok(WalletKind::Metamask),
            "browser" => Ok(WalletKind::Browser),
            "ledger" => Ok(WalletKind::Ledger),
            "custom" => Ok(WalletKind::Custom),
            other => Err(WidgetError::UnknownWallet(other.to_string())),
        }
    }
}

/// Comma-joined wallet list, in the given order.
pub fn join_wallets(wallets: &[WalletKind]) -> String {
    wallets
        .iter()
        .map(WalletKind::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_kind_round_trip_strings() {
        for kind in [
            WalletKind::Metamask,
            WalletKind::Browser,
            WalletKind::Ledger,
            WalletKind::Custom,
        ] {
            assert_eq!(kind.to_string().parse::<WalletKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_wallet_kind() {
        let err = "trezor".parse::<WalletKind>().unwrap_err();
        assert!(matches!(err, WidgetError::UnknownWallet(ref s) if s == "trezor"));
    }

    #[test]
    fn test_join_preserves_order() {
        assert_eq!(
            join_wallets(&[WalletKind::Ledger, WalletKind::Custom, WalletKind::Metamask]),
            "ledger,custom,metamask"
        );
        assert_eq!(join_wallets(&[]), "");
    }
}
