//! Widget locator construction
//!
//! The locator is `<base>/<resource id>` plus a query string carrying the
//! widget options. Query values are form-urlencoded, so a wallet list such as
//! `ledger,custom` is sent as `ledger%2Ccustom`.

use url::Url;

use crate::error::{Result, WidgetError};

pub const AMOUNT_PARAM: &str = "amount";
pub const DEFAULT_WALLET_PARAM: &str = "defaultWallet";
pub const WALLETS_PARAM: &str = "wallets";

/// Append `resource_id` as a path segment of `base` and replace its query
/// with `params`.
///
/// An empty `params` leaves the locator without a `?`.
pub fn build_locator(mut base: Url, resource_id: &str, params: &[(&str, String)]) -> Result<Url> {
    if resource_id.is_empty() {
        return Err(WidgetError::InvalidLocator(
            "resource id must not be empty".to_string(),
        ));
    }

    if base.cannot_be_a_base() {
        return Err(WidgetError::InvalidLocator(format!(
            "{} cannot be a base",
            base
        )));
    }

    base.path_segments_mut()
        .map_err(|_| WidgetError::InvalidLocator("base has no path".to_string()))?
        .pop_if_empty()
        .push(resource_id);

    base.set_query(None);
    base.set_fragment(None);
    if !params.is_empty() {
        base.query_pairs_mut()
            .extend_pairs(params.iter().map(|(key, value)| (*key, value.as_str())));
    }

    Ok(base)
}

/// Amount as sent to the widget: fixed-point with two decimals.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn test_no_params_has_no_query() {
        let url = build_locator(base("https://widget.hydroprotocol.io/"), "swap1", &[]).unwrap();
        assert_eq!(url.as_str(), "https://widget.hydroprotocol.io/swap1");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_params_keep_insertion_order() {
        let params = [
            (AMOUNT_PARAM, format_amount(12.5)),
            (DEFAULT_WALLET_PARAM, "ledger".to_string()),
            (WALLETS_PARAM, "ledger,custom".to_string()),
        ];
        let url = build_locator(base("http://localhost:3000/"), "abc", &params).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/abc?amount=12.50&defaultWallet=ledger&wallets=ledger%2Ccustom"
        );
    }

    #[test]
    fn test_base_with_path_prefix() {
        let url = build_locator(base("https://cdn.example.com/widgets/"), "id-1", &[]).unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/widgets/id-1");

        let url = build_locator(base("https://cdn.example.com/widgets"), "id-1", &[]).unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/widgets/id-1");
    }

    #[test]
    fn test_base_query_is_replaced() {
        let url = build_locator(base("https://example.com/?stale=1#frag"), "id", &[]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/id");
    }

    #[test]
    fn test_resource_id_is_a_single_segment() {
        let url = build_locator(base("https://example.com/"), "a/b?c", &[]).unwrap();
        assert_eq!(url.path(), "/a%2Fb%3Fc");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_empty_resource_id_rejected() {
        let err = build_locator(base("https://example.com/"), "", &[]).unwrap_err();
        assert!(matches!(err, WidgetError::InvalidLocator(_)));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(12.5), "12.50");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(3.14159), "3.14");
        assert_eq!(format_amount(100.0), "100.00");
    }
}
