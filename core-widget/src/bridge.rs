//! # Widget Bridge
//!
//! Configures the embedded widget and attaches it to a host container.
//!
//! ## Exposure
//!
//! When the wallet list offers [`WalletKind::Custom`], the widget needs the
//! host's [`CustomWallet`]. `attach` then opens the child frame through
//! [`FrameTransport::connect_to_child`] with the forwarding methods from
//! [`crate::surface`]. Otherwise a plain frame is created and nothing is
//! exposed.
//!
//! A missing custom wallet is reported by `attach`, not by the setters, so
//! the configuration can be assembled in any order.
//!
//! ## Usage
//!
//! ```ignore
//! use core_widget::{WalletKind, WidgetBridge};
//! use core_runtime::Network;
//!
//! let bridge = WidgetBridge::new("swap1")
//!     .with_network(Network::Test)
//!     .set_default_amount(12.5)
//!     .set_wallets([WalletKind::Ledger, WalletKind::Custom])
//!     .set_custom_wallet_provider(wallet);
//!
//! let attachment = bridge.attach(&host, &container)?;
//! ```

use std::sync::Arc;

use bridge_traits::transport::FrameTransport;
use core_runtime::config::{Network, WidgetEndpoints, WidgetLayout};
use core_wallet::{ConfigurationError, CustomWallet};
use tracing::{info, instrument, warn};
use url::Url;

use crate::error::Result;
use crate::locator::{
    build_locator, format_amount, AMOUNT_PARAM, DEFAULT_WALLET_PARAM, WALLETS_PARAM,
};
use crate::surface::wallet_methods;
use crate::wallet_kind::{join_wallets, WalletKind};

/// Widget configuration and attach entry point.
#[derive(Debug, Clone)]
pub struct WidgetBridge {
    resource_id: String,
    network: Network,
    default_amount: Option<f64>,
    default_wallet: Option<WalletKind>,
    wallets: Option<Vec<WalletKind>>,
    custom_wallet: Option<Arc<CustomWallet>>,
    endpoints: WidgetEndpoints,
    layout: WidgetLayout,
}

/// Result of a successful [`WidgetBridge::attach`].
#[derive(Debug, Clone)]
pub struct Attachment<E> {
    /// The rounded container the frame was appended to.
    pub container: E,
    /// The embedded frame element.
    pub frame: E,
    pub locator: Url,
    /// Methods the frame may call; empty for a plain frame.
    pub exposed_methods: Vec<String>,
}

impl<E> Attachment<E> {
    pub fn is_bridged(&self) -> bool {
        !self.exposed_methods.is_empty()
    }
}

impl WidgetBridge {
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            network: Network::default(),
            default_amount: None,
            default_wallet: None,
            wallets: None,
            custom_wallet: None,
            endpoints: WidgetEndpoints::default(),
            layout: WidgetLayout::default(),
        }
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    pub fn with_endpoints(mut self, endpoints: WidgetEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_layout(mut self, layout: WidgetLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Amount pre-filled in the widget, sent with two decimals.
    pub fn set_default_amount(mut self, amount: f64) -> Self {
        self.default_amount = Some(amount);
        self
    }

    pub fn set_default_wallet(mut self, wallet: WalletKind) -> Self {
        self.default_wallet = Some(wallet);
        self
    }

    /// Wallet options offered by the widget, in display order.
    pub fn set_wallets(mut self, wallets: impl IntoIterator<Item = WalletKind>) -> Self {
        self.wallets = Some(wallets.into_iter().collect());
        self
    }

    pub fn set_custom_wallet_provider(mut self, wallet: impl Into<Arc<CustomWallet>>) -> Self {
        self.custom_wallet = Some(wallet.into());
        self
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn default_amount(&self) -> Option<f64> {
        self.default_amount
    }

    pub fn default_wallet(&self) -> Option<WalletKind> {
        self.default_wallet
    }

    pub fn wallets(&self) -> Option<&[WalletKind]> {
        self.wallets.as_deref()
    }

    pub fn layout(&self) -> &WidgetLayout {
        &self.layout
    }

    /// # Errors
    ///
    /// [`ConfigurationError::CustomWalletMissing`] if no provider was set.
    pub fn custom_wallet_provider(
        &self,
    ) -> std::result::Result<&Arc<CustomWallet>, ConfigurationError> {
        self.custom_wallet
            .as_ref()
            .ok_or(ConfigurationError::CustomWalletMissing)
    }

    /// True when the wallet list offers the custom wallet.
    pub fn requires_custom_wallet(&self) -> bool {
        self.wallets
            .as_ref()
            .is_some_and(|wallets| wallets.contains(&WalletKind::Custom))
    }

    /// Locator the widget frame is loaded from.
    pub fn locator(&self) -> Result<Url> {
        let base = self.endpoints.base_for(self.network)?;
        build_locator(base, &self.resource_id, &self.query_params())
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(amount) = self.default_amount {
            params.push((AMOUNT_PARAM, format_amount(amount)));
        }
        if let Some(wallet) = self.default_wallet {
            params.push((DEFAULT_WALLET_PARAM, wallet.as_str().to_string()));
        }
        if let Some(wallets) = &self.wallets {
            params.push((WALLETS_PARAM, join_wallets(wallets)));
        }
        params
    }

    /// Insert the widget into `container`.
    ///
    /// Each call opens a new, independent frame.
    ///
    /// # Errors
    ///
    /// - [`WidgetError::Configuration`](crate::WidgetError::Configuration) if the
    ///   custom wallet is offered but no provider was set. Nothing is inserted.
    /// - [`WidgetError::Bridge`](crate::WidgetError::Bridge) if the host fails to
    ///   create or connect the frame.
    #[instrument(skip_all, fields(resource_id = %self.resource_id, network = %self.network))]
    pub fn attach<H>(&self, host: &H, container: &H::Element) -> Result<Attachment<H::Element>>
    where
        H: FrameTransport,
    {
        let locator = self.locator()?;

        let wallet = if self.requires_custom_wallet() {
            let wallet = self.custom_wallet_provider().map_err(|err| {
                warn!(error = %err, "Custom wallet offered without a provider");
                err
            })?;
            Some(Arc::clone(wallet))
        } else {
            None
        };

        let rounded = host.insert_container(container, &self.layout.container)?;

        let (frame, exposed_methods) = match wallet {
            Some(wallet) => {
                let methods = wallet_methods(wallet);
                let names = methods.names().into_iter().map(str::to_string).collect();
                let connection = host.connect_to_child(&locator, &rounded, methods)?;
                (connection.frame, names)
            }
            None => (host.create_frame(&locator, &rounded)?, Vec::new()),
        };

        host.style_frame(&frame, &self.layout.frame)?;

        info!(
            %locator,
            exposed = exposed_methods.len(),
            "Widget attached"
        );

        Ok(Attachment {
            container: rounded,
            frame,
            locator,
            exposed_methods,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WidgetError;

    #[test]
    fn test_defaults() {
        let bridge = WidgetBridge::new("swap1");
        assert_eq!(bridge.resource_id(), "swap1");
        assert_eq!(bridge.network(), Network::Main);
        assert!(bridge.wallets().is_none());
        assert!(!bridge.requires_custom_wallet());
        assert_eq!(
            bridge.custom_wallet_provider().unwrap_err(),
            ConfigurationError::CustomWalletMissing
        );
    }

    #[test]
    fn test_locator_without_options() {
        let bridge = WidgetBridge::new("swap1");
        assert_eq!(
            bridge.locator().unwrap().as_str(),
            "https://widget.hydroprotocol.io/swap1"
        );
    }

    #[test]
    fn test_locator_with_all_options() {
        let bridge = WidgetBridge::new("abc")
            .with_network(Network::Local)
            .set_default_amount(12.5)
            .set_default_wallet(WalletKind::Ledger)
            .set_wallets([WalletKind::Ledger, WalletKind::Custom]);

        let locator = bridge.locator().unwrap();
        assert_eq!(
            locator.as_str(),
            "http://localhost:3000/abc?amount=12.50&defaultWallet=ledger&wallets=ledger%2Ccustom"
        );
        let pairs: Vec<(String, String)> = locator.query_pairs().into_owned().collect();
        assert_eq!(pairs[2], ("wallets".to_string(), "ledger,custom".to_string()));
    }

    #[test]
    fn test_locator_is_deterministic() {
        let bridge = WidgetBridge::new("id")
            .with_network(Network::Test)
            .set_wallets([WalletKind::Browser]);
        assert_eq!(bridge.locator().unwrap(), bridge.locator().unwrap());
    }

    #[test]
    fn test_zero_amount_is_sent() {
        let bridge = WidgetBridge::new("id").set_default_amount(0.0);
        assert_eq!(bridge.locator().unwrap().query(), Some("amount=0.00"));
    }

    #[test]
    fn test_setters_overwrite() {
        let bridge = WidgetBridge::new("id")
            .set_wallets([WalletKind::Custom])
            .set_wallets([WalletKind::Metamask])
            .set_default_wallet(WalletKind::Browser)
            .set_default_wallet(WalletKind::Metamask);
        assert_eq!(bridge.wallets(), Some(&[WalletKind::Metamask][..]));
        assert_eq!(bridge.default_wallet(), Some(WalletKind::Metamask));
        assert!(!bridge.requires_custom_wallet());
    }

    #[test]
    fn test_empty_wallet_list_is_sent() {
        let bridge = WidgetBridge::new("id").set_wallets(Vec::new());
        assert_eq!(bridge.locator().unwrap().query(), Some("wallets="));
    }

    #[test]
    fn test_custom_endpoints() {
        let bridge = WidgetBridge::new("id")
            .with_network(Network::Test)
            .with_endpoints(WidgetEndpoints::default().with_test("https://staging.example.com/w/"));
        assert_eq!(
            bridge.locator().unwrap().as_str(),
            "https://staging.example.com/w/id"
        );

        let broken = WidgetBridge::new("id")
            .with_endpoints(WidgetEndpoints::default().with_main("not a url"));
        assert!(matches!(broken.locator(), Err(WidgetError::Endpoint(_))));
    }
}
