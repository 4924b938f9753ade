//! # Custom Wallet
//!
//! A host-defined wallet the embedded widget can use when the user picks the
//! "custom" option. The host registers an async handler per capability; the
//! widget then calls those capabilities through the frame bridge.
//!
//! ## Late validation
//!
//! Handlers are optional at construction. A host that only needs accounts
//! and signing never registers `approveTransaction`; calling an unregistered
//! capability fails synchronously with [`ConfigurationError::HandlerMissing`]
//! and no async work is started.
//!
//! ## Usage
//!
//! ```no_run
//! use core_wallet::{CustomWallet, HandlerError, TxData};
//!
//! let wallet = CustomWallet::new("MyWallet").with_icon_url("https://example.com/icon.svg");
//! wallet
//!     .handle_get_accounts(|| async { Ok::<_, HandlerError>(vec!["0xABC".to_string()]) })
//!     .handle_sign_transaction(|_tx: TxData| async move {
//!         Err::<String, _>(HandlerError::user_rejected())
//!     });
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use bridge_traits::platform::{PlatformSend, PlatformSendSync};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::{ConfigurationError, HandlerResult};
use crate::handler::{HandlerFuture, HandlerTable};
use crate::types::{Capability, TxData};

/// Capability provider backed by host-registered handlers.
pub struct CustomWallet {
    name: String,
    icon_url: Option<String>,
    handlers: RwLock<HandlerTable>,
}

impl CustomWallet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon_url: None,
            handlers: RwLock::new(HandlerTable::default()),
        }
    }

    /// Set the icon shown next to the wallet name (URL or data URI).
    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Icon reference, or an empty string when none was given.
    pub fn icon_url(&self) -> &str {
        self.icon_url.as_deref().unwrap_or("")
    }

    pub fn has_handler(&self, capability: Capability) -> bool {
        let handlers = self.handlers.read();
        match capability {
            Capability::ApproveTransaction => handlers.approve_transaction.is_some(),
            Capability::GetAccounts => handlers.get_accounts.is_some(),
            Capability::SignTransaction => handlers.sign_transaction.is_some(),
        }
    }

    /// Fail with [`ConfigurationError::HandlerMissing`] unless `capability`
    /// has a handler.
    ///
    /// Lets callers reject an unregistered capability before doing any work
    /// on its arguments.
    pub fn ensure_handler(&self, capability: Capability) -> Result<(), ConfigurationError> {
        if self.has_handler(capability) {
            Ok(())
        } else {
            Err(self.missing(capability))
        }
    }

    pub fn registered_capabilities(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|capability| self.has_handler(*capability))
            .collect()
    }

    /// Ask the host to approve `tx`.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::HandlerMissing`] if no handler was registered.
    /// Handler failures surface through the returned future.
    pub fn approve_transaction(
        &self,
        tx: TxData,
    ) -> Result<HandlerFuture<bool>, ConfigurationError> {
        let handler = self.handlers.read().approve_transaction.clone();
        let handler = handler.ok_or_else(|| self.missing(Capability::ApproveTransaction))?;
        Ok(handler.invoke(tx))
    }

    /// Accounts the host makes available to the widget.
    pub fn get_accounts(&self) -> Result<HandlerFuture<Vec<String>>, ConfigurationError> {
        let handler = self.handlers.read().get_accounts.clone();
        let handler = handler.ok_or_else(|| self.missing(Capability::GetAccounts))?;
        Ok(handler.invoke(()))
    }

    /// Sign `tx`, resolving to the hex-encoded signed transaction.
    pub fn sign_transaction(
        &self,
        tx: TxData,
    ) -> Result<HandlerFuture<String>, ConfigurationError> {
        let handler = self.handlers.read().sign_transaction.clone();
        let handler = handler.ok_or_else(|| self.missing(Capability::SignTransaction))?;
        Ok(handler.invoke(tx))
    }

    pub fn handle_approve_transaction<F, Fut>(&self, handler: F) -> &Self
    where
        F: Fn(TxData) -> Fut + PlatformSendSync + 'static,
        Fut: Future<Output = HandlerResult<bool>> + PlatformSend + 'static,
    {
        self.handlers.write().approve_transaction = Some(Arc::new(handler));
        self.registered(Capability::ApproveTransaction)
    }

    pub fn handle_get_accounts<F, Fut>(&self, handler: F) -> &Self
    where
        F: Fn() -> Fut + PlatformSendSync + 'static,
        Fut: Future<Output = HandlerResult<Vec<String>>> + PlatformSend + 'static,
    {
        self.handlers.write().get_accounts = Some(Arc::new(move |()| handler()));
        self.registered(Capability::GetAccounts)
    }

    pub fn handle_sign_transaction<F, Fut>(&self, handler: F) -> &Self
    where
        F: Fn(TxData) -> Fut + PlatformSendSync + 'static,
        Fut: Future<Output = HandlerResult<String>> + PlatformSend + 'static,
    {
        self.handlers.write().sign_transaction = Some(Arc::new(handler));
        self.registered(Capability::SignTransaction)
    }

    fn registered(&self, capability: Capability) -> &Self {
        debug!(wallet = %self.name, %capability, "Registered wallet handler");
        self
    }

    fn missing(&self, capability: Capability) -> ConfigurationError {
        warn!(wallet = %self.name, %capability, "Wallet capability invoked without a handler");
        ConfigurationError::HandlerMissing(capability)
    }
}

impl fmt::Debug for CustomWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomWallet")
            .field("name", &self.name)
            .field("icon_url", &self.icon_url)
            .field("handlers", &self.registered_capabilities())
            .finish()
    }
}
