//! JavaScript bindings
//!
//! Exposes the custom wallet and the widget bridge to JavaScript hosts.
//! Wallet handlers are plain JavaScript functions returning a value or a
//! promise; a rejection (or throw) becomes a [`HandlerError`] carrying the
//! error's `message` and numeric `code`.
//!
//! # Example
//!
//! ```javascript
//! import { connectToChild } from 'penpal';
//!
//! const wallet = new JsCustomWallet("MyWallet", "https://example.com/icon.svg");
//! wallet
//!   .handleGetAccounts(async () => ["0xABC"])
//!   .handleSignTransaction(async (tx) => signer.sign(tx));
//!
//! new JsWidgetBridge("swap1", "main")
//!   .setDefaultAmount(12.5)
//!   .setWallets(["ledger", "custom"])
//!   .setCustomWalletProvider(wallet)
//!   .attach(document.getElementById("widget"), connectToChild);
//! ```

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;

use bridge_traits::log::LogLevel;
use core_runtime::config::Network;
use core_runtime::logging::{init_logging, LoggingConfig};
use core_wallet::{
    Capability, ConfigurationError, CustomWallet, HandlerError, HandlerFuture, HandlerResult,
    TxData,
};
use core_widget::{WalletKind, WidgetBridge};
use js_sys::{Array, Function, Promise, Reflect};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::HtmlElement;

use crate::dom::{to_js, DomHost};
use crate::error::js_error_message;

fn to_js_error<E: std::fmt::Display>(err: E) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

// =============================================================================
// Custom Wallet
// =============================================================================

/// JavaScript-accessible custom wallet
///
/// Handler registration returns the same wallet, so calls can be chained.
#[wasm_bindgen]
#[derive(Clone)]
pub struct JsCustomWallet {
    inner: Arc<CustomWallet>,
}

#[wasm_bindgen]
impl JsCustomWallet {
    /// Wallet shown to the user as `name`, with an optional icon.
    #[wasm_bindgen(constructor)]
    pub fn new(name: String, icon_url: Option<String>) -> JsCustomWallet {
        let wallet = CustomWallet::new(name);
        let wallet = match icon_url {
            Some(icon_url) => wallet.with_icon_url(icon_url),
            None => wallet,
        };
        Self {
            inner: Arc::new(wallet),
        }
    }

    /// Display name.
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.inner.name().to_string()
    }

    /// Icon reference, or `""`.
    #[wasm_bindgen(getter, js_name = iconURL)]
    pub fn icon_url(&self) -> String {
        self.inner.icon_url().to_string()
    }

    /// Register `handler(tx) -> boolean | Promise<boolean>`.
    #[wasm_bindgen(js_name = handleApproveTransaction)]
    pub fn handle_approve_transaction(&self, handler: Function) -> JsCustomWallet {
        self.inner
            .handle_approve_transaction(move |tx: TxData| call_handler(&handler, Some(&tx)));
        self.clone()
    }

    /// Register `handler() -> string[] | Promise<string[]>`.
    #[wasm_bindgen(js_name = handleGetAccounts)]
    pub fn handle_get_accounts(&self, handler: Function) -> JsCustomWallet {
        self.inner
            .handle_get_accounts(move || call_handler::<(), _>(&handler, None));
        self.clone()
    }

    /// Register `handler(tx) -> string | Promise<string>`.
    #[wasm_bindgen(js_name = handleSignTransaction)]
    pub fn handle_sign_transaction(&self, handler: Function) -> JsCustomWallet {
        self.inner
            .handle_sign_transaction(move |tx: TxData| call_handler(&handler, Some(&tx)));
        self.clone()
    }

    /// Throws synchronously when no handler is registered.
    #[wasm_bindgen(js_name = approveTransaction)]
    pub fn approve_transaction(&self, tx: JsValue) -> Result<Promise, JsValue> {
        self.inner
            .ensure_handler(Capability::ApproveTransaction)
            .map_err(to_js_error)?;
        let tx: TxData = serde_wasm_bindgen::from_value(tx).map_err(to_js_error)?;
        settle(self.inner.approve_transaction(tx))
    }

    /// Throws synchronously when no handler is registered.
    #[wasm_bindgen(js_name = getAccounts)]
    pub fn get_accounts(&self) -> Result<Promise, JsValue> {
        settle(self.inner.get_accounts())
    }

    /// Throws synchronously when no handler is registered.
    #[wasm_bindgen(js_name = signTransaction)]
    pub fn sign_transaction(&self, tx: JsValue) -> Result<Promise, JsValue> {
        self.inner
            .ensure_handler(Capability::SignTransaction)
            .map_err(to_js_error)?;
        let tx: TxData = serde_wasm_bindgen::from_value(tx).map_err(to_js_error)?;
        settle(self.inner.sign_transaction(tx))
    }
}

/// Call a JavaScript handler now and await whatever it returned.
fn call_handler<A, T>(
    handler: &Function,
    arg: Option<&A>,
) -> impl Future<Output = HandlerResult<T>> + 'static
where
    A: Serialize,
    T: DeserializeOwned + 'static,
{
    let returned = match arg {
        Some(arg) => to_js(arg)
            .map_err(|e| HandlerError::new(e.to_string()))
            .and_then(|arg| handler.call1(&JsValue::NULL, &arg).map_err(handler_error)),
        None => handler
            .apply(&JsValue::NULL, &Array::new())
            .map_err(handler_error),
    };

    async move {
        let value = JsFuture::from(Promise::resolve(&returned?))
            .await
            .map_err(handler_error)?;
        serde_wasm_bindgen::from_value(value).map_err(|e| HandlerError::new(e.to_string()))
    }
}

fn handler_error(value: JsValue) -> HandlerError {
    let error = HandlerError::new(js_error_message(&value));
    let code = Reflect::get(&value, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_f64());
    match code {
        Some(code) => error.with_code(code as i64),
        None => error,
    }
}

fn settle<T>(call: Result<HandlerFuture<T>, ConfigurationError>) -> Result<Promise, JsValue>
where
    T: Serialize + 'static,
{
    let pending = call.map_err(to_js_error)?;
    Ok(future_to_promise(async move {
        match pending.await {
            Ok(value) => to_js(&value).map_err(JsValue::from),
            Err(err) => Err(handler_error_to_js(err)),
        }
    }))
}

fn handler_error_to_js(err: HandlerError) -> JsValue {
    let error = js_sys::Error::new(&err.message);
    if let Some(code) = err.code {
        let _ = Reflect::set(&error, &JsValue::from_str("code"), &JsValue::from_f64(code as f64));
    }
    error.into()
}

// =============================================================================
// Widget Bridge
// =============================================================================

/// JavaScript-accessible widget bridge
///
/// Setters return the same bridge, so calls can be chained.
#[wasm_bindgen]
#[derive(Clone)]
pub struct JsWidgetBridge {
    inner: Rc<RefCell<WidgetBridge>>,
}

#[wasm_bindgen]
impl JsWidgetBridge {
    /// `network` is `"main"` (default), `"test"` or `"local"`.
    #[wasm_bindgen(constructor)]
    pub fn new(resource_id: String, network: Option<String>) -> Result<JsWidgetBridge, JsValue> {
        let network = match network {
            Some(network) => network.parse::<Network>().map_err(to_js_error)?,
            None => Network::default(),
        };
        Ok(Self {
            inner: Rc::new(RefCell::new(
                WidgetBridge::new(resource_id).with_network(network),
            )),
        })
    }

    /// Amount pre-filled in the widget.
    #[wasm_bindgen(js_name = setDefaultAmount)]
    pub fn set_default_amount(&self, amount: f64) -> JsWidgetBridge {
        self.update(|bridge| bridge.set_default_amount(amount))
    }

    /// Wallet selected when the widget opens.
    #[wasm_bindgen(js_name = setDefaultWallet)]
    pub fn set_default_wallet(&self, wallet: &str) -> Result<JsWidgetBridge, JsValue> {
        let wallet = wallet.parse::<WalletKind>().map_err(to_js_error)?;
        Ok(self.update(|bridge| bridge.set_default_wallet(wallet)))
    }

    /// Wallet options, in display order.
    #[wasm_bindgen(js_name = setWallets)]
    pub fn set_wallets(&self, wallets: Vec<String>) -> Result<JsWidgetBridge, JsValue> {
        let wallets = wallets
            .iter()
            .map(|wallet| wallet.parse::<WalletKind>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(to_js_error)?;
        Ok(self.update(|bridge| bridge.set_wallets(wallets)))
    }

    /// Wallet backing the `custom` option.
    #[wasm_bindgen(js_name = setCustomWalletProvider)]
    pub fn set_custom_wallet_provider(&self, wallet: &JsCustomWallet) -> JsWidgetBridge {
        let wallet = Arc::clone(&wallet.inner);
        self.update(|bridge| bridge.set_custom_wallet_provider(wallet))
    }

    /// The widget locator.
    pub fn locator(&self) -> Result<String, JsValue> {
        Ok(self.inner.borrow().locator().map_err(to_js_error)?.to_string())
    }

    /// Attach the widget under `container` and return the frame element.
    ///
    /// `connectToChild` is only needed when the custom wallet is offered.
    pub fn attach(
        &self,
        container: HtmlElement,
        connect_to_child: Option<Function>,
    ) -> Result<HtmlElement, JsValue> {
        let host = DomHost::new(connect_to_child)?;
        let bridge = self.inner.borrow().clone();
        let attachment = bridge.attach(&host, &container).map_err(to_js_error)?;
        Ok(attachment.frame)
    }
}

impl JsWidgetBridge {
    fn update(&self, apply: impl FnOnce(WidgetBridge) -> WidgetBridge) -> JsWidgetBridge {
        let current = self.inner.borrow().clone();
        *self.inner.borrow_mut() = apply(current);
        self.clone()
    }
}

// =============================================================================
// Module Info
// =============================================================================

/// Route `tracing` output to the browser console and install the panic hook.
///
/// `level` is one of `trace`, `debug`, `info` (default), `warn`, `error`.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_browser_logging(level: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = match level.as_deref() {
        None | Some("info") => LogLevel::Info,
        Some("trace") => LogLevel::Trace,
        Some("debug") => LogLevel::Debug,
        Some("warn") => LogLevel::Warn,
        Some("error") => LogLevel::Error,
        Some(other) => return Err(to_js_error(format!("Unknown log level: {}", other))),
    };
    init_logging(LoggingConfig::default().with_level(level)).map_err(to_js_error)
}

/// Get the bridge-wasm version
#[wasm_bindgen(js_name = bridgeWasmVersion)]
pub fn bridge_wasm_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
