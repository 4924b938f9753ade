//! Remote method surface exposed to the widget frame
//!
//! Each method is a thin shim over the [`CustomWallet`]: decode the
//! arguments, forward, encode the result. A missing handler becomes a
//! rejected future carrying [`RemoteErrorKind::Configuration`]; handler
//! failures are passed on unchanged.

use std::sync::Arc;

use bridge_traits::platform::{boxed, PlatformSend};
use bridge_traits::transport::{
    MethodTable, RemoteError, RemoteErrorKind, RemoteFuture, RemoteResult,
};
use core_wallet::{Capability, ConfigurationError, CustomWallet, HandlerFuture, TxData};
use futures::future::ready;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

pub const APPROVE_TRANSACTION: &str = "approveTransaction";
pub const GET_ACCOUNTS: &str = "getAccounts";
pub const SIGN_TRANSACTION: &str = "signTransaction";
pub const GET_ICON_URL: &str = "getIconURL";
pub const GET_NAME: &str = "getName";

/// Every method name exposed when the custom wallet is offered.
pub const EXPOSED_METHODS: [&str; 5] = [
    APPROVE_TRANSACTION,
    GET_ACCOUNTS,
    SIGN_TRANSACTION,
    GET_ICON_URL,
    GET_NAME,
];

/// Build the method table forwarding to `wallet`.
pub fn wallet_methods(wallet: Arc<CustomWallet>) -> MethodTable {
    let mut methods = MethodTable::new();

    let approver = Arc::clone(&wallet);
    methods.register_async(APPROVE_TRANSACTION, move |args: Vec<Value>| -> RemoteFuture {
        let tx = match registered_tx(&approver, Capability::ApproveTransaction, args) {
            Ok(tx) => tx,
            Err(err) => return rejected(err),
        };
        forward(APPROVE_TRANSACTION, approver.approve_transaction(tx))
    });

    let accounts = Arc::clone(&wallet);
    methods.register_async(GET_ACCOUNTS, move |_args: Vec<Value>| -> RemoteFuture {
        forward(GET_ACCOUNTS, accounts.get_accounts())
    });

    let signer = Arc::clone(&wallet);
    methods.register_async(SIGN_TRANSACTION, move |args: Vec<Value>| -> RemoteFuture {
        let tx = match registered_tx(&signer, Capability::SignTransaction, args) {
            Ok(tx) => tx,
            Err(err) => return rejected(err),
        };
        forward(SIGN_TRANSACTION, signer.sign_transaction(tx))
    });

    let icon = Arc::clone(&wallet);
    methods.register_sync(GET_ICON_URL, move |_args: Vec<Value>| -> RemoteResult {
        Ok(Value::String(icon.icon_url().to_string()))
    });

    methods.register_sync(GET_NAME, move |_args: Vec<Value>| -> RemoteResult {
        Ok(Value::String(wallet.name().to_string()))
    });

    methods
}

/// Transaction argument of a call to `capability`.
///
/// An unregistered capability is reported before the arguments are looked at.
fn registered_tx(
    wallet: &CustomWallet,
    capability: Capability,
    args: Vec<Value>,
) -> Result<TxData, RemoteError> {
    wallet.ensure_handler(capability)?;
    tx_argument(capability.method_name(), args)
}

fn tx_argument(method: &str, args: Vec<Value>) -> Result<TxData, RemoteError> {
    let raw = args
        .into_iter()
        .next()
        .ok_or_else(|| RemoteError::invalid_arguments(method, "missing transaction"))?;
    serde_json::from_value(raw).map_err(|e| RemoteError::invalid_arguments(method, e))
}

fn forward<T>(
    method: &'static str,
    call: Result<HandlerFuture<T>, ConfigurationError>,
) -> RemoteFuture
where
    T: Serialize + PlatformSend + 'static,
{
    debug!(method, "Forwarding remote call to custom wallet");
    match call {
        Ok(pending) => boxed(async move {
            let value = pending.await.map_err(RemoteError::from)?;
            serde_json::to_value(value).map_err(|e| {
                RemoteError::new(
                    RemoteErrorKind::Handler,
                    format!("Failed to encode {} result: {}", method, e),
                )
            })
        }),
        Err(err) => rejected(err.into()),
    }
}

fn rejected(err: RemoteError) -> RemoteFuture {
    boxed(ready(Err(err)))
}
