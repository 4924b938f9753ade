//! Handler plumbing
//!
//! Any closure returning a future of `HandlerResult<T>` can back a
//! capability. Handlers are stored type-erased behind an `Arc`, so a call can
//! keep its own reference to the handler it started with.

use std::future::Future;
use std::sync::Arc;

use bridge_traits::platform::{boxed, PlatformBoxFuture, PlatformSend, PlatformSendSync};

use crate::error::HandlerResult;
use crate::types::TxData;

/// Future returned by a capability handler.
pub type HandlerFuture<T> = PlatformBoxFuture<HandlerResult<T>>;

/// A host-side implementation of one capability.
pub trait CapabilityHandler<A, T>: PlatformSendSync {
    fn invoke(&self, args: A) -> HandlerFuture<T>;
}

impl<F, Fut, A, T> CapabilityHandler<A, T> for F
where
    F: Fn(A) -> Fut + PlatformSendSync,
    Fut: Future<Output = HandlerResult<T>> + PlatformSend + 'static,
{
    fn invoke(&self, args: A) -> HandlerFuture<T> {
        boxed(self(args))
    }
}

pub(crate) type ApproveTransactionFn = Arc<dyn CapabilityHandler<TxData, bool>>;
pub(crate) type GetAccountsFn = Arc<dyn CapabilityHandler<(), Vec<String>>>;
pub(crate) type SignTransactionFn = Arc<dyn CapabilityHandler<TxData, String>>;

/// Registered handlers, one optional slot per capability.
#[derive(Clone, Default)]
pub(crate) struct HandlerTable {
    pub approve_transaction: Option<ApproveTransactionFn>,
    pub get_accounts: Option<GetAccountsFn>,
    pub sign_transaction: Option<SignTransactionFn>,
}
