//! # Core Wallet
//!
//! The host side of the "custom wallet" option: a [`CustomWallet`] holds the
//! host's async handlers for approving, signing and listing accounts, and
//! checks that a handler exists before it is used.
//!
//! ## Errors
//!
//! - [`ConfigurationError`] - the integration is incomplete; raised
//!   synchronously, never retried.
//! - [`HandlerError`] - a handler's own failure; passed through untouched.

pub mod error;
pub mod handler;
pub mod types;
pub mod wallet;

pub use error::{ConfigurationError, HandlerError, HandlerResult, USER_REJECTED_CODE};
pub use handler::{CapabilityHandler, HandlerFuture};
pub use types::{Capability, Quantity, TxData};
pub use wallet::CustomWallet;
