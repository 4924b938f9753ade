//! # Widget Core
//!
//! Attaches the embedded swap widget to a host container and, when the
//! custom wallet is offered, exposes the host's [`CustomWallet`] to the
//! widget frame.
//!
//! ## Overview
//!
//! - [`WidgetBridge`] - Configuration builder and `attach` entry point
//! - [`locator`] - Widget locator construction
//! - [`surface`] - Remote methods forwarded to the custom wallet
//!
//! Hosts provide the layout and transport through
//! [`bridge_traits::FrameTransport`]; see `bridge-wasm` for the browser
//! implementation.
//!
//! [`CustomWallet`]: core_wallet::CustomWallet

pub mod bridge;
pub mod error;
pub mod locator;
pub mod surface;
pub mod wallet_kind;

pub use bridge::{Attachment, WidgetBridge};
pub use error::{Result, WidgetError};
pub use wallet_kind::WalletKind;
