//! Browser adapters for the widget bridge
//!
//! This crate implements the host contracts from `bridge-traits` on top of
//! the page DOM and exports the custom wallet and widget bridge to
//! JavaScript through `wasm-bindgen`.
//!
//! # Platform Support
//!
//! This crate is designed exclusively for the `wasm32-unknown-unknown` target.
//! It will not compile for native targets.
//!
//! # Implementations
//!
//! - [`DomHost`]: container and frame layout over `web-sys`, transport
//!   delegating to a page-supplied Penpal `connectToChild`
//! - [`JsCustomWallet`] / [`JsWidgetBridge`]: JavaScript-facing wrappers
//!
//! # Examples
//!
//! ```ignore
//! use bridge_wasm::DomHost;
//! use core_widget::{WalletKind, WidgetBridge};
//!
//! let host = DomHost::new(Some(connect_to_child))?;
//! let bridge = WidgetBridge::new("swap1").set_wallets([WalletKind::Browser]);
//! let attachment = bridge.attach(&host, &container)?;
//! ```

#![cfg(target_arch = "wasm32")]
#![warn(missing_docs)]

pub mod bindings;
pub mod dom;
pub mod error;

// Re-export commonly used types
pub use bindings::{JsCustomWallet, JsWidgetBridge};
pub use dom::DomHost;
pub use error::{WasmError, WasmResult};
