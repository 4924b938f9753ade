//! Hydro swap widget host bridge.
//!
//! Re-exports the workspace crates so host applications can depend on a
//! single crate:
//!
//! - [`wallet`] - the custom wallet hosts register handlers on
//! - [`widget`] - widget configuration, locator and `attach`
//! - [`runtime`] - logging and endpoint configuration
//! - [`traits`] - layout and transport contracts hosts implement
//!
//! The browser adapters (`bridge-wasm`) are available behind the `wasm`
//! feature on `wasm32` targets.

pub use bridge_traits as traits;
pub use core_runtime as runtime;
pub use core_wallet as wallet;
pub use core_widget as widget;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use bridge_wasm as wasm;

pub use core_wallet::{CustomWallet, HandlerError, TxData};
pub use core_widget::{Attachment, WalletKind, WidgetBridge, WidgetError};
