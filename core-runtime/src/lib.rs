//! # Core Runtime Module
//!
//! Provides the runtime infrastructure the widget crates share:
//! - Logging and tracing infrastructure
//! - Deployment configuration (widget endpoints, layout defaults)
//!
//! ## Overview
//!
//! Nothing in here knows about wallets or frames. `core-wallet` and
//! `core-widget` depend on this crate for their logging conventions and for
//! the per-network base locators.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Network, WidgetEndpoints, WidgetLayout};
pub use error::{Error, Result};
