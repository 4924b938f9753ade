//! # Host Bridge Traits
//!
//! Contracts between the widget core and the page (or native shell) that
//! hosts it.
//!
//! ## Overview
//!
//! The core never touches a DOM or a messaging channel directly. Everything it
//! needs from the host is expressed as a trait here and implemented per
//! platform (`bridge-wasm` for browsers, in-process fakes in tests).
//!
//! ## Traits
//!
//! - [`FrameLayout`](layout::FrameLayout) - Insert and style the widget container and frame
//! - [`FrameTransport`](transport::FrameTransport) - Connect to the child frame and expose a
//!   [`MethodTable`](transport::MethodTable)
//! - [`LoggerSink`](log::LoggerSink) - Forward structured logs to host logging
//!
//! ## Error Handling
//!
//! Collaborator failures are reported as [`BridgeError`](error::BridgeError).
//! Failures of individual remote calls travel back to the frame as
//! [`RemoteError`](transport::RemoteError) values instead.
//!
//! ## Thread Safety
//!
//! Method implementations and log sinks are `Send + Sync` on native targets.
//! On `wasm32` the bounds are relaxed through [`platform`], since browser
//! objects and JavaScript promises cannot cross threads.

pub mod error;
pub mod layout;
pub mod log;
pub mod platform;
pub mod transport;

pub use error::BridgeError;

// Re-export commonly used types
pub use layout::{ContainerStyle, FrameLayout, FrameStyle};
pub use log::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use platform::{boxed, PlatformBoxFuture, PlatformSend, PlatformSendSync};
pub use transport::{
    AsyncMethod, ChildConnection, FrameTransport, MethodTable, RemoteError, RemoteErrorKind,
    RemoteFuture, RemoteMethod, RemoteResult, SyncMethod,
};
