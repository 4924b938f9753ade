//! Frame Transport Abstraction
//!
//! The transport connects the host page to a child frame and exposes a table
//! of named methods the child may invoke. Arguments and results cross the
//! boundary as JSON values; how they are carried (`postMessage`, a native
//! webview channel, an in-process fake) is up to the implementation.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use futures::future;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::error::Result;
use crate::layout::FrameLayout;
use crate::platform::{boxed, PlatformBoxFuture, PlatformSendSync};

/// Why a remote call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RemoteErrorKind {
    /// The host integration is incomplete (e.g. a handler was never registered).
    Configuration,
    /// The host-side handler itself failed.
    Handler,
    /// The arguments sent by the frame could not be decoded.
    InvalidArguments,
    /// No method with that name is exposed.
    UnknownMethod,
}

/// Error returned to the frame for a failed remote call.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message}")]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

impl RemoteError {
    pub fn new(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    pub fn unknown_method(name: &str) -> Self {
        Self::new(
            RemoteErrorKind::UnknownMethod,
            format!("Method not exposed: {}", name),
        )
    }

    pub fn invalid_arguments(method: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            RemoteErrorKind::InvalidArguments,
            format!("Invalid arguments for {}: {}", method, reason),
        )
    }
}

pub type RemoteResult = std::result::Result<Value, RemoteError>;

pub type RemoteFuture = PlatformBoxFuture<RemoteResult>;

/// A method that answers with a future.
pub trait AsyncMethod: PlatformSendSync {
    fn call(&self, args: Vec<Value>) -> RemoteFuture;
}

impl<F> AsyncMethod for F
where
    F: Fn(Vec<Value>) -> RemoteFuture + PlatformSendSync,
{
    fn call(&self, args: Vec<Value>) -> RemoteFuture {
        self(args)
    }
}

/// A method that answers immediately.
pub trait SyncMethod: PlatformSendSync {
    fn call(&self, args: Vec<Value>) -> RemoteResult;
}

impl<F> SyncMethod for F
where
    F: Fn(Vec<Value>) -> RemoteResult + PlatformSendSync,
{
    fn call(&self, args: Vec<Value>) -> RemoteResult {
        self(args)
    }
}

/// An exposed method implementation.
#[derive(Clone)]
pub enum RemoteMethod {
    Async(Arc<dyn AsyncMethod>),
    Sync(Arc<dyn SyncMethod>),
}

impl RemoteMethod {
    pub fn is_async(&self) -> bool {
        matches!(self, RemoteMethod::Async(_))
    }
}

/// Named methods exposed to a child frame.
#[derive(Clone, Default)]
pub struct MethodTable {
    methods: BTreeMap<String, RemoteMethod>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose an asynchronous method, replacing any method with the same name.
    pub fn register_async<M>(&mut self, name: impl Into<String>, method: M) -> &mut Self
    where
        M: AsyncMethod + 'static,
    {
        self.methods
            .insert(name.into(), RemoteMethod::Async(Arc::new(method)));
        self
    }

    /// Expose a synchronous method, replacing any method with the same name.
    pub fn register_sync<M>(&mut self, name: impl Into<String>, method: M) -> &mut Self
    where
        M: SyncMethod + 'static,
    {
        self.methods
            .insert(name.into(), RemoteMethod::Sync(Arc::new(method)));
        self
    }

    pub fn get(&self, name: &str) -> Option<&RemoteMethod> {
        self.methods.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.methods.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RemoteMethod)> {
        self.methods.iter().map(|(name, method)| (name.as_str(), method))
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Dispatch a call the way a transport does when a message arrives.
    ///
    /// Synchronous methods resolve immediately; unknown names resolve to
    /// [`RemoteErrorKind::UnknownMethod`].
    pub fn invoke(&self, name: &str, args: Vec<Value>) -> RemoteFuture {
        match self.methods.get(name) {
            Some(RemoteMethod::Async(method)) => method.call(args),
            Some(RemoteMethod::Sync(method)) => boxed(future::ready(method.call(args))),
            None => boxed(future::ready(Err(RemoteError::unknown_method(name)))),
        }
    }

    /// Call a synchronous method without going through a future.
    pub fn call_sync(&self, name: &str, args: Vec<Value>) -> RemoteResult {
        match self.methods.get(name) {
            Some(RemoteMethod::Sync(method)) => method.call(args),
            Some(RemoteMethod::Async(_)) => Err(RemoteError::new(
                RemoteErrorKind::UnknownMethod,
                format!("{} is asynchronous", name),
            )),
            None => Err(RemoteError::unknown_method(name)),
        }
    }
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTable")
            .field("methods", &self.names())
            .finish()
    }
}

/// Handle returned by [`FrameTransport::connect_to_child`].
#[derive(Debug, Clone)]
pub struct ChildConnection<E> {
    /// The embedded frame element created by the transport.
    pub frame: E,
}

/// Frame-to-frame RPC primitive
///
/// Loads `url` in a new child frame appended to `append_to` and makes every
/// method in `methods` callable from inside that frame. Implementations own
/// message framing, origin checks and the handshake; the core only supplies
/// the method table.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::transport::{FrameTransport, MethodTable};
///
/// fn open<T: FrameTransport>(host: &T, url: &url::Url, parent: &T::Element) {
///     let connection = host.connect_to_child(url, parent, MethodTable::new())?;
///     // connection.frame is the embedded element
/// }
/// ```
pub trait FrameTransport: FrameLayout {
    fn connect_to_child(
        &self,
        url: &Url,
        append_to: &Self::Element,
        methods: MethodTable,
    ) -> Result<ChildConnection<Self::Element>>;
}
