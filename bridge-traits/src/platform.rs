//! Platform-specific helper abstractions used to keep trait bounds aligned with
//! the threading guarantees of each target.
//!
//! Native hosts may drive wallet handlers from a multi-threaded executor, so
//! handlers, remote methods and their futures must be `Send` there. In the
//! browser everything runs on the page's event loop and handlers wrap
//! JavaScript promises, which are never `Send`. The helpers below make the
//! bounds conditional without duplicating every trait definition.

use std::future::Future;
use std::pin::Pin;

/// Marker trait that applies `Send + Sync` on native targets while becoming a
/// no-op on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait PlatformSendSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<T> PlatformSendSync for T where T: Send + Sync {}

#[cfg(target_arch = "wasm32")]
pub trait PlatformSendSync {}

#[cfg(target_arch = "wasm32")]
impl<T> PlatformSendSync for T {}

/// Marker trait equivalent to `Send` on native targets.
#[cfg(not(target_arch = "wasm32"))]
pub trait PlatformSend: Send {}

#[cfg(not(target_arch = "wasm32"))]
impl<T> PlatformSend for T where T: Send {}

#[cfg(target_arch = "wasm32")]
pub trait PlatformSend {}

#[cfg(target_arch = "wasm32")]
impl<T> PlatformSend for T {}

/// Owned, type-erased future that is `Send` when the target allows it.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformBoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

#[cfg(target_arch = "wasm32")]
pub type PlatformBoxFuture<T> = Pin<Box<dyn Future<Output = T> + 'static>>;

/// Box a future into a [`PlatformBoxFuture`].
pub fn boxed<F>(future: F) -> PlatformBoxFuture<F::Output>
where
    F: Future + PlatformSend + 'static,
{
    Box::pin(future)
}
