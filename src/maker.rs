use std::fmt;
#[cfg(feature = "aio")]
use std::future::Future;

#[cfg(feature = "aio")]
use async_trait::async_trait;

/// Maker responsible for creating new objects for a blocking pool.
pub trait SyncMaker: Sync + Send {
    /// Type of objects that this [`SyncMaker`] creates.
    type Type;
    /// Error that this [`SyncMaker`] can return when creating objects.
    type Error;

    /// Creates a new instance of [`SyncMaker::Type`].
    ///
    /// # Errors
    ///
    /// Any error is handed to the caller of the pool's `get` unchanged.
    fn create(&self) -> Result<Self::Type, Self::Error>;
}

/// Maker responsible for creating new objects for an async pool.
#[cfg(feature = "aio")]
#[async_trait]
pub trait Maker: Sync + Send {
    /// Type of objects that this [`Maker`] creates.
    type Type;
    /// Error that this [`Maker`] can return when creating objects.
    type Error;

    /// Creates a new instance of [`Maker::Type`].
    async fn create(&self) -> Result<Self::Type, Self::Error>;
}

/// Adapts a plain closure into a maker.
///
/// It implements both [`SyncMaker`] and [`Maker`], so the same closure can
/// feed a blocking or an async pool.
#[derive(Clone, Copy)]
pub struct FnMaker<F> {
    f: F,
}

impl<F> FnMaker<F> {
    /// Wraps `f`.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnMaker<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad("FnMaker { .. }")
    }
}

impl<F, T, E> SyncMaker for FnMaker<F>
where
    F: Fn() -> Result<T, E> + Send + Sync,
{
    type Type = T;
    type Error = E;

    fn create(&self) -> Result<T, E> {
        (self.f)()
    }
}

#[cfg(feature = "aio")]
#[async_trait]
impl<F, T, E> Maker for FnMaker<F>
where
    F: Fn() -> Result<T, E> + Send + Sync,
    T: Send + 'static,
    E: Send + 'static,
{
    type Type = T;
    type Error = E;

    async fn create(&self) -> Result<T, E> {
        (self.f)()
    }
}

/// Adapts a closure returning a future into a [`Maker`].
#[cfg(feature = "aio")]
#[derive(Clone, Copy)]
pub struct AsyncFnMaker<F> {
    f: F,
}

#[cfg(feature = "aio")]
impl<F> AsyncFnMaker<F> {
    /// Wraps `f`.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[cfg(feature = "aio")]
impl<F> fmt::Debug for AsyncFnMaker<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad("AsyncFnMaker { .. }")
    }
}

#[cfg(feature = "aio")]
#[async_trait]
impl<F, Fut, T, E> Maker for AsyncFnMaker<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Type = T;
    type Error = E;

    async fn create(&self) -> Result<T, E> {
        (self.f)().await
    }
}
