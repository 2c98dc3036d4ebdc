use std::{fmt, future::Future, pin::pin, sync::Arc};

use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::{
    slots::{Checkout, Reservation, Slots},
    AsyncFnMaker, BuildError, FnMaker, Maker, PoolError, ReleaseError, Status,
};

use super::PoolBuilder;

/// Generic object pool for async code.
///
/// This struct can be cloned and transferred across thread boundaries and uses
/// reference counting for its internal state.
pub struct Pool<M: Maker> {
    inner: Arc<PoolInner<M>>,
}

// Implemented manually to avoid unnecessary trait bound on `M::Type`.
impl<M> fmt::Debug for Pool<M>
where
    M: fmt::Debug + Maker,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("maker", &self.inner.maker)
            .field("status", &self.status())
            .finish()
    }
}

impl<M: Maker> Clone for Pool<M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<F, T, E> Pool<FnMaker<F>>
where
    F: Fn() -> Result<T, E> + Send + Sync,
    T: Send + 'static,
    E: Send + 'static,
{
    /// Instantiates a builder for a [`Pool`] whose objects are created by
    /// calling the synchronous `f`.
    pub fn from_fn(f: F) -> PoolBuilder<FnMaker<F>> {
        PoolBuilder::new(FnMaker::new(f))
    }
}

impl<F, Fut, T, E> Pool<AsyncFnMaker<F>>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    /// Instantiates a builder for a [`Pool`] whose objects are created by
    /// awaiting the future returned from `f`.
    pub fn from_async_fn(f: F) -> PoolBuilder<AsyncFnMaker<F>> {
        PoolBuilder::new(AsyncFnMaker::new(f))
    }
}

impl<M: Maker> PoolBuilder<M> {
    /// Builds the [`Pool`].
    ///
    /// [`PoolConfig::timeout`] is ignored by async pools.
    ///
    /// # Errors
    ///
    /// See [`BuildError`] for details.
    ///
    /// [`PoolConfig::timeout`]: crate::PoolConfig::timeout
    pub fn build(self) -> Result<Pool<M>, BuildError> {
        Pool::from_builder(self)
    }
}

impl<M: Maker> Pool<M> {
    /// Instantiates a builder for a new [`Pool`].
    pub fn builder(maker: M) -> PoolBuilder<M> {
        PoolBuilder::new(maker)
    }

    /// Creates a new [`Pool`] holding at most `max_size` objects, or an
    /// unbounded one if `max_size` is [`None`].
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidCapacity`] if `max_size` is `Some(0)`.
    pub fn new(maker: M, max_size: Option<usize>) -> Result<Self, BuildError> {
        let builder = match max_size {
            Some(max_size) => Self::builder(maker).max_size(max_size),
            None => Self::builder(maker).unbounded(),
        };
        builder.build()
    }

    fn from_builder(builder: PoolBuilder<M>) -> Result<Self, BuildError> {
        let (maker, config) = builder.into_parts()?;
        Ok(Self {
            inner: Arc::new(PoolInner {
                slots: Mutex::new(Slots::new(config.max_size)),
                available: Notify::new(),
                maker,
            }),
        })
    }

    /// Retrieves an object from this [`Pool`] or waits for one to be
    /// released.
    ///
    /// Idle objects are handed out first, oldest release first. Otherwise a
    /// new object is created if the pool may still grow. Otherwise the
    /// future stays pending until a [`Pool::release()`] makes an object
    /// available to it. Dropping the future cancels the wait without
    /// affecting the pool.
    ///
    /// The returned future is [`Send`] (and so can be passed to
    /// `tokio::spawn`) only when the maker's `Type` and `Error` hold no
    /// borrowed lifetimes, not even `'static` ones such as `&'static str`.
    /// Use owned types like [`String`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Backend`] if the maker failed.
    pub async fn get(&self) -> Result<M::Type, PoolError<M::Error>> {
        loop {
            // Register as a waiter before looking at the free-list so a
            // release in between is not lost.
            let mut notified = pin!(self.inner.available.notified());
            let _ = notified.as_mut().enable();

            // The guard must be gone before any `.await`.
            let checkout = self.inner.slots.lock().checkout();
            match checkout {
                Checkout::Idle(obj) => return Ok(obj),
                Checkout::Create => break,
                Checkout::Exhausted => {
                    cfg_tracing! {
                        tracing::trace!("pool exhausted, waiting for a release");
                    }
                    notified.await;
                }
            }
        }
        // Not registered any more, so releases during creation go to the
        // tasks that are actually waiting.
        self.create().await
    }

    async fn create(&self) -> Result<M::Type, PoolError<M::Error>> {
        cfg_tracing! {
            tracing::trace!("creating a new pooled object");
        }
        let reservation = Reservation::new(&self.inner.slots, &self.inner.available);
        let obj = self.inner.maker.create().await?;
        reservation.commit();
        Ok(obj)
    }

    /// Returns `obj` to this [`Pool`] and wakes one waiting task.
    ///
    /// Releasing never suspends. The pool does not check that `obj` came
    /// from it.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError`] holding `obj` if the pool already holds
    /// [`PoolConfig::max_size`] idle objects. The pool is left unchanged.
    ///
    /// [`PoolConfig::max_size`]: crate::PoolConfig::max_size
    pub fn release(&self, obj: M::Type) -> Result<(), ReleaseError<M::Type>> {
        self.inner.slots.lock().checkin(obj).map_err(|obj| {
            cfg_tracing! {
                tracing::debug!("pool is full, rejecting released object");
            }
            ReleaseError::new(obj)
        })?;
        self.inner.available.notify_one();
        Ok(())
    }

    /// Returns the number of idle objects in this [`Pool`].
    ///
    /// Objects currently checked out are not counted.
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.slots.lock().len()
    }

    /// Returns the maximum number of objects this [`Pool`] creates, if any.
    #[must_use]
    pub fn max_size(&self) -> Option<usize> {
        self.inner.slots.lock().max_size()
    }

    /// Retrieves [`Status`] of this [`Pool`].
    #[must_use]
    pub fn status(&self) -> Status {
        self.inner.slots.lock().status()
    }

    /// Returns [`Maker`] of this [`Pool`].
    #[must_use]
    pub fn maker(&self) -> &M {
        &self.inner.maker
    }
}

struct PoolInner<M: Maker> {
    slots: Mutex<Slots<M::Type>>,
    available: Notify,
    maker: M,
}
