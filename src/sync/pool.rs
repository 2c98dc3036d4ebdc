use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::{Condvar, Mutex};

use crate::{
    config::timeout_from_secs,
    slots::{Checkout, Reservation, Slots},
    BuildError, FnMaker, PoolConfig, PoolError, ReleaseError, Status, SyncMaker,
};

use super::{Object, PoolBuilder};

/// Generic object pool for blocking code.
///
/// This struct can be cloned and transferred across thread boundaries and uses
/// reference counting for its internal state.
pub struct Pool<M: SyncMaker> {
    pub(crate) inner: Arc<PoolInner<M>>,
}

// Implemented manually to avoid unnecessary trait bound on `M::Type`.
impl<M> fmt::Debug for Pool<M>
where
    M: fmt::Debug + SyncMaker,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("maker", &self.inner.maker)
            .field("config", &self.inner.config)
            .field("status", &self.status())
            .finish()
    }
}

impl<M: SyncMaker> Clone for Pool<M> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<F, T, E> Pool<FnMaker<F>>
where
    F: Fn() -> Result<T, E> + Send + Sync,
{
    /// Instantiates a builder for a [`Pool`] whose objects are created by
    /// calling `f`.
    pub fn from_fn(f: F) -> PoolBuilder<FnMaker<F>> {
        PoolBuilder::new(FnMaker::new(f))
    }
}

impl<M: SyncMaker> PoolBuilder<M> {
    /// Sets the [`PoolConfig::timeout`].
    ///
    /// Only blocking pools wait with a timeout, so async builders do not
    /// offer this setter.
    pub fn timeout(mut self, value: Option<Duration>) -> Self {
        self.config.timeout = value;
        self
    }

    /// Builds the [`Pool`].
    ///
    /// # Errors
    ///
    /// See [`BuildError`] for details.
    pub fn build(self) -> Result<Pool<M>, BuildError> {
        Pool::from_builder(self)
    }
}

impl<M: SyncMaker> Pool<M> {
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

    pub(crate) fn from_builder(builder: PoolBuilder<M>) -> Result<Self, BuildError> {
        let (maker, config) = builder.into_parts()?;
        Ok(Self {
            inner: Arc::new(PoolInner {
                slots: Mutex::new(Slots::new(config.max_size)),
                available: Condvar::new(),
                config,
                maker,
            }),
        })
    }

    /// Retrieves an object from this [`Pool`], waiting at most for the
    /// configured [`PoolConfig::timeout`].
    ///
    /// # Errors
    ///
    /// See [`PoolError`] for details.
    pub fn get(&self) -> Result<M::Type, PoolError<M::Error>> {
        self.timeout_get(self.inner.config.timeout)
    }

    /// Retrieves an object from this [`Pool`] using a different `timeout`
    /// than the configured one.
    ///
    /// Idle objects are handed out first, oldest release first. Otherwise a
    /// new object is created if the pool may still grow. Otherwise the call
    /// waits for a [`Pool::release()`]: not at all for
    /// `Some(Duration::ZERO)`, up to the given duration for any other
    /// `Some`, and indefinitely for [`None`].
    ///
    /// An unbounded pool never waits.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Empty`] if the wait expired, or
    /// [`PoolError::Backend`] if the maker failed.
    pub fn timeout_get(&self, timeout: Option<Duration>) -> Result<M::Type, PoolError<M::Error>> {
        let deadline = timeout.and_then(|t| Instant::now().checked_add(t));

        let mut slots = self.inner.slots.lock();
        loop {
            match slots.checkout() {
                Checkout::Idle(obj) => return Ok(obj),
                Checkout::Create => {
                    drop(slots);
                    return self.create();
                }
                Checkout::Exhausted => {}
            }
            // Another waiter may take the released object between the
            // notification and this thread reacquiring the lock, so every
            // wake goes back through `checkout()`.
            match deadline {
                None => {
                    cfg_tracing! {
                        tracing::trace!("pool exhausted, waiting for a release");
                    }
                    self.inner.available.wait(&mut slots);
                }
                Some(deadline) => {
                    if Instant::now() >= deadline {
                        cfg_tracing! {
                            tracing::debug!(?timeout, "timed out waiting for a pooled object");
                        }
                        return Err(PoolError::Empty);
                    }
                    let _ = self.inner.available.wait_until(&mut slots, deadline);
                }
            }
        }
    }

    /// Like [`Pool::timeout_get()`] with the wait given in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidTimeout`] without touching the pool if
    /// `secs` is negative or NaN. See [`Pool::timeout_get()`] otherwise.
    pub fn timeout_get_secs(&self, secs: f64) -> Result<M::Type, PoolError<M::Error>> {
        let timeout = timeout_from_secs::<M::Error>(secs)?;
        self.timeout_get(timeout)
    }

    /// Retrieves an [`Object`] guard that releases the object back into this
    /// [`Pool`] when dropped, waiting at most for the configured
    /// [`PoolConfig::timeout`].
    ///
    /// # Errors
    ///
    /// See [`PoolError`] for details.
    pub fn acquire(&self) -> Result<Object<M>, PoolError<M::Error>> {
        self.timeout_acquire(self.inner.config.timeout)
    }

    /// Like [`Pool::acquire()`] with a different `timeout` than the configured
    /// one.
    ///
    /// # Errors
    ///
    /// See [`PoolError`] for details.
    pub fn timeout_acquire(
        &self,
        timeout: Option<Duration>,
    ) -> Result<Object<M>, PoolError<M::Error>> {
        let obj = self.timeout_get(timeout)?;
        Ok(Object::new(obj, &self.inner))
    }

    fn create(&self) -> Result<M::Type, PoolError<M::Error>> {
        cfg_tracing! {
            tracing::trace!("creating a new pooled object");
        }
        let reservation = Reservation::new(&self.inner.slots, &self.inner.available);
        let obj = self.inner.maker.create()?;
        reservation.commit();
        Ok(obj)
    }

    /// Returns `obj` to this [`Pool`] and wakes one waiting caller.
    ///
    /// The pool does not check that `obj` came from it.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError`] holding `obj` if the pool already holds
    /// [`PoolConfig::max_size`] idle objects. The pool is left unchanged.
    pub fn release(&self, obj: M::Type) -> Result<(), ReleaseError<M::Type>> {
        self.inner.release(obj)
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

    /// Returns [`SyncMaker`] of this [`Pool`].
    #[must_use]
    pub fn maker(&self) -> &M {
        &self.inner.maker
    }
}

pub(crate) struct PoolInner<M: SyncMaker> {
    slots: Mutex<Slots<M::Type>>,
    available: Condvar,
    config: PoolConfig,
    maker: M,
}

impl<M: SyncMaker> PoolInner<M> {
    pub(crate) fn release(&self, obj: M::Type) -> Result<(), ReleaseError<M::Type>> {
        self.slots.lock().checkin(obj).map_err(|obj| {
            cfg_tracing! {
                tracing::debug!("pool is full, rejecting released object");
            }
            ReleaseError::new(obj)
        })?;
        let _ = self.available.notify_one();
        Ok(())
    }
}
