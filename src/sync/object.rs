use std::{
    fmt,
    ops::{Deref, DerefMut},
    sync::{Arc, Weak},
};

use crate::SyncMaker;

use super::{pool::PoolInner, Pool};

/// Wrapper around the actual pooled object which implements [`Deref`],
/// [`DerefMut`] and [`Drop`] traits.
///
/// Use this object just as if it was of type `T` and upon leaving a scope,
/// including by unwinding, the [`Drop::drop()`] will take care of returning
/// it to the pool.
///
/// [`Drop::drop()`] cannot report errors. If the pool already holds
/// [`PoolConfig::max_size`] idle objects, which only happens when foreign
/// objects were released into it, the object is dropped instead of being
/// returned. With the `tracing` feature a warning is emitted. Use
/// [`Object::take()`] and [`Pool::release()`] to handle that case yourself.
///
/// [`PoolConfig::max_size`]: crate::PoolConfig::max_size
#[must_use]
pub struct Object<M: SyncMaker> {
    /// The actual object
    inner: Option<M::Type>,

    /// Pool to return the pooled object to.
    pool: Weak<PoolInner<M>>,
}

impl<M> fmt::Debug for Object<M>
where
    M: SyncMaker,
    M::Type: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<M: SyncMaker> Object<M> {
    pub(crate) fn new(inner: M::Type, pool: &Arc<PoolInner<M>>) -> Self {
        Self {
            inner: Some(inner),
            pool: Arc::downgrade(pool),
        }
    }

    /// Takes the object out of this guard so it is no longer returned to the
    /// [`Pool`] on drop.
    ///
    /// The pool still counts the object as created. Hand it back with
    /// [`Pool::release()`] or the pool permanently loses one slot.
    #[must_use]
    pub fn take(mut this: Self) -> M::Type {
        this.inner.take().unwrap()
    }

    /// Returns the [`Pool`] this [`Object`] belongs to.
    ///
    /// Since [`Object`]s only hold a [`Weak`] reference to the [`Pool`] they
    /// come from, this can fail and return [`None`] instead.
    pub fn pool(this: &Self) -> Option<Pool<M>> {
        this.pool.upgrade().map(|inner| Pool { inner })
    }
}

impl<M: SyncMaker> Drop for Object<M> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.take() {
            if let Some(pool) = self.pool.upgrade() {
                if pool.release(inner).is_err() {
                    cfg_tracing! {
                        tracing::warn!("pool is full, dropping object instead of returning it");
                    }
                }
            }
        }
    }
}

impl<M: SyncMaker> Deref for Object<M> {
    type Target = M::Type;
    fn deref(&self) -> &M::Type {
        self.inner.as_ref().unwrap()
    }
}

impl<M: SyncMaker> DerefMut for Object<M> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.inner.as_mut().unwrap()
    }
}

impl<M: SyncMaker> AsRef<M::Type> for Object<M> {
    fn as_ref(&self) -> &M::Type {
        self
    }
}

impl<M: SyncMaker> AsMut<M::Type> for Object<M> {
    fn as_mut(&mut self) -> &mut M::Type {
        self
    }
}
