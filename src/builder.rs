use std::{fmt, marker::PhantomData};

use crate::{BuildError, PoolConfig};

/// Builder for pools.
///
/// Instances of this are created by calling [`sync::Pool::builder()`] or
/// [`aio::Pool::builder()`]. The `P` parameter is the pool type that
/// `build()` produces.
///
/// [`sync::Pool::builder()`]: crate::sync::Pool::builder
/// [`aio::Pool::builder()`]: crate::aio::Pool::builder
#[must_use = "builder does nothing itself, use `.build()` to build it"]
pub struct PoolBuilder<M, P> {
    pub(crate) maker: M,
    pub(crate) config: PoolConfig,
    _pool: PhantomData<fn() -> P>,
}

// Implemented manually to avoid unnecessary trait bound on `P` type parameter.
impl<M: fmt::Debug, P> fmt::Debug for PoolBuilder<M, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolBuilder")
            .field("maker", &self.maker)
            .field("config", &self.config)
            .finish()
    }
}

impl<M, P> PoolBuilder<M, P> {
    pub(crate) fn new(maker: M) -> Self {
        Self {
            maker,
            config: PoolConfig::default(),
            _pool: PhantomData,
        }
    }

    /// Checks the configuration and splits the builder into its parts.
    pub(crate) fn into_parts(self) -> Result<(M, PoolConfig), BuildError> {
        self.config.validate()?;
        cfg_tracing! {
            tracing::debug!(
                max_size = ?self.config.max_size,
                timeout = ?self.config.timeout,
                "building object pool"
            );
        }
        Ok((self.maker, self.config))
    }

    /// Sets a [`PoolConfig`] to build the pool with.
    pub fn config(mut self, value: PoolConfig) -> Self {
        self.config = value;
        self
    }

    /// Sets the [`PoolConfig::max_size`], making the pool bounded.
    ///
    /// A `value` of `0` makes `build()` fail with
    /// [`BuildError::InvalidCapacity`].
    pub fn max_size(mut self, value: usize) -> Self {
        self.config.max_size = Some(value);
        self
    }

    /// Removes any [`PoolConfig::max_size`], making the pool unbounded.
    pub fn unbounded(mut self) -> Self {
        self.config.max_size = None;
        self
    }
}
