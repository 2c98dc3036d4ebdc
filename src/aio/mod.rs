//! Pool for use from async code.
//!
//! Only [`tokio::sync`] primitives are used, so the pool works on any
//! executor. An exhausted bounded pool suspends [`Pool::get()`] until an
//! object is released; there is no pool-level timeout. Wrap the call in the
//! runtime's own timeout (e.g. `tokio::time::timeout`) or drop the future to
//! give up.

mod pool;

pub use self::pool::Pool;

/// Type alias for using [`PoolBuilder`] with an async [`Pool`].
///
/// [`PoolBuilder`]: crate::PoolBuilder
pub type PoolBuilder<M> = crate::PoolBuilder<M, Pool<M>>;
