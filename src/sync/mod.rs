//! Pool for use from plain threads.
//!
//! Exhausted bounded pools park the calling thread on a condition variable
//! for at most the configured timeout.

mod object;
mod pool;

pub use self::{object::Object, pool::Pool};

/// Type alias for using [`PoolBuilder`] with a blocking [`Pool`].
///
/// [`PoolBuilder`]: crate::PoolBuilder
pub type PoolBuilder<M> = crate::PoolBuilder<M, Pool<M>>;
