use std::time::Duration;

use crate::{BuildError, PoolError};

/// Pool configuration.
///
/// The same configuration drives both the blocking [`sync::Pool`] and the
/// async [`aio::Pool`]; the latter ignores [`PoolConfig::timeout`].
///
/// [`sync::Pool`]: crate::sync::Pool
/// [`aio::Pool`]: crate::aio::Pool
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolConfig {
    /// Maximum number of objects the pool will ever create.
    ///
    /// [`None`] makes the pool unbounded: it creates a new object whenever
    /// the free-list is empty and never waits.
    pub max_size: Option<usize>,

    /// How long the blocking pool waits for a released object once it is
    /// exhausted.
    ///
    /// `Some(Duration::ZERO)` fails immediately, [`None`] waits
    /// indefinitely.
    pub timeout: Option<Duration>,
}

impl PoolConfig {
    /// Creates a new bounded [`PoolConfig`] with the provided `max_size` that
    /// fails fast when the pool is exhausted.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size: Some(max_size),
            timeout: Some(Duration::ZERO),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), BuildError> {
        match self.max_size {
            Some(0) => Err(BuildError::InvalidCapacity(0)),
            _ => Ok(()),
        }
    }
}

impl Default for PoolConfig {
    /// Creates an unbounded [`PoolConfig`] that fails fast when a bounded
    /// pool is exhausted.
    fn default() -> Self {
        Self {
            max_size: None,
            timeout: Some(Duration::ZERO),
        }
    }
}

/// Converts a wait given in (possibly fractional) seconds into the timeout
/// accepted by [`sync::Pool::timeout_get()`].
///
/// Positive infinity means "wait indefinitely" and maps to [`None`].
///
/// # Errors
///
/// Returns [`PoolError::InvalidTimeout`] if `secs` is negative or NaN.
///
/// [`sync::Pool::timeout_get()`]: crate::sync::Pool::timeout_get
pub fn timeout_from_secs<E>(secs: f64) -> Result<Option<Duration>, PoolError<E>> {
    if secs.is_nan() || secs < 0.0 {
        return Err(PoolError::InvalidTimeout);
    }
    if secs.is_infinite() {
        return Ok(None);
    }
    // Too large to represent is as good as forever.
    Ok(Duration::try_from_secs_f64(secs).ok())
}
