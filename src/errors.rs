use std::fmt;

/// Possible errors returned when retrieving an object from a pool.
#[derive(Debug)]
pub enum PoolError<E> {
    /// No object became available in time.
    ///
    /// Only the blocking pool returns this. The async pool waits until an
    /// object is released or the caller drops the future.
    Empty,

    /// A negative or NaN wait duration was supplied. The pool was not
    /// touched.
    InvalidTimeout,

    /// The maker failed to create a new object.
    Backend(E),
}

impl<E> From<E> for PoolError<E> {
    fn from(e: E) -> Self {
        Self::Backend(e)
    }
}

impl<E: fmt::Display> fmt::Display for PoolError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Pool is empty and no object became available"),
            Self::InvalidTimeout => write!(f, "Timeout must be a non-negative duration"),
            Self::Backend(e) => write!(f, "Error occurred while creating a new object: {}", e),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for PoolError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Empty | Self::InvalidTimeout => None,
            Self::Backend(e) => Some(e),
        }
    }
}

/// Error returned when releasing an object into a pool whose free-list is
/// already at capacity.
///
/// The rejected object is handed back and can be recovered with
/// [`ReleaseError::into_inner()`].
pub struct ReleaseError<T> {
    obj: T,
}

impl<T> ReleaseError<T> {
    pub(crate) fn new(obj: T) -> Self {
        Self { obj }
    }

    /// Returns the object that could not be released.
    pub fn into_inner(self) -> T {
        self.obj
    }
}

// Implemented manually so `T` does not need to be `Debug`.
impl<T> fmt::Debug for ReleaseError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad("ReleaseError { .. }")
    }
}

impl<T> fmt::Display for ReleaseError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pool is full, the object could not be released")
    }
}

impl<T> std::error::Error for ReleaseError<T> {}

/// Possible errors returned when building a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// The requested maximum size is below 1.
    InvalidCapacity(usize),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity(size) => write!(
                f,
                "Invalid pool size {}: a bounded pool must hold at least one object",
                size
            ),
        }
    }
}

impl std::error::Error for BuildError {}
