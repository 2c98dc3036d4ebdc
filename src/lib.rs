#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links
)]
#![warn(clippy::pedantic)]
#![warn(
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
#![allow(
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::match_same_arms
)]

#[macro_use]
mod macros;

mod builder;
mod config;
mod errors;
mod maker;
mod slots;

#[cfg(feature = "aio")]
#[cfg_attr(docsrs, doc(cfg(feature = "aio")))]
pub mod aio;
#[cfg(feature = "sync")]
#[cfg_attr(docsrs, doc(cfg(feature = "sync")))]
pub mod sync;

pub use self::{
    builder::PoolBuilder,
    config::{timeout_from_secs, PoolConfig},
    errors::{BuildError, PoolError, ReleaseError},
    maker::{FnMaker, SyncMaker},
};

#[cfg(feature = "aio")]
#[cfg_attr(docsrs, doc(cfg(feature = "aio")))]
pub use self::maker::{AsyncFnMaker, Maker};

/// The current pool status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Status {
    /// The maximum number of objects the pool will ever create, or [`None`]
    /// if it is unbounded.
    pub max_size: Option<usize>,

    /// The current items idle in the pool.
    pub size: usize,

    /// The number of objects successfully created over the pool's lifetime.
    pub created: usize,
}
