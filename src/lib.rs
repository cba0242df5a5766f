#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(all(test, not(feature = "std")))]
extern crate std;

/// Error types returned by map construction and mutation.
pub mod error;

/// A HashMap implementation using circular hopscotch hashing.
///
/// This module provides a `HashMap` that wraps the slot table and keeps its
/// load factor within configurable bounds.
pub mod hash_map;

/// Mapping keys to home slots.
///
/// The map hashes through the [`HashProvider`] trait. [`PolynomialHash`]
/// is the default; [`FnHash`] wraps a closure and [`BuildHasherProvider`]
/// wraps any [`BuildHasher`](core::hash::BuildHasher).
pub mod hash_provider;

mod hash_table;

/// Construction options and load factor bounds.
pub mod options;

pub use error::CapacityExhausted;
pub use error::ConfigurationError;
pub use error::Error;
pub use error::Result;
pub use hash_map::HashMap;
#[cfg(feature = "foldhash")]
pub use hash_provider::FoldHash;
pub use hash_provider::BuildHasherProvider;
pub use hash_provider::FnHash;
pub use hash_provider::HashProvider;
pub use hash_provider::PolynomialHash;
pub use hash_provider::RawBytes;
pub use hash_table::HOP_RANGE;
#[cfg(feature = "stats")]
pub use hash_table::DebugStats;
#[cfg(feature = "stats")]
pub use hash_table::ProbeHistogram;
pub use options::LoadFactors;
pub use options::Options;
