#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(all(test, not(feature = "std")))]
extern crate std;

/// The user-facing map.
///
/// This module provides `PackedMap`, which pairs the packed-array
/// `PackedTable` engine with a hashing strategy and exposes the standard
/// key-value interface, plus the read-only `ImmutableMap` boundary.
pub mod map;

/// Hashing strategies.
///
/// This module defines the `HashingStrategy` capability consulted on every
/// index and equality decision, and the `NaturalStrategy` default that uses
/// a key's own `Hash`/`Eq`.
pub mod strategy;

pub mod table;

pub mod view;

#[cfg(feature = "serde")]
mod serde_impls;

pub use map::ImmutableMap;
pub use map::PackedMap;
pub use strategy::DefaultHashBuilder;
pub use strategy::HashingStrategy;
pub use strategy::NaturalStrategy;
pub use table::PackedTable;
pub use view::DetachedEntry;
