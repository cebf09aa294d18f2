//! chain-map: a string-keyed hash map using separate chaining with doubly
//! linked bucket chains and load-factor driven resizing.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the three moving parts (index function, chain maintenance,
//!   resize policy) in separate layers so each can be checked on its own.
//! - Layers:
//!   - `index::bucket_index`: character-code sum modulo capacity.
//!   - `ChainTable<V>`: structural layer. A bucket array of chain heads plus
//!     a generational arena of entries linked by `prev`/`next` arena keys.
//!     Knows nothing about load factors.
//!   - `ChainHashMap<V>`: public API. Delegates to the table and consults the
//!     `ResizePolicy` after every put and every successful remove.
//!
//! Constraints
//! - Single-threaded; every mutation takes `&mut self`.
//! - Keys are `String`, looked up by `&str`; values are any `V`.
//! - Per-chain key uniqueness; `put` on an existing key overwrites in place.
//! - Capacity never drops below the capacity given at construction.
//!
//! Resizing
//! - Grow: after a put, `len / capacity > 0.75` doubles the bucket array.
//! - Shrink: after a remove that found its key,
//!   `capacity > initial && len / capacity < 0.25` halves it.
//! - Both comparisons are strict. Thresholds are configurable through
//!   `MapConfig`; the doubling and halving factors are not.
//! - A rehash builds a complete replacement table, moving entries chain by
//!   chain, then swaps it in with a single assignment.
//! - The thresholds are asymmetric around the resize factor, so alternating
//!   put/remove at a boundary can rehash repeatedly. There is no hysteresis.
//!
//! Hashing
//! - The index ignores character order; anagrams always share a bucket.
//!   This is not a keyed or collision-resistant hash.
//!
//! Logging
//! - Rehashes are reported at `tracing` debug level with the old and new
//!   capacity. No subscriber is installed by this crate.

mod chain_hash_map;
mod chain_hash_map_proptest;
mod chain_table;
pub mod config;
mod error;
mod index;

// Public surface
pub use chain_hash_map::ChainHashMap;
pub use chain_table::Iter;
pub use config::{MapConfig, ResizePolicy};
pub use error::ChainMapError;
