//! chain-table: a fixed-bucket, string-keyed hash table that resolves
//! collisions by separate chaining.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small table whose bucket placement is deterministic and
//!   portable, with explicit (caller-driven) growth.
//! - Layers:
//!   - `hash`: djb2 over raw bytes with 64-bit wraparound, reduced modulo
//!     the bucket count.
//!   - `HashEngine`: bucket array of chain heads; entries live in a
//!     `SlotMap` arena and link to their successor by arena key.
//!
//! Constraints
//! - Single-threaded; `&mut self` on every write is the only exclusion.
//! - Keys and values are opaque byte strings, copied in on insert.
//! - Within a chain keys are unique; every entry in bucket `i` hashes to
//!   `i` under the current capacity.
//! - New keys append at the chain tail; overwrites keep their position.
//!
//! Ownership
//! - The arena owns every entry; a bucket head or `next` link is the only
//!   path to an entry, so each entry belongs to exactly one chain.
//! - `resize` consumes the table and returns the grown one. Entries are
//!   relinked into the new bucket array without being copied, and the old
//!   array is released before `resize` returns.
//! - Removal is a single pass with a trailing predecessor key; no `unsafe`
//!   is involved anywhere.
//!
//! Growth
//! - By default nothing grows automatically. `TableConfig` can set a
//!   maximum load factor, in which case an insert of a new key that
//!   exceeds it doubles the table in place (logged at `debug`).
//!
//! Notes and non-goals
//! - No whole-table iteration; `HashEngine::chain` exposes a single bucket
//!   for diagnostics.
//! - No shrinking, persistence, or thread safety.
//! - Lookups that miss return `None` silently.

pub mod config;
pub mod error;
pub mod hash;
mod hash_engine;
mod hash_engine_proptest;

// Public surface
pub use config::TableConfig;
pub use error::TableError;
pub use hash::{bucket_index, djb2};
pub use hash_engine::{Chain, HashEngine};
