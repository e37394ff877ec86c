//! chain-hashmap: a single-threaded hash map with separate chaining,
//! explicit capacity, and pluggable hash functions.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a table whose capacity never changes behind the caller's back,
//!   with each piece small enough to reason about independently.
//! - Layers:
//!   - BucketChain: one bucket's singly linked collision chain. Nodes
//!     live in a table-owned slotmap arena; the chain holds only its
//!     head link and threads through `Option<DefaultKey>` forward links.
//!   - ChainHashMap<K, V, S>: the table. Owns the bucket array, the node
//!     arena, and the injected `BuildHasher`; routes every key through
//!     `hash % capacity` and delegates to the bucket's chain.
//!   - hashers: deterministic byte-sum and position-weighted-sum hashers
//!     for reproducible placement of text keys.
//!   - word_count: a client that tallies case-insensitive word
//!     frequencies from text and ranks the top N by count.
//!
//! Constraints
//! - Single-threaded: no locking; wrap externally if shared.
//! - No automatic growth: resizing happens only through
//!   `resize_table`, a stop-the-world full rehash.
//! - Zero capacity is legal: mutations no-op, lookups report absence,
//!   and `table_load` fails explicitly instead of dividing by zero.
//! - No duplicate keys within a chain; `put` updates in place.
//!
//! Why this split?
//! - Localize invariants: the chain never sees hashes or capacity; the
//!   table never walks links directly.
//! - The arena keeps node identity stable across rehashes, so resizing
//!   re-links entries instead of moving them.
//!
//! Notes and non-goals
//! - No persistence; no open addressing; no load-factor triggers.
//! - Enumeration order is unspecified and not stable across mutations.
//! - Public surface is `ChainHashMap`, `TableError`, the hashers, and
//!   the word-count client; `BucketChain` is an implementation detail.

mod bucket_chain;
pub mod chain_hash_map;
mod chain_hash_map_proptest;
pub mod hashers;
pub mod word_count;

// Public surface
pub use chain_hash_map::{ChainHashMap, TableError};
pub use hashers::{ByteSumBuildHasher, WeightedSumBuildHasher};
pub use word_count::{top_words, WordCountError, WordCounter};
