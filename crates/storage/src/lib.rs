//! `orgdir-storage`: durable key/value persistence and simulated latency.
//!
//! Stores persist whole serialized snapshots under a handful of string keys
//! (`employees`, `user`, `theme`), the way a browser's local storage is used.
//! Backends here only move strings; serialization belongs to each store.

pub mod error;
pub mod file;
pub mod kv;
pub mod latency;

pub use error::{StorageError, StorageResult};
pub use file::FileKeyValueStore;
pub use kv::{InMemoryKeyValueStore, KeyValueStore, keys};
pub use latency::{Latency, NoLatency, RecordingLatency, TokioLatency};
