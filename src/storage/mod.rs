//! Storage collaborators
//!
//! The progress store talks to two independently unreliable backends:
//! - A remote per-player record reached through a platform session
//! - Browser-local key/value storage
//!
//! Both sit behind traits so the browser bindings in `platform` and the
//! in-memory stores in [`memory`] are interchangeable.

pub mod memory;

pub use memory::{MemoryLocalStore, MemoryPlayer, MemorySession};

use serde_json::{Map, Value};
use thiserror::Error;

/// Failure of a single storage call
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend is not present (no session, storage disabled)
    #[error("storage backend unavailable")]
    Unavailable,
    /// Cloud API call failed or was rejected
    #[error("remote storage error: {0}")]
    Remote(String),
    /// LocalStorage call threw (quota, security, disabled)
    #[error("local storage error: {0}")]
    Local(String),
    /// Value could not be converted to/from JSON
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Authenticated platform session able to hand out the current player
#[allow(async_fn_in_trait)]
pub trait RemoteSession {
    type Player: Player;

    async fn get_player(&self) -> Result<Self::Player, StorageError>;
}

/// Per-player remote key/value record
#[allow(async_fn_in_trait)]
pub trait Player {
    /// Fetch the whole record
    async fn get_data(&self) -> Result<Map<String, Value>, StorageError>;

    /// Merge `data` into the record; `flush` requests a durable write before resolving
    async fn set_data(&self, data: Map<String, Value>, flush: bool) -> Result<(), StorageError>;
}

/// Synchronous string key/value storage (LocalStorage semantics)
pub trait LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: LocalStore + ?Sized> LocalStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
