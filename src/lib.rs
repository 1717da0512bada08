//! Game Progress - cloud-then-local save persistence for browser games
//!
//! Core modules:
//! - `progress`: Load/save/clear protocol across the two stores
//! - `storage`: Collaborator traits, errors, in-memory stores
//! - `config`: Storage key and flush settings
//! - `platform`: Browser bindings (LocalStorage, platform SDK, JS facade)

pub mod config;
pub mod platform;
pub mod progress;
pub mod storage;

pub use config::ProgressConfig;
pub use progress::{ProgressBlob, ProgressStore, SaveResult, SaveStatus};
pub use storage::{LocalStore, Player, RemoteSession, StorageError};

/// Key of the progress record in both the remote and the local store
pub const STORAGE_KEY: &str = "gameProgress";
