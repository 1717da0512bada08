//! Player progress persistence
//!
//! A single progress record lives in two places:
//! - The remote player record, which follows the player across devices
//! - LocalStorage, as JSON text, for offline or SDK-less sessions
//!
//! Reads prefer the remote copy and fall back to local. Saves write both.
//! The two copies are never merged. No failure from either backend reaches
//! the caller; outcomes come back as `Option` / [`SaveResult`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::ProgressConfig;
use crate::storage::{LocalStore, Player, RemoteSession, StorageError};

/// Opaque saved game state, passed through unchanged
pub type ProgressBlob = Value;

/// Remote writes must be durable before they resolve
const REMOTE_FLUSH: bool = true;

/// Overall outcome of a save across both stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    /// Both stores accepted the write
    Full,
    /// Exactly one store accepted the write
    Partial,
    /// Neither store accepted the write
    Failed,
}

impl SaveStatus {
    pub fn from_flags(cloud: bool, local: bool) -> Self {
        match (cloud, local) {
            (true, true) => SaveStatus::Full,
            (false, false) => SaveStatus::Failed,
            _ => SaveStatus::Partial,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SaveStatus::Full => "full",
            SaveStatus::Partial => "partial",
            SaveStatus::Failed => "failed",
        }
    }
}

/// Per-store outcome of [`ProgressStore::save`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaveResult {
    /// Remote write succeeded (false when no player exists)
    pub cloud: bool,
    /// Local write succeeded
    pub local: bool,
}

impl SaveResult {
    pub fn status(&self) -> SaveStatus {
        SaveStatus::from_flags(self.cloud, self.local)
    }
}

/// Player that can never exist, for stores built without a remote session
#[derive(Debug, Clone, Copy)]
pub enum NoPlayer {}

impl Player for NoPlayer {
    async fn get_data(&self) -> Result<Map<String, Value>, StorageError> {
        match *self {}
    }

    async fn set_data(&self, _data: Map<String, Value>, _flush: bool) -> Result<(), StorageError> {
        match *self {}
    }
}

/// Cloud-then-local progress store
///
/// Only obtainable through [`ProgressStore::initialize`] (or
/// [`ProgressStore::local_only`]), so every load/save/clear runs after the
/// player handle has been settled. The handle is never re-acquired.
pub struct ProgressStore<L, P> {
    local: L,
    player: Option<P>,
    config: ProgressConfig,
}

impl<L: LocalStore> ProgressStore<L, NoPlayer> {
    /// Store with no remote session at all; cloud writes are never attempted
    pub fn local_only(local: L, config: ProgressConfig) -> Self {
        log::warn!("No platform session, progress will only use local storage");
        Self {
            local,
            player: None,
            config,
        }
    }
}

impl<L: LocalStore, P: Player> ProgressStore<L, P> {
    /// Resolve the player from `session` (if any) and build the store
    ///
    /// Always completes. A failed player lookup degrades to local-only mode.
    pub async fn initialize<S>(local: L, session: Option<&S>, config: ProgressConfig) -> Self
    where
        S: RemoteSession<Player = P>,
    {
        let player = match session {
            Some(session) => match session.get_player().await {
                Ok(player) => {
                    log::info!("Player initialized, cloud saves enabled");
                    Some(player)
                }
                Err(e) => {
                    log::error!("Failed to get player, falling back to local storage: {}", e);
                    None
                }
            },
            None => {
                log::warn!("No platform session, progress will only use local storage");
                None
            }
        };

        Self {
            local,
            player,
            config,
        }
    }

    /// Whether a remote player was resolved
    pub fn has_cloud(&self) -> bool {
        self.player.is_some()
    }

    /// Load progress: remote record first, then local storage
    ///
    /// `None` means no prior progress (first run), not an error.
    pub async fn load(&self) -> Option<ProgressBlob> {
        let key = self.config.storage_key.as_str();

        if let Some(player) = &self.player {
            match player.get_data().await {
                Ok(mut data) => {
                    if data.is_empty() {
                        log::info!("Cloud record is empty");
                    } else {
                        match data.remove(key) {
                            Some(blob) if !blob.is_null() => {
                                log::info!("Progress loaded from cloud");
                                return Some(blob);
                            }
                            _ => log::info!("Cloud record has no saved progress"),
                        }
                    }
                }
                Err(e) => log::error!("Failed to load progress from cloud: {}", e),
            }
        }

        if let Some(blob) = self.load_local(key) {
            log::info!("Progress loaded from local storage");
            return Some(blob);
        }

        log::info!("No saved progress found, treating as first run");
        None
    }

    fn load_local(&self, key: &str) -> Option<ProgressBlob> {
        let raw = match self.local.get(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => {
                log::info!("Local storage has no saved progress");
                return None;
            }
            Err(e) => {
                log::error!("Failed to read local storage: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Null) => None,
            Ok(blob) => Some(blob),
            Err(e) => {
                log::error!("Local progress is not valid JSON: {}", e);
                None
            }
        }
    }

    /// Load progress and deserialize it into `T`
    ///
    /// A blob that does not match `T` is reported as `None`.
    pub async fn load_as<T: DeserializeOwned>(&self) -> Option<T> {
        let blob = self.load().await?;
        match serde_json::from_value(blob) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Saved progress does not match expected shape: {}", e);
                None
            }
        }
    }

    /// Write `blob` to both stores
    ///
    /// Each write is attempted regardless of the other's outcome.
    /// A `null` blob is stored as "no progress": the save can report
    /// [`SaveStatus::Full`] and a following `load` still returns `None`.
    pub async fn save(&self, blob: &ProgressBlob) -> SaveResult {
        let key = self.config.storage_key.as_str();

        let cloud = match &self.player {
            Some(player) => {
                let mut record = Map::new();
                record.insert(key.to_string(), blob.clone());
                match player.set_data(record, REMOTE_FLUSH).await {
                    Ok(()) => {
                        log::info!("Progress saved to cloud");
                        true
                    }
                    Err(e) => {
                        log::error!("Failed to save progress to cloud: {}", e);
                        false
                    }
                }
            }
            None => false,
        };

        let local = match serde_json::to_string(blob)
            .map_err(StorageError::from)
            .and_then(|json| self.local.set(key, &json))
        {
            Ok(()) => {
                log::info!("Progress saved to local storage");
                true
            }
            Err(e) => {
                log::error!("Failed to save progress to local storage: {}", e);
                false
            }
        };

        let result = SaveResult { cloud, local };
        match result.status() {
            SaveStatus::Full => log::info!("Progress saved to both stores"),
            SaveStatus::Partial => log::warn!("Progress partially saved: {:?}", result),
            SaveStatus::Failed => log::error!("Progress could not be saved to any store"),
        }
        result
    }

    /// Best-effort removal of saved progress from both stores
    pub async fn clear(&self) {
        let key = self.config.storage_key.as_str();

        if let Some(player) = &self.player {
            let mut record = Map::new();
            record.insert(key.to_string(), Value::Null);
            match player.set_data(record, REMOTE_FLUSH).await {
                Ok(()) => log::info!("Cloud progress cleared"),
                Err(e) => log::error!("Failed to clear cloud progress: {}", e),
            }
        }

        match self.local.remove(key) {
            Ok(()) => log::info!("Local progress cleared"),
            Err(e) => log::error!("Failed to clear local progress: {}", e),
        }
    }
}
