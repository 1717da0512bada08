//! In-memory storage backends
//!
//! Used by the native build and by tests. Handles are cheap clones sharing
//! one state, so a test can keep a handle while the store owns another.
//! Each backend can be told to fail and counts the calls it receives.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::{Map, Value};

use super::{LocalStore, Player, RemoteSession, StorageError};

#[derive(Debug, Default)]
struct LocalState {
    entries: HashMap<String, String>,
    fail_get: bool,
    fail_set: bool,
    fail_remove: bool,
    get_calls: usize,
    set_calls: usize,
    remove_calls: usize,
}

/// LocalStorage stand-in
#[derive(Debug, Clone, Default)]
pub struct MemoryLocalStore {
    state: Rc<RefCell<LocalState>>,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a single raw entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.insert(key, value);
        store
    }

    /// Write an entry directly, bypassing failure flags and counters
    pub fn insert(&self, key: &str, value: &str) {
        self.state
            .borrow_mut()
            .entries
            .insert(key.to_string(), value.to_string());
    }

    /// Read an entry directly, bypassing failure flags and counters
    pub fn entry(&self, key: &str) -> Option<String> {
        self.state.borrow().entries.get(key).cloned()
    }

    pub fn set_fail_get(&self, fail: bool) {
        self.state.borrow_mut().fail_get = fail;
    }

    /// Simulate quota exceeded / storage disabled on writes
    pub fn set_fail_set(&self, fail: bool) {
        self.state.borrow_mut().fail_set = fail;
    }

    pub fn set_fail_remove(&self, fail: bool) {
        self.state.borrow_mut().fail_remove = fail;
    }

    pub fn get_calls(&self) -> usize {
        self.state.borrow().get_calls
    }

    pub fn set_calls(&self) -> usize {
        self.state.borrow().set_calls
    }

    pub fn remove_calls(&self) -> usize {
        self.state.borrow().remove_calls
    }
}

impl LocalStore for MemoryLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut state = self.state.borrow_mut();
        state.get_calls += 1;
        if state.fail_get {
            return Err(StorageError::Local("get failed".into()));
        }
        Ok(state.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut state = self.state.borrow_mut();
        state.set_calls += 1;
        if state.fail_set {
            return Err(StorageError::Local("quota exceeded".into()));
        }
        state.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut state = self.state.borrow_mut();
        state.remove_calls += 1;
        if state.fail_remove {
            return Err(StorageError::Local("remove failed".into()));
        }
        state.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct PlayerState {
    data: Map<String, Value>,
    fail_get: bool,
    fail_set: bool,
    get_calls: usize,
    set_calls: usize,
    last_flush: Option<bool>,
}

/// Remote player record stand-in
#[derive(Debug, Clone, Default)]
pub struct MemoryPlayer {
    state: Rc<RefCell<PlayerState>>,
}

impl MemoryPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Player whose record starts as `data`
    pub fn with_data(data: Map<String, Value>) -> Self {
        let player = Self::new();
        player.state.borrow_mut().data = data;
        player
    }

    /// Snapshot of the record
    pub fn data(&self) -> Map<String, Value> {
        self.state.borrow().data.clone()
    }

    pub fn set_fail_get(&self, fail: bool) {
        self.state.borrow_mut().fail_get = fail;
    }

    pub fn set_fail_set(&self, fail: bool) {
        self.state.borrow_mut().fail_set = fail;
    }

    pub fn get_calls(&self) -> usize {
        self.state.borrow().get_calls
    }

    pub fn set_calls(&self) -> usize {
        self.state.borrow().set_calls
    }

    /// Flush flag passed to the most recent `set_data`
    pub fn last_flush(&self) -> Option<bool> {
        self.state.borrow().last_flush
    }
}

impl Player for MemoryPlayer {
    async fn get_data(&self) -> Result<Map<String, Value>, StorageError> {
        let mut state = self.state.borrow_mut();
        state.get_calls += 1;
        if state.fail_get {
            return Err(StorageError::Remote("network error".into()));
        }
        Ok(state.data.clone())
    }

    async fn set_data(&self, data: Map<String, Value>, flush: bool) -> Result<(), StorageError> {
        let mut state = self.state.borrow_mut();
        state.set_calls += 1;
        state.last_flush = Some(flush);
        if state.fail_set {
            return Err(StorageError::Remote("network error".into()));
        }
        // setData merges top-level keys into the existing record
        state.data.extend(data);
        Ok(())
    }
}

/// Platform session stand-in handing out one shared [`MemoryPlayer`]
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    player: MemoryPlayer,
    fail: bool,
}

impl MemorySession {
    pub fn new(player: MemoryPlayer) -> Self {
        Self {
            player,
            fail: false,
        }
    }

    /// Session whose `get_player` always fails (e.g. auth rejected)
    pub fn failing() -> Self {
        Self {
            player: MemoryPlayer::new(),
            fail: true,
        }
    }

    pub fn player(&self) -> &MemoryPlayer {
        &self.player
    }
}

impl RemoteSession for MemorySession {
    type Player = MemoryPlayer;

    async fn get_player(&self) -> Result<MemoryPlayer, StorageError> {
        if self.fail {
            return Err(StorageError::Remote("player unavailable".into()));
        }
        Ok(self.player.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_local_store_basics() {
        let store = MemoryLocalStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.remove("k").unwrap();
        assert_eq!(store.entry("k"), None);
        assert_eq!(store.get_calls(), 2);
        assert_eq!(store.set_calls(), 1);
        assert_eq!(store.remove_calls(), 1);
    }

    #[test]
    fn test_local_store_failures_leave_entries_untouched() {
        let store = MemoryLocalStore::with_entry("k", "old");
        store.set_fail_set(true);
        store.set_fail_remove(true);

        assert!(matches!(store.set("k", "new"), Err(StorageError::Local(_))));
        assert!(store.remove("k").is_err());
        assert_eq!(store.entry("k").as_deref(), Some("old"));
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryLocalStore::new();
        let other = store.clone();
        other.set("k", "v").unwrap();
        assert_eq!(store.entry("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_player_set_data_merges() {
        let mut initial = Map::new();
        initial.insert("coins".into(), json!(10));
        let player = MemoryPlayer::with_data(initial);

        let mut update = Map::new();
        update.insert("level".into(), json!(4));
        pollster::block_on(player.set_data(update, true)).unwrap();

        let data = player.data();
        assert_eq!(data.get("coins"), Some(&json!(10)));
        assert_eq!(data.get("level"), Some(&json!(4)));
        assert_eq!(player.last_flush(), Some(true));
    }

    #[test]
    fn test_failing_session() {
        let session = MemorySession::failing();
        assert!(pollster::block_on(session.get_player()).is_err());
    }
}
