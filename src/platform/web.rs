//! LocalStorage backend

use wasm_bindgen::{JsCast, JsValue};
use web_sys::Storage;

use crate::storage::{LocalStore, StorageError};

/// `window.localStorage`, or nothing when the browser denies it
///
/// A missing storage makes every call fail with [`StorageError::Unavailable`]
/// so callers see the same fallible store either way.
pub struct WebLocalStore {
    storage: Option<Storage>,
}

impl WebLocalStore {
    pub fn from_window() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if storage.is_none() {
            log::warn!("LocalStorage is not available");
        }
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

impl LocalStore for WebLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Local(js_error_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Local(js_error_message(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Local(js_error_message(&e)))
    }
}

/// Readable text for a thrown JS value
pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
