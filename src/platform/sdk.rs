//! Platform SDK session and player
//!
//! The SDK object is created by the host page and handed over as a `JsValue`.
//! Methods are looked up by name and may return plain values or promises.
//! Records cross the boundary as JSON text.

use js_sys::{Array, Function, JSON, Promise, Reflect};
use serde_json::{Map, Value};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::web::js_error_message;
use crate::storage::{Player, RemoteSession, StorageError};

fn remote_error(value: JsValue) -> StorageError {
    StorageError::Remote(js_error_message(&value))
}

/// Call `target[name](...args)` and await the result if it is a promise
async fn call_method(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, StorageError> {
    let method = Reflect::get(target, &JsValue::from_str(name)).map_err(remote_error)?;
    let method: Function = method
        .dyn_into()
        .map_err(|_| StorageError::Remote(format!("{} is not a function", name)))?;

    let js_args: Array = args.iter().collect();
    let returned = Reflect::apply(&method, target, &js_args).map_err(remote_error)?;
    JsFuture::from(Promise::resolve(&returned))
        .await
        .map_err(remote_error)
}

/// Convert a JS value to JSON via `JSON.stringify`
pub(crate) fn js_to_json(value: &JsValue) -> Result<Value, StorageError> {
    if value.is_null() || value.is_undefined() {
        return Ok(Value::Null);
    }
    let text = JSON::stringify(value)
        .map_err(remote_error)?
        .as_string()
        .ok_or_else(|| StorageError::Remote("value is not serializable".into()))?;
    Ok(serde_json::from_str(&text)?)
}

/// Convert JSON to a JS value via `JSON.parse`
pub(crate) fn json_to_js(value: &Value) -> Result<JsValue, StorageError> {
    let text = serde_json::to_string(value)?;
    JSON::parse(&text).map_err(remote_error)
}

/// Initialized platform SDK instance
pub struct SdkSession {
    sdk: JsValue,
}

impl SdkSession {
    /// `None` when the page has no SDK (null/undefined)
    pub fn new(sdk: JsValue) -> Option<Self> {
        if sdk.is_null() || sdk.is_undefined() {
            None
        } else {
            Some(Self { sdk })
        }
    }
}

impl RemoteSession for SdkSession {
    type Player = SdkPlayer;

    async fn get_player(&self) -> Result<SdkPlayer, StorageError> {
        let player = call_method(&self.sdk, "getPlayer", &[]).await?;
        if player.is_null() || player.is_undefined() {
            return Err(StorageError::Remote("getPlayer returned no player".into()));
        }
        Ok(SdkPlayer { player })
    }
}

/// Player object returned by `getPlayer()`
pub struct SdkPlayer {
    player: JsValue,
}

impl Player for SdkPlayer {
    async fn get_data(&self) -> Result<Map<String, Value>, StorageError> {
        let data = call_method(&self.player, "getData", &[]).await?;
        match js_to_json(&data)? {
            Value::Null => Ok(Map::new()),
            Value::Object(map) => Ok(map),
            other => Err(StorageError::Remote(format!(
                "getData returned a non-object: {}",
                other
            ))),
        }
    }

    async fn set_data(&self, data: Map<String, Value>, flush: bool) -> Result<(), StorageError> {
        let record = json_to_js(&Value::Object(data))?;
        call_method(
            &self.player,
            "setData",
            &[record, JsValue::from_bool(flush)],
        )
        .await?;
        Ok(())
    }
}
