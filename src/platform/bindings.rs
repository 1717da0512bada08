//! JS-facing progress manager
//!
//! ```js
//! const ysdk = await YaGames.init();
//! const progress = await GameProgressManager.init(ysdk);
//! const saved = await progress.load();          // object or null
//! const result = await progress.save({ level: 3 });
//! if (result.status === "failed") showSaveWarning();
//! ```
//!
//! Every returned promise resolves; none of them reject.

use std::rc::Rc;

use js_sys::Promise;
use serde_json::json;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use super::sdk::{SdkPlayer, SdkSession, js_to_json, json_to_js};
use super::web::WebLocalStore;
use crate::config::ProgressConfig;
use crate::progress::{ProgressStore, SaveResult};

type WebProgressStore = ProgressStore<WebLocalStore, SdkPlayer>;

fn init_logging() {
    console_error_panic_hook::set_once();
    // Already initialized when a second manager is created
    let _ = console_log::init_with_level(log::Level::Info);
}

fn save_result_to_js(result: SaveResult) -> JsValue {
    let value = json!({
        "cloud": result.cloud,
        "local": result.local,
        "status": result.status().as_str(),
    });
    json_to_js(&value).unwrap_or(JsValue::NULL)
}

/// Progress store bound to `localStorage` and an optional platform SDK
#[wasm_bindgen]
pub struct GameProgressManager {
    store: Rc<WebProgressStore>,
}

#[wasm_bindgen]
impl GameProgressManager {
    /// Resolve the player from `sdk` (may be null) and build the manager
    pub async fn init(sdk: JsValue, storage_key: Option<String>) -> GameProgressManager {
        init_logging();

        let config = storage_key
            .map(ProgressConfig::with_key)
            .unwrap_or_default();
        let session = SdkSession::new(sdk);
        let local = WebLocalStore::from_window();
        let local_available = local.is_available();
        let store = ProgressStore::initialize(local, session.as_ref(), config).await;

        log::info!(
            "GameProgressManager ready (cloud: {}, local: {})",
            store.has_cloud(),
            local_available
        );
        GameProgressManager {
            store: Rc::new(store),
        }
    }

    #[wasm_bindgen(getter, js_name = hasCloud)]
    pub fn has_cloud(&self) -> bool {
        self.store.has_cloud()
    }

    /// Resolves to the saved progress, or null on first run
    pub fn load(&self) -> Promise {
        let store = Rc::clone(&self.store);
        future_to_promise(async move {
            let Some(blob) = store.load().await else {
                return Ok(JsValue::NULL);
            };
            match json_to_js(&blob) {
                Ok(value) => Ok(value),
                Err(e) => {
                    log::error!("Failed to convert loaded progress: {}", e);
                    Ok(JsValue::NULL)
                }
            }
        })
    }

    /// Resolves to `{ cloud, local, status }`
    pub fn save(&self, blob: JsValue) -> Promise {
        let store = Rc::clone(&self.store);
        future_to_promise(async move {
            let result = match js_to_json(&blob) {
                Ok(blob) => store.save(&blob).await,
                Err(e) => {
                    log::error!("Progress is not serializable, nothing saved: {}", e);
                    SaveResult::default()
                }
            };
            Ok(save_result_to_js(result))
        })
    }

    /// Best-effort reset of saved progress
    pub fn clear(&self) -> Promise {
        let store = Rc::clone(&self.store);
        future_to_promise(async move {
            store.clear().await;
            Ok(JsValue::UNDEFINED)
        })
    }
}
