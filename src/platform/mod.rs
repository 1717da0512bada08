//! Browser platform bindings
//!
//! Adapts browser objects to the storage traits:
//! - `web`: LocalStorage via web-sys
//! - `sdk`: Platform SDK session/player via JS reflection
//! - `bindings`: `GameProgressManager`, the JS-facing facade

#[cfg(target_arch = "wasm32")]
pub mod bindings;
#[cfg(target_arch = "wasm32")]
pub mod sdk;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use bindings::GameProgressManager;
#[cfg(target_arch = "wasm32")]
pub use sdk::{SdkPlayer, SdkSession};
#[cfg(target_arch = "wasm32")]
pub use web::WebLocalStore;
