//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod list;
mod upload;
mod session;
mod config;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Rejected promises (backend `Err(String)`) come back as `Err`
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Backend error text from a rejected invoke
fn rejection(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

// Re-export all public items
pub use list::*;
pub use upload::*;
pub use session::*;
pub use config::*;
