//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod list_cmd;
mod upload_cmd;
mod session_cmd;
mod auth_cmd;
mod config_cmd;
mod log_cmd;

pub use list_cmd::*;
pub use upload_cmd::*;
pub use session_cmd::*;
pub use auth_cmd::*;
pub use config_cmd::*;
pub use log_cmd::*;
