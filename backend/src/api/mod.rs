//! HTTP API module.
//!
//! Server, request/response types and the live log stream.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::*;
pub use server::{build_router, start_server, ServerConfig, DEFAULT_MAX_UPLOAD_BYTES};
pub use types::*;
