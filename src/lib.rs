pub mod config;
pub mod endpoint;
pub mod error;
pub mod filter;
pub mod http_handler;
pub mod kb_sync;
pub mod logging;
