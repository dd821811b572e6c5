#![deny(unreachable_pub)]

// Core modules
mod consts;
mod errors;
mod helpers;
mod prelude;
mod req;

// Feature modules
pub mod client;
pub mod config;
pub mod mcp;
pub mod tools;
pub mod types;

// Re-exports
pub use client::HyperliquidClient;
pub use config::ServerConfig;
pub use consts::{MAINNET_API_URL, TESTNET_API_URL};
pub use errors::{Error, HttpErrorKind};
pub use helpers::next_nonce;
pub use mcp::McpServer;
