//! Model Context Protocol plumbing: JSON-RPC framing, message shapes, and the
//! stdio serve loop.

pub mod jsonrpc;
pub mod protocol;
mod server;

pub use server::McpServer;
