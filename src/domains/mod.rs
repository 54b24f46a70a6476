//! Domains module containing business logic organized by bounded contexts.
//!
//! - `publisher` - the Android Publisher API: credentials, HTTP client and
//!   edit sessions
//! - `tools` - the MCP tools built on top of it

pub mod publisher;
pub mod tools;
