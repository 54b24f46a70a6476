//! Tools domain module.
//!
//! Tools are the operations MCP clients call to inspect and change apps in
//! the Play Console.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `dispatcher.rs` - Validation, credentials and serialization of calls
//! - `router.rs` - Dynamic ToolRouter builder for the MCP transports
//! - `registry.rs` - Central tool registry and name-based dispatch
//! - `common.rs` - Shared parameter validation and result helpers
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in the matching `definitions/` group
//! 2. Define params (with `ValidateParams`), `execute()` and `create_route()`
//! 3. Export in the group's `mod.rs` and `definitions/mod.rs`
//! 4. Add the route in `router.rs` and the entry in `registry.rs`
//!
//! **No need to modify `server.rs`!** The router is built dynamically.

pub mod common;
pub mod definitions;
pub mod dispatcher;
mod error;
mod registry;
pub mod router;

pub use dispatcher::{ToolContext, ToolDispatcher};
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
