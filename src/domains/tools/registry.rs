//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - Name-based dispatch for tool calls
//! - Tool metadata for listing

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};

use super::definitions::{
    CreateReleaseTool, GetAppInfoTool, GetListingTool, GetReviewsTool, GetStatisticsTool,
    ListAppsTool, ListReleasesTool, ReplyToReviewTool, UpdateListingTool,
};
use super::dispatcher::ToolDispatcher;
use super::error::ToolError;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    dispatcher: Arc<ToolDispatcher>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(dispatcher: Arc<ToolDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            ListAppsTool::NAME,
            GetAppInfoTool::NAME,
            ListReleasesTool::NAME,
            CreateReleaseTool::NAME,
            GetListingTool::NAME,
            UpdateListingTool::NAME,
            GetReviewsTool::NAME,
            ReplyToReviewTool::NAME,
            GetStatisticsTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata), in listing order.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            ListAppsTool::to_tool(),
            GetAppInfoTool::to_tool(),
            ListReleasesTool::to_tool(),
            CreateReleaseTool::to_tool(),
            GetListingTool::to_tool(),
            UpdateListingTool::to_tool(),
            GetReviewsTool::to_tool(),
            ReplyToReviewTool::to_tool(),
            GetStatisticsTool::to_tool(),
        ]
    }

    /// Dispatch a tool call by name.
    ///
    /// An unknown name yields an error result, never a protocol error.
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let dispatcher = self.dispatcher.as_ref();
        match name {
            ListAppsTool::NAME => ListAppsTool::call(dispatcher, arguments).await,
            GetAppInfoTool::NAME => GetAppInfoTool::call(dispatcher, arguments).await,
            ListReleasesTool::NAME => ListReleasesTool::call(dispatcher, arguments).await,
            CreateReleaseTool::NAME => CreateReleaseTool::call(dispatcher, arguments).await,
            GetListingTool::NAME => GetListingTool::call(dispatcher, arguments).await,
            UpdateListingTool::NAME => UpdateListingTool::call(dispatcher, arguments).await,
            GetReviewsTool::NAME => GetReviewsTool::call(dispatcher, arguments).await,
            ReplyToReviewTool::NAME => ReplyToReviewTool::call(dispatcher, arguments).await,
            GetStatisticsTool::NAME => GetStatisticsTool::call(dispatcher, arguments).await,
            _ => ToolError::not_found(name).into_result(),
        }
    }
}
