//! List apps tool.
//!
//! The Android Publisher API has no endpoint enumerating a developer
//! account's apps, so this tool only explains how to proceed.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::common::{ValidateParams, success_result};
use crate::domains::tools::dispatcher::{ToolContext, ToolDispatcher, tool_route};
use crate::domains::tools::error::ToolError;

/// Parameters for the list apps tool (none).
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListAppsParams {}

impl ValidateParams for ListAppsParams {
    fn validate(&self) -> Result<(), ToolError> {
        Ok(())
    }
}

/// Advisory returned instead of an app list.
pub const LIST_APPS_ADVISORY: &str = "The Google Play Developer API has no endpoint that lists \
     the apps in a developer account, so apps must be addressed by package name. \
     Pass a known package name (for example com.example.app) to get_app_info, \
     list_releases, get_listing or get_reviews.";

/// List apps tool.
pub struct ListAppsTool;

impl ListAppsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_apps";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List all apps in your Google Play Console";

    pub async fn execute(_ctx: ToolContext, _params: ListAppsParams) -> Result<CallToolResult, ToolError> {
        Ok(success_result(LIST_APPS_ADVISORY))
    }

    /// Run a raw call through the dispatcher.
    pub async fn call(dispatcher: &ToolDispatcher, arguments: Option<JsonObject>) -> CallToolResult {
        dispatcher.invoke(Self::NAME, arguments, Self::execute).await
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ListAppsParams>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the MCP router.
    pub fn create_route<S>(dispatcher: Arc<ToolDispatcher>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        tool_route(Self::to_tool(), dispatcher, Self::execute)
    }
}
