//! List releases tool.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::publisher::{Resolution, Track, run_in_edit_session};
use crate::domains::tools::common::{ValidateParams, json_result, validate_package_name};
use crate::domains::tools::dispatcher::{ToolContext, ToolDispatcher, tool_route};
use crate::domains::tools::error::ToolError;

/// Parameters for the list releases tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListReleasesParams {
    #[schemars(description = "The package name of the app")]
    pub package_name: String,

    #[schemars(description = "The release track")]
    pub track: Track,
}

impl ValidateParams for ListReleasesParams {
    fn validate(&self) -> Result<(), ToolError> {
        validate_package_name(&self.package_name)
    }
}

/// List releases tool - shows the releases currently on one track.
pub struct ListReleasesTool;

impl ListReleasesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_releases";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List releases for an app in a specific track";

    #[instrument(skip_all, fields(package = %params.package_name, track = %params.track))]
    pub async fn execute(ctx: ToolContext, params: ListReleasesParams) -> Result<CallToolResult, ToolError> {
        info!("Fetching track");

        let api = ctx.api();
        let track = params.track;
        let track_info = run_in_edit_session(api, &params.package_name, Resolution::Discard, |edit| async move {
            api.get_track(&edit, track).await
        })
        .await?;

        json_result(&track_info)
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
            input_schema: schema_for_type::<ListReleasesParams>().into(),
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
