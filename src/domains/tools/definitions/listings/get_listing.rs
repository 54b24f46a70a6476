//! Get listing tool.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::publisher::{Resolution, run_in_edit_session};
use crate::domains::tools::common::{
    ValidateParams, default_language, json_result, validate_language, validate_package_name,
};
use crate::domains::tools::dispatcher::{ToolContext, ToolDispatcher, tool_route};
use crate::domains::tools::error::ToolError;

/// Parameters for the get listing tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetListingParams {
    #[schemars(description = "The package name of the app")]
    pub package_name: String,

    #[schemars(description = "Language code of the listing (default: en-US)")]
    #[serde(default = "default_language")]
    pub language: String,
}

impl ValidateParams for GetListingParams {
    fn validate(&self) -> Result<(), ToolError> {
        validate_package_name(&self.package_name)?;
        validate_language(&self.language)
    }
}

/// Get listing tool - reads the store listing for one language.
pub struct GetListingTool;

impl GetListingTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_listing";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get the store listing (title, descriptions, video) of an app for a language";

    #[instrument(skip_all, fields(package = %params.package_name, language = %params.language))]
    pub async fn execute(ctx: ToolContext, params: GetListingParams) -> Result<CallToolResult, ToolError> {
        info!("Fetching listing");

        let api = ctx.api();
        let language = params.language.as_str();
        let listing = run_in_edit_session(api, &params.package_name, Resolution::Discard, |edit| async move {
            api.get_listing(&edit, language).await
        })
        .await?;

        json_result(&listing)
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
            input_schema: schema_for_type::<GetListingParams>().into(),
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
