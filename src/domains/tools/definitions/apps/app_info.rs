//! App info tool.
//!
//! Reads the app details (default language, contact details) inside a
//! read-only edit.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::publisher::{Resolution, run_in_edit_session};
use crate::domains::tools::common::{ValidateParams, json_result, validate_package_name};
use crate::domains::tools::dispatcher::{ToolContext, ToolDispatcher, tool_route};
use crate::domains::tools::error::ToolError;

/// Parameters for the app info tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetAppInfoParams {
    #[schemars(description = "The package name of the app (e.g., com.example.app)")]
    pub package_name: String,
}

impl ValidateParams for GetAppInfoParams {
    fn validate(&self) -> Result<(), ToolError> {
        validate_package_name(&self.package_name)
    }
}

/// App info tool.
pub struct GetAppInfoTool;

impl GetAppInfoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_app_info";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get detailed information about a specific app";

    #[instrument(skip_all, fields(package = %params.package_name))]
    pub async fn execute(ctx: ToolContext, params: GetAppInfoParams) -> Result<CallToolResult, ToolError> {
        info!("Fetching app details");

        let api = ctx.api();
        let details = run_in_edit_session(api, &params.package_name, Resolution::Discard, |edit| async move {
            api.get_details(&edit).await
        })
        .await?;

        json_result(&details)
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
            input_schema: schema_for_type::<GetAppInfoParams>().into(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::publisher::testing::{ApiCall, Failing, MockPublisher};
    use crate::domains::tools::common::result_text;

    fn args() -> Option<JsonObject> {
        serde_json::json!({ "packageName": "com.example.app" }).as_object().cloned()
    }

    #[tokio::test]
    async fn test_app_info_discards_edit() {
        let api = Arc::new(MockPublisher::new());
        let dispatcher = ToolDispatcher::with_mock(api.clone());

        let result = GetAppInfoTool::call(&dispatcher, args()).await;

        assert_eq!(result.is_error, Some(false));
        assert!(result_text(&result).contains("\"defaultLanguage\": \"en-US\""));
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::InsertEdit("com.example.app".into()),
                ApiCall::GetDetails("edit-1".into()),
                ApiCall::DeleteEdit("edit-1".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_app_info_twice_uses_independent_edits() {
        let api = Arc::new(MockPublisher::new());
        let dispatcher = ToolDispatcher::with_mock(api.clone());

        GetAppInfoTool::call(&dispatcher, args()).await;
        GetAppInfoTool::call(&dispatcher, args()).await;

        assert_eq!(api.insert_count(), 2);
        assert_eq!(api.delete_count(), 2);
        assert_eq!(api.commit_count(), 0);
        assert!(api.calls().contains(&ApiCall::DeleteEdit("edit-2".into())));
    }

    #[tokio::test]
    async fn test_app_info_read_failure_still_discards() {
        let api = Arc::new(MockPublisher::new().failing(Failing::GetDetails));
        let dispatcher = ToolDispatcher::with_mock(api.clone());

        let result = GetAppInfoTool::call(&dispatcher, args()).await;

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).starts_with("Error: edits.details.get failed with HTTP 500"));
        assert_eq!(api.delete_count(), 1);
        assert_eq!(api.commit_count(), 0);
    }

    #[tokio::test]
    async fn test_app_info_rejects_bad_package() {
        let api = Arc::new(MockPublisher::new());
        let dispatcher = ToolDispatcher::with_mock(api.clone());

        let args = serde_json::json!({ "packageName": "not a package" }).as_object().cloned();
        let result = GetAppInfoTool::call(&dispatcher, args).await;

        assert_eq!(result.is_error, Some(true));
        assert!(api.calls().is_empty());
    }
}
