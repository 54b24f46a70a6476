//! Get reviews tool.
//!
//! Reviews live outside the edit model, so this calls the API directly.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tools::common::{
    MAX_RESULTS_LIMIT, ValidateParams, default_max_results, json_result, validate_package_name,
};
use crate::domains::tools::dispatcher::{ToolContext, ToolDispatcher, tool_route};
use crate::domains::tools::error::ToolError;

/// Parameters for the get reviews tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetReviewsParams {
    #[schemars(description = "The package name of the app")]
    pub package_name: String,

    #[schemars(description = "Maximum number of reviews to return (default: 10, max: 100)")]
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl ValidateParams for GetReviewsParams {
    fn validate(&self) -> Result<(), ToolError> {
        validate_package_name(&self.package_name)?;
        if self.max_results == 0 || self.max_results > MAX_RESULTS_LIMIT {
            return Err(ToolError::invalid_arguments(format!(
                "maxResults must be between 1 and {}",
                MAX_RESULTS_LIMIT
            )));
        }
        Ok(())
    }
}

/// Get reviews tool.
pub struct GetReviewsTool;

impl GetReviewsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_reviews";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get recent user reviews for an app";

    #[instrument(skip_all, fields(package = %params.package_name, max_results = params.max_results))]
    pub async fn execute(ctx: ToolContext, params: GetReviewsParams) -> Result<CallToolResult, ToolError> {
        info!("Listing reviews");

        let reviews = ctx
            .api()
            .list_reviews(&params.package_name, params.max_results)
            .await?;

        json_result(&reviews)
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
            input_schema: schema_for_type::<GetReviewsParams>().into(),
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
    use serde_json::json;

    #[tokio::test]
    async fn test_reviews_without_edit() {
        let api = Arc::new(MockPublisher::new());
        let dispatcher = ToolDispatcher::with_mock(api.clone());

        let args = json!({ "packageName": "com.example.app", "maxResults": 5 });
        let result = GetReviewsTool::call(&dispatcher, args.as_object().cloned()).await;

        assert_eq!(result.is_error, Some(false));
        assert!(result_text(&result).contains("reviewId"));
        assert_eq!(api.calls(), vec![ApiCall::ListReviews("com.example.app".into(), 5)]);
        assert_eq!(api.insert_count(), 0);
    }

    #[tokio::test]
    async fn test_default_max_results() {
        let api = Arc::new(MockPublisher::new());
        let dispatcher = ToolDispatcher::with_mock(api.clone());

        let args = json!({ "packageName": "com.example.app" });
        GetReviewsTool::call(&dispatcher, args.as_object().cloned()).await;

        assert_eq!(api.calls(), vec![ApiCall::ListReviews("com.example.app".into(), 10)]);
    }

    #[tokio::test]
    async fn test_max_results_bounds() {
        let api = Arc::new(MockPublisher::new());
        let dispatcher = ToolDispatcher::with_mock(api.clone());

        for max in [0, 101] {
            let args = json!({ "packageName": "com.example.app", "maxResults": max });
            let result = GetReviewsTool::call(&dispatcher, args.as_object().cloned()).await;
            assert!(result_text(&result).contains("maxResults must be between 1 and 100"));
        }
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_api_failure_is_error_result() {
        let api = Arc::new(MockPublisher::new().failing(Failing::ListReviews));
        let dispatcher = ToolDispatcher::with_mock(api.clone());

        let args = json!({ "packageName": "com.example.app" });
        let result = GetReviewsTool::call(&dispatcher, args.as_object().cloned()).await;

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("Internal error encountered."));
    }
}
