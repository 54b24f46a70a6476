//! Reply to review tool.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tools::common::{ValidateParams, success_result, validate_package_name};
use crate::domains::tools::dispatcher::{ToolContext, ToolDispatcher, tool_route};
use crate::domains::tools::error::ToolError;

/// Play limit on developer replies.
const MAX_REPLY_CHARS: usize = 350;

/// Parameters for the reply to review tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplyToReviewParams {
    #[schemars(description = "The package name of the app")]
    pub package_name: String,

    #[schemars(description = "ID of the review to reply to")]
    pub review_id: String,

    #[schemars(description = "Reply text (max 350 characters)")]
    pub reply_text: String,
}

impl ValidateParams for ReplyToReviewParams {
    fn validate(&self) -> Result<(), ToolError> {
        validate_package_name(&self.package_name)?;
        if self.review_id.trim().is_empty() {
            return Err(ToolError::invalid_arguments("reviewId must not be empty"));
        }
        let length = self.reply_text.chars().count();
        if self.reply_text.trim().is_empty() || length > MAX_REPLY_CHARS {
            return Err(ToolError::invalid_arguments(format!(
                "replyText must be between 1 and {} characters",
                MAX_REPLY_CHARS
            )));
        }
        Ok(())
    }
}

/// Reply to review tool.
pub struct ReplyToReviewTool;

impl ReplyToReviewTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "reply_to_review";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Reply to a user review. A new reply replaces any earlier developer reply.";

    #[instrument(skip_all, fields(package = %params.package_name, review = %params.review_id))]
    pub async fn execute(ctx: ToolContext, params: ReplyToReviewParams) -> Result<CallToolResult, ToolError> {
        info!("Replying to review");

        ctx.api()
            .reply_to_review(&params.package_name, &params.review_id, &params.reply_text)
            .await?;

        Ok(success_result(format!(
            "Replied to review {} for {}",
            params.review_id, params.package_name
        )))
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
            input_schema: schema_for_type::<ReplyToReviewParams>().into(),
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
