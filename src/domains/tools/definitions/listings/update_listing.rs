//! Update listing tool.
//!
//! Patches the store listing for one language. Only the fields given in the
//! call are sent; everything else keeps its current value.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::publisher::{ListingPatch, Resolution, run_in_edit_session};
use crate::domains::tools::common::{
    ValidateParams, default_language, success_result, validate_language, validate_package_name,
    validate_text_length,
};
use crate::domains::tools::dispatcher::{ToolContext, ToolDispatcher, tool_route};
use crate::domains::tools::error::ToolError;

const MAX_TITLE_CHARS: usize = 30;
const MAX_SHORT_DESCRIPTION_CHARS: usize = 80;
const MAX_FULL_DESCRIPTION_CHARS: usize = 4000;

/// Parameters for the update listing tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListingParams {
    #[schemars(description = "The package name of the app")]
    pub package_name: String,

    #[schemars(description = "Language code of the listing (default: en-US)")]
    #[serde(default = "default_language")]
    pub language: String,

    #[schemars(description = "New app title (max 30 characters)")]
    #[serde(default)]
    pub title: Option<String>,

    #[schemars(description = "New short description (max 80 characters)")]
    #[serde(default)]
    pub short_description: Option<String>,

    #[schemars(description = "New full description (max 4000 characters)")]
    #[serde(default)]
    pub full_description: Option<String>,

    #[schemars(description = "New promo video URL (YouTube)")]
    #[serde(default)]
    pub video: Option<String>,
}

impl ValidateParams for UpdateListingParams {
    fn validate(&self) -> Result<(), ToolError> {
        validate_package_name(&self.package_name)?;
        validate_language(&self.language)?;
        validate_text_length("title", self.title.as_deref(), MAX_TITLE_CHARS)?;
        validate_text_length(
            "shortDescription",
            self.short_description.as_deref(),
            MAX_SHORT_DESCRIPTION_CHARS,
        )?;
        validate_text_length(
            "fullDescription",
            self.full_description.as_deref(),
            MAX_FULL_DESCRIPTION_CHARS,
        )?;

        if self.patch().is_empty() {
            return Err(ToolError::invalid_arguments(
                "at least one of title, shortDescription, fullDescription or video is required",
            ));
        }
        Ok(())
    }
}

impl UpdateListingParams {
    /// The listing fields this call changes.
    pub fn patch(&self) -> ListingPatch {
        ListingPatch {
            title: self.title.clone(),
            short_description: self.short_description.clone(),
            full_description: self.full_description.clone(),
            video: self.video.clone(),
        }
    }
}

/// Update listing tool.
pub struct UpdateListingTool;

impl UpdateListingTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "update_listing";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Update the store listing of an app for a language. \
         Only the fields provided are changed; the update is committed immediately.";

    #[instrument(skip_all, fields(package = %params.package_name, language = %params.language))]
    pub async fn execute(ctx: ToolContext, params: UpdateListingParams) -> Result<CallToolResult, ToolError> {
        let patch = params.patch();
        let fields = patch.field_names();
        info!("Updating listing fields: {}", fields.join(", "));

        let api = ctx.api();
        let language = params.language.as_str();
        let patch_ref = &patch;
        run_in_edit_session(api, &params.package_name, Resolution::Commit, |edit| async move {
            api.patch_listing(&edit, language, patch_ref).await
        })
        .await?;

        Ok(success_result(format!(
            "Updated {} listing for {}: {}",
            params.language,
            params.package_name,
            fields.join(", ")
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
            input_schema: schema_for_type::<UpdateListingParams>().into(),
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
