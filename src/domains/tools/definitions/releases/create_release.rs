//! Create release tool.
//!
//! Writes a single release (one version code) to a track inside an edit and
//! commits it. A `userFraction` below 1.0 makes it a staged rollout
//! (`inProgress`); otherwise the release is `completed`.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::publisher::{
    LocalizedText, ReleaseStatus, Resolution, Track, TrackRelease, TrackUpdate, run_in_edit_session,
};
use crate::domains::tools::common::{
    ValidateParams, default_language, success_result, validate_language, validate_package_name,
    validate_text_length,
};
use crate::domains::tools::dispatcher::{ToolContext, ToolDispatcher, tool_route};
use crate::domains::tools::error::ToolError;

/// Play limit on release notes per language.
const MAX_RELEASE_NOTES_CHARS: usize = 500;

/// Parameters for the create release tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReleaseParams {
    #[schemars(description = "The package name of the app")]
    pub package_name: String,

    #[schemars(description = "The release track")]
    pub track: Track,

    #[schemars(description = "Version code of the uploaded bundle or APK to release")]
    pub version_code: u64,

    #[schemars(description = "Optional release name shown in the Play Console")]
    #[serde(default)]
    pub release_name: Option<String>,

    #[schemars(description = "Optional release notes (what's new)")]
    #[serde(default)]
    pub release_notes: Option<String>,

    #[schemars(description = "Language of the release notes (default: en-US)")]
    #[serde(default = "default_language")]
    pub release_notes_language: String,

    #[schemars(description = "Fraction of users for a staged rollout (0 < fraction <= 1)")]
    #[serde(default)]
    pub user_fraction: Option<f64>,
}

impl ValidateParams for CreateReleaseParams {
    fn validate(&self) -> Result<(), ToolError> {
        validate_package_name(&self.package_name)?;
        if self.version_code == 0 {
            return Err(ToolError::invalid_arguments("versionCode must be at least 1"));
        }
        if let Some(fraction) = self.user_fraction {
            if !(fraction > 0.0 && fraction <= 1.0) {
                return Err(ToolError::invalid_arguments(
                    "userFraction must be greater than 0 and at most 1",
                ));
            }
        }
        validate_language(&self.release_notes_language)?;
        validate_text_length(
            "releaseNotes",
            self.release_notes.as_deref(),
            MAX_RELEASE_NOTES_CHARS,
        )
    }
}

impl CreateReleaseParams {
    /// The track payload this call writes.
    pub fn track_update(&self) -> TrackUpdate {
        let status = ReleaseStatus::for_user_fraction(self.user_fraction);
        let release_notes = self
            .release_notes
            .iter()
            .map(|text| LocalizedText {
                language: self.release_notes_language.clone(),
                text: text.clone(),
            })
            .collect();

        TrackUpdate {
            track: self.track,
            releases: vec![TrackRelease {
                name: self.release_name.clone(),
                version_codes: vec![self.version_code.to_string()],
                status,
                // A completed release carries no fraction.
                user_fraction: self.user_fraction.filter(|_| status == ReleaseStatus::InProgress),
                release_notes,
            }],
        }
    }
}

/// Create release tool.
pub struct CreateReleaseTool;

impl CreateReleaseTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "create_release";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Create a new release on a track for an already uploaded version code. \
         Optionally set release notes and a staged rollout fraction. \
         The release replaces the track's current releases and is committed immediately.";

    #[instrument(skip_all, fields(package = %params.package_name, track = %params.track, version_code = params.version_code))]
    pub async fn execute(ctx: ToolContext, params: CreateReleaseParams) -> Result<CallToolResult, ToolError> {
        let update = params.track_update();
        let status = update.releases[0].status;
        info!("Creating {} release", status.as_str());

        let api = ctx.api();
        let update_ref = &update;
        run_in_edit_session(api, &params.package_name, Resolution::Commit, |edit| async move {
            api.update_track(&edit, update_ref).await
        })
        .await?;

        let rollout = match status {
            ReleaseStatus::InProgress => format!(
                ", staged rollout to {}% of users",
                params.user_fraction.unwrap_or_default() * 100.0
            ),
            ReleaseStatus::Completed => String::new(),
        };

        Ok(success_result(format!(
            "Created release of version {} on the {} track for {} (status: {}{})",
            params.version_code,
            params.track,
            params.package_name,
            status.as_str(),
            rollout
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
            input_schema: schema_for_type::<CreateReleaseParams>().into(),
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
