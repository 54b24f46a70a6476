//! Statistics tool.
//!
//! Only `ratings` is backed by the Publisher API (read through the app
//! details in a read-only edit). Install and crash figures live in the Play
//! Developer Reporting API, which this server does not call; those metrics
//! answer with an explicit "not implemented" notice instead of data.

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
    ValidateParams, json_result, success_result, validate_package_name,
};
use crate::domains::tools::dispatcher::{ToolContext, ToolDispatcher, tool_route};
use crate::domains::tools::error::ToolError;

/// Metric requested from the statistics tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Installs,
    Crashes,
    Ratings,
}

/// Parameters for the statistics tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetStatisticsParams {
    #[schemars(description = "The package name of the app")]
    pub package_name: String,

    #[schemars(description = "The metric to retrieve: installs, crashes or ratings")]
    pub metric: Metric,
}

impl ValidateParams for GetStatisticsParams {
    fn validate(&self) -> Result<(), ToolError> {
        validate_package_name(&self.package_name)
    }
}

/// Statistics tool.
pub struct GetStatisticsTool;

impl GetStatisticsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_statistics";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get app statistics (installs, crashes, ratings). \
         Installs and crashes are not implemented and return a notice instead of data.";

    #[instrument(skip_all, fields(package = %params.package_name, metric = ?params.metric))]
    pub async fn execute(ctx: ToolContext, params: GetStatisticsParams) -> Result<CallToolResult, ToolError> {
        match params.metric {
            Metric::Ratings => {
                info!("Fetching rating details");
                let api = ctx.api();
                let details = run_in_edit_session(api, &params.package_name, Resolution::Discard, |edit| async move {
                    api.get_details(&edit).await
                })
                .await?;
                json_result(&details)
            }
            Metric::Installs => Ok(success_result(not_implemented("Install", &params.package_name))),
            Metric::Crashes => Ok(success_result(not_implemented("Crash", &params.package_name))),
        }
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
            input_schema: schema_for_type::<GetStatisticsParams>().into(),
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

fn not_implemented(kind: &str, package_name: &str) -> String {
    format!(
        "Not implemented: {} statistics for {} come from the Play Developer Reporting API, \
         which this server does not query. See Statistics in the Play Console instead.",
        kind, package_name
    )
}
