//! Tool dispatcher - runs one tool invocation at a time.
//!
//! Every invocation goes through the same steps:
//!
//! ```text
//! arguments --parse/validate--> params --credential--> ToolContext --> operation --> result
//! ```
//!
//! Validation happens before anything touches the network, so a malformed
//! call never obtains a token, opens an edit or calls the API. Failures at
//! any step become error results; nothing is retried.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, JsonObject, Tool},
};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::info;

use super::common::{ValidateParams, parse_params};
use super::error::ToolError;
use crate::core::{Config, Error, Result};
use crate::domains::publisher::{
    CredentialProvider, HttpPublisherConnector, PublisherApi, PublisherConnector,
    ServiceAccountAuth, ServiceAccountKey, build_http_client,
};

/// Per-invocation state handed to a tool operation.
///
/// Holds an API client bound to the credential obtained for this invocation.
pub struct ToolContext {
    api: Arc<dyn PublisherApi>,
}

impl ToolContext {
    pub fn new(api: Arc<dyn PublisherApi>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &dyn PublisherApi {
        self.api.as_ref()
    }
}

/// Serializes tool invocations and supplies each with a fresh context.
pub struct ToolDispatcher {
    credentials: Arc<dyn CredentialProvider>,
    connector: Arc<dyn PublisherConnector>,
    /// Held for the whole invocation so calls never interleave.
    gate: Mutex<()>,
}

impl ToolDispatcher {
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        connector: Arc<dyn PublisherConnector>,
    ) -> Self {
        Self {
            credentials,
            connector,
            gate: Mutex::new(()),
        }
    }

    /// Build the production dispatcher: service-account auth and the HTTP
    /// API client.
    ///
    /// Fails when the key file is missing, unreadable or malformed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let key_file = config
            .key_file()
            .ok_or_else(|| Error::config("no service account key file configured"))?;
        let key = ServiceAccountKey::from_file(key_file)?;
        info!("Loaded service account key for {}", key.client_email());

        let http = build_http_client(&config.publisher)?;
        let connector = HttpPublisherConnector::new(http.clone(), &config.publisher)?;
        let credentials = ServiceAccountAuth::new(key, http);

        Ok(Self::new(Arc::new(credentials), Arc::new(connector)))
    }

    /// Parse `arguments`, then run `operation` with a fresh context.
    pub async fn invoke<P, F, Fut>(
        &self,
        tool: &str,
        arguments: Option<JsonObject>,
        operation: F,
    ) -> CallToolResult
    where
        P: DeserializeOwned + ValidateParams,
        F: FnOnce(ToolContext, P) -> Fut,
        Fut: Future<Output = std::result::Result<CallToolResult, ToolError>>,
    {
        let params = match parse_params::<P>(arguments) {
            Ok(params) => params,
            Err(e) => return e.into_result(),
        };

        let _turn = self.gate.lock().await;
        info!("Running tool {}", tool);

        let credential = match self.credentials.credential().await {
            Ok(credential) => credential,
            Err(e) => return ToolError::from(e).into_result(),
        };
        let context = ToolContext::new(self.connector.connect(credential));

        match operation(context, params).await {
            Ok(result) => result,
            Err(e) => e.into_result(),
        }
    }

    /// Dispatcher over a mock API with always-available credentials.
    #[cfg(test)]
    pub(crate) fn with_mock(api: Arc<crate::domains::publisher::testing::MockPublisher>) -> Self {
        use crate::domains::publisher::testing::{MockConnector, StaticCredentials};

        Self::new(Arc::new(StaticCredentials::new()), Arc::new(MockConnector(api)))
    }
}

/// Build an rmcp route that sends calls for `tool` through the dispatcher.
pub fn tool_route<S, P, F, Fut>(
    tool: Tool,
    dispatcher: Arc<ToolDispatcher>,
    operation: F,
) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
    P: DeserializeOwned + ValidateParams + Send + 'static,
    F: Fn(ToolContext, P) -> Fut + Copy + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<CallToolResult, ToolError>> + Send + 'static,
{
    let name = tool.name.clone();
    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let arguments = ctx.arguments.clone();
        let dispatcher = dispatcher.clone();
        let name = name.clone();
        async move {
            let result = dispatcher.invoke(&name, arguments, operation).await;
            Ok::<_, McpError>(result)
        }
        .boxed()
    })
}
