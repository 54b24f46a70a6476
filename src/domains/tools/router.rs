//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool knows how to create its own route; all of them share one
//! dispatcher so calls are serialized across tools.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    CreateReleaseTool, GetAppInfoTool, GetListingTool, GetReviewsTool, GetStatisticsTool,
    ListAppsTool, ListReleasesTool, ReplyToReviewTool, UpdateListingTool,
};
use super::dispatcher::ToolDispatcher;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(dispatcher: Arc<ToolDispatcher>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(ListAppsTool::create_route(dispatcher.clone()))
        .with_route(GetAppInfoTool::create_route(dispatcher.clone()))
        .with_route(ListReleasesTool::create_route(dispatcher.clone()))
        .with_route(CreateReleaseTool::create_route(dispatcher.clone()))
        .with_route(GetListingTool::create_route(dispatcher.clone()))
        .with_route(UpdateListingTool::create_route(dispatcher.clone()))
        .with_route(GetReviewsTool::create_route(dispatcher.clone()))
        .with_route(ReplyToReviewTool::create_route(dispatcher.clone()))
        .with_route(GetStatisticsTool::create_route(dispatcher))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::domains::publisher::testing::MockPublisher;

    struct TestServer {}

    fn test_dispatcher() -> Arc<ToolDispatcher> {
        Arc::new(ToolDispatcher::with_mock(Arc::new(MockPublisher::new())))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_dispatcher());
        let tools = router.list_all();
        assert_eq!(tools.len(), 9);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"list_apps"));
        assert!(names.contains(&"get_app_info"));
        assert!(names.contains(&"list_releases"));
        assert!(names.contains(&"create_release"));
        assert!(names.contains(&"get_listing"));
        assert!(names.contains(&"update_listing"));
        assert!(names.contains(&"get_reviews"));
        assert!(names.contains(&"reply_to_review"));
        assert!(names.contains(&"get_statistics"));
    }

    #[test]
    fn test_registry_matches_router() {
        let dispatcher = test_dispatcher();
        let registry = ToolRegistry::new(dispatcher.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(dispatcher);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }

    #[test]
    fn test_every_schema_is_an_object() {
        for tool in ToolRegistry::get_all_tools() {
            assert_eq!(
                tool.input_schema.get("type").and_then(|t| t.as_str()),
                Some("object"),
                "tool {}",
                tool.name
            );
        }
    }
}
