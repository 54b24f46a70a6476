//! App-level tools: listing, details and statistics.

pub mod app_info;
pub mod list_apps;
pub mod statistics;

pub use app_info::{GetAppInfoParams, GetAppInfoTool};
pub use list_apps::{ListAppsParams, ListAppsTool};
pub use statistics::{GetStatisticsParams, GetStatisticsTool, Metric};
