//! Tool definitions, grouped by the part of the Play Console they touch.
//!
//! - `apps/` - app discovery, details and statistics
//! - `releases/` - track releases
//! - `listings/` - store listings
//! - `reviews/` - user reviews and replies

pub mod apps;
pub mod listings;
pub mod releases;
pub mod reviews;

pub use apps::{GetAppInfoTool, GetStatisticsTool, ListAppsTool};
pub use listings::{GetListingTool, UpdateListingTool};
pub use releases::{CreateReleaseTool, ListReleasesTool};
pub use reviews::{GetReviewsTool, ReplyToReviewTool};
