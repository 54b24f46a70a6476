//! Store listing tools.

pub mod get_listing;
pub mod update_listing;

pub use get_listing::{GetListingParams, GetListingTool};
pub use update_listing::{UpdateListingParams, UpdateListingTool};
