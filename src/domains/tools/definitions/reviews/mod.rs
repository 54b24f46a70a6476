//! Review tools. Reviews are not edit-scoped.

pub mod get_reviews;
pub mod reply_to_review;

pub use get_reviews::{GetReviewsParams, GetReviewsTool};
pub use reply_to_review::{ReplyToReviewParams, ReplyToReviewTool};
