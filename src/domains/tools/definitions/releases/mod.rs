//! Track and release tools.

pub mod create_release;
pub mod list_releases;

pub use create_release::{CreateReleaseParams, CreateReleaseTool};
pub use list_releases::{ListReleasesParams, ListReleasesTool};
