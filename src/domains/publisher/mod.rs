//! Publisher domain: access to the Google Play Android Publisher API.
//!
//! - `auth.rs` - service-account credentials and token caching
//! - `client.rs` - the `PublisherApi` surface and its HTTP implementation
//! - `edit.rs` - edit sessions and their open/commit/discard discipline
//! - `types.rs` - write payloads and track/status enumerations
//! - `error.rs` - API error types

pub mod auth;
pub mod client;
pub mod edit;
mod error;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthError, Credential, CredentialProvider, ServiceAccountAuth, ServiceAccountKey};
pub use client::{
    HttpPublisherClient, HttpPublisherConnector, PublisherApi, PublisherConnector,
    build_http_client,
};
pub use edit::{EditError, EditSession, Resolution, run_in_edit_session};
pub use error::{PublisherError, PublisherResult};
pub use types::{ListingPatch, LocalizedText, ReleaseStatus, Track, TrackRelease, TrackUpdate};
