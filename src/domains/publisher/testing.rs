//! In-memory test doubles for the publisher collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use super::auth::{AuthError, Credential, CredentialProvider};
use super::client::{PublisherApi, PublisherConnector};
use super::edit::EditSession;
use super::error::{PublisherError, PublisherResult};
use super::types::{ListingPatch, Track, TrackUpdate};

/// A call observed by [`MockPublisher`], with its interesting arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    InsertEdit(String),
    GetDetails(String),
    GetTrack(String, Track),
    UpdateTrack(String, Value),
    GetListing(String, String),
    PatchListing(String, String, Value),
    CommitEdit(String),
    DeleteEdit(String),
    ListReviews(String, u32),
    ReplyToReview(String, String, String),
}

/// Which call the mock should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failing {
    InsertEdit,
    GetDetails,
    GetTrack,
    UpdateTrack,
    GetListing,
    PatchListing,
    CommitEdit,
    DeleteEdit,
    ListReviews,
    ReplyToReview,
}

/// Recording [`PublisherApi`] that hands out `edit-1`, `edit-2`, ...
#[derive(Default)]
pub struct MockPublisher {
    calls: Mutex<Vec<ApiCall>>,
    failing: Vec<Failing>,
    next_edit: AtomicUsize,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call of the given kind fail with HTTP 500.
    pub fn failing(mut self, call: Failing) -> Self {
        self.failing.push(call);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commit_count(&self) -> usize {
        self.count(|c| matches!(c, ApiCall::CommitEdit(_)))
    }

    pub fn delete_count(&self) -> usize {
        self.count(|c| matches!(c, ApiCall::DeleteEdit(_)))
    }

    pub fn insert_count(&self) -> usize {
        self.count(|c| matches!(c, ApiCall::InsertEdit(_)))
    }

    fn count(&self, predicate: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    fn record(&self, call: ApiCall, kind: Failing, operation: &'static str) -> PublisherResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.contains(&kind) {
            return Err(PublisherError::http(operation, 500, "Internal error encountered."));
        }
        Ok(())
    }
}

#[async_trait]
impl PublisherApi for MockPublisher {
    async fn insert_edit(&self, package_name: &str) -> PublisherResult<EditSession> {
        self.record(
            ApiCall::InsertEdit(package_name.to_string()),
            Failing::InsertEdit,
            "edits.insert",
        )?;
        let n = self.next_edit.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(EditSession::new(package_name, format!("edit-{}", n)))
    }

    async fn get_details(&self, edit: &EditSession) -> PublisherResult<Value> {
        self.record(
            ApiCall::GetDetails(edit.edit_id().to_string()),
            Failing::GetDetails,
            "edits.details.get",
        )?;
        Ok(json!({
            "defaultLanguage": "en-US",
            "contactEmail": "dev@example.com"
        }))
    }

    async fn get_track(&self, edit: &EditSession, track: Track) -> PublisherResult<Value> {
        self.record(
            ApiCall::GetTrack(edit.edit_id().to_string(), track),
            Failing::GetTrack,
            "edits.tracks.get",
        )?;
        Ok(json!({
            "track": track.as_str(),
            "releases": [{ "versionCodes": ["41"], "status": "completed" }]
        }))
    }

    async fn update_track(
        &self,
        edit: &EditSession,
        update: &TrackUpdate,
    ) -> PublisherResult<Value> {
        let body = serde_json::to_value(update).unwrap();
        self.record(
            ApiCall::UpdateTrack(edit.edit_id().to_string(), body.clone()),
            Failing::UpdateTrack,
            "edits.tracks.update",
        )?;
        Ok(body)
    }

    async fn get_listing(&self, edit: &EditSession, language: &str) -> PublisherResult<Value> {
        self.record(
            ApiCall::GetListing(edit.edit_id().to_string(), language.to_string()),
            Failing::GetListing,
            "edits.listings.get",
        )?;
        Ok(json!({ "language": language, "title": "Example" }))
    }

    async fn patch_listing(
        &self,
        edit: &EditSession,
        language: &str,
        patch: &ListingPatch,
    ) -> PublisherResult<Value> {
        let body = serde_json::to_value(patch).unwrap();
        self.record(
            ApiCall::PatchListing(edit.edit_id().to_string(), language.to_string(), body.clone()),
            Failing::PatchListing,
            "edits.listings.patch",
        )?;
        Ok(body)
    }

    async fn commit_edit(&self, edit: &EditSession) -> PublisherResult<()> {
        self.record(
            ApiCall::CommitEdit(edit.edit_id().to_string()),
            Failing::CommitEdit,
            "edits.commit",
        )
    }

    async fn delete_edit(&self, edit: &EditSession) -> PublisherResult<()> {
        self.record(
            ApiCall::DeleteEdit(edit.edit_id().to_string()),
            Failing::DeleteEdit,
            "edits.delete",
        )
    }

    async fn list_reviews(&self, package_name: &str, max_results: u32) -> PublisherResult<Value> {
        self.record(
            ApiCall::ListReviews(package_name.to_string(), max_results),
            Failing::ListReviews,
            "reviews.list",
        )?;
        Ok(json!({
            "reviews": [{ "reviewId": "r1", "authorName": "A User" }]
        }))
    }

    async fn reply_to_review(
        &self,
        package_name: &str,
        review_id: &str,
        reply_text: &str,
    ) -> PublisherResult<Value> {
        self.record(
            ApiCall::ReplyToReview(
                package_name.to_string(),
                review_id.to_string(),
                reply_text.to_string(),
            ),
            Failing::ReplyToReview,
            "reviews.reply",
        )?;
        Ok(json!({ "result": { "replyText": reply_text } }))
    }
}

/// Connector that always hands out the same shared mock.
pub struct MockConnector(pub Arc<MockPublisher>);

impl PublisherConnector for MockConnector {
    fn connect(&self, _credential: Credential) -> Arc<dyn PublisherApi> {
        self.0.clone()
    }
}

/// Credential provider that counts requests and can be told to fail.
#[derive(Default)]
pub struct StaticCredentials {
    fail: bool,
    requests: AtomicUsize,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn credential(&self) -> Result<Credential, AuthError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AuthError::Exchange {
                status: Some(401),
                message: "invalid_grant".to_string(),
            });
        }
        Ok(Credential::new("test-token", Utc::now() + Duration::seconds(3600)))
    }
}
