//! Android Publisher API client.
//!
//! [`PublisherApi`] is the surface the tools are written against. The
//! reqwest-backed [`HttpPublisherClient`] implements it over the v3 REST API;
//! a client is bound to one credential and built per tool invocation by a
//! [`PublisherConnector`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::auth::Credential;
use super::edit::EditSession;
use super::error::{PublisherError, PublisherResult};
use super::types::{ListingPatch, Track, TrackUpdate};
use crate::core::config::PublisherConfig;

/// Operations of the Android Publisher API used by the tools.
#[async_trait]
pub trait PublisherApi: Send + Sync {
    /// `edits.insert`: open a new edit for a package.
    async fn insert_edit(&self, package_name: &str) -> PublisherResult<EditSession>;

    /// `edits.details.get`
    async fn get_details(&self, edit: &EditSession) -> PublisherResult<Value>;

    /// `edits.tracks.get`
    async fn get_track(&self, edit: &EditSession, track: Track) -> PublisherResult<Value>;

    /// `edits.tracks.update`
    async fn update_track(&self, edit: &EditSession, update: &TrackUpdate)
    -> PublisherResult<Value>;

    /// `edits.listings.get`
    async fn get_listing(&self, edit: &EditSession, language: &str) -> PublisherResult<Value>;

    /// `edits.listings.patch`: only the fields present in `patch` are sent.
    async fn patch_listing(
        &self,
        edit: &EditSession,
        language: &str,
        patch: &ListingPatch,
    ) -> PublisherResult<Value>;

    /// `edits.commit`
    async fn commit_edit(&self, edit: &EditSession) -> PublisherResult<()>;

    /// `edits.delete`
    async fn delete_edit(&self, edit: &EditSession) -> PublisherResult<()>;

    /// `reviews.list`
    async fn list_reviews(&self, package_name: &str, max_results: u32) -> PublisherResult<Value>;

    /// `reviews.reply`
    async fn reply_to_review(
        &self,
        package_name: &str,
        review_id: &str,
        reply_text: &str,
    ) -> PublisherResult<Value>;
}

/// Builds API clients bound to a credential.
pub trait PublisherConnector: Send + Sync {
    fn connect(&self, credential: Credential) -> Arc<dyn PublisherApi>;
}

/// Build the shared HTTP client used for API and token calls.
pub fn build_http_client(config: &PublisherConfig) -> PublisherResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|source| PublisherError::Request {
            operation: "client setup",
            source,
        })
}

/// Connector producing [`HttpPublisherClient`]s.
#[derive(Clone)]
pub struct HttpPublisherConnector {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpPublisherConnector {
    pub fn new(http: reqwest::Client, config: &PublisherConfig) -> PublisherResult<Self> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| PublisherError::InvalidBaseUrl(format!("{}: {}", config.api_base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(PublisherError::InvalidBaseUrl(config.api_base_url.clone()));
        }
        Ok(Self { http, base_url })
    }
}

impl PublisherConnector for HttpPublisherConnector {
    fn connect(&self, credential: Credential) -> Arc<dyn PublisherApi> {
        Arc::new(HttpPublisherClient {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            credential,
        })
    }
}

/// REST client for `androidpublisher/v3/applications`.
pub struct HttpPublisherClient {
    http: reqwest::Client,
    base_url: Url,
    credential: Credential,
}

#[derive(Deserialize)]
struct InsertEditResponse {
    id: String,
}

impl HttpPublisherClient {
    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> PublisherResult<Url> {
        endpoint_url(&self.base_url, segments)
    }

    fn edit_endpoint(&self, edit: &EditSession, rest: &[&str]) -> PublisherResult<Url> {
        let mut segments = vec![edit.package_name(), "edits", edit.edit_id()];
        segments.extend_from_slice(rest);
        self.endpoint(&segments)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(self.credential.bearer_token())
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> PublisherResult<Response> {
        debug!("Android Publisher call: {}", operation);

        let response = request
            .send()
            .await
            .map_err(|source| PublisherError::Request { operation, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            return Err(PublisherError::http(operation, status.as_u16(), message));
        }

        Ok(response)
    }

    async fn send_json(&self, operation: &'static str, request: RequestBuilder) -> PublisherResult<Value> {
        let response = self.send(operation, request).await?;
        let body = response
            .text()
            .await
            .map_err(|source| PublisherError::Request { operation, source })?;

        if body.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        serde_json::from_str(&body).map_err(|e| PublisherError::decode(operation, e.to_string()))
    }
}

#[async_trait]
impl PublisherApi for HttpPublisherClient {
    async fn insert_edit(&self, package_name: &str) -> PublisherResult<EditSession> {
        let url = self.endpoint(&[package_name, "edits"])?;
        let body = self
            .send_json("edits.insert", self.request(Method::POST, url).json(&Map::new()))
            .await?;
        let created: InsertEditResponse = serde_json::from_value(body)
            .map_err(|e| PublisherError::decode("edits.insert", e.to_string()))?;
        Ok(EditSession::new(package_name, created.id))
    }

    async fn get_details(&self, edit: &EditSession) -> PublisherResult<Value> {
        let url = self.edit_endpoint(edit, &["details"])?;
        self.send_json("edits.details.get", self.request(Method::GET, url))
            .await
    }

    async fn get_track(&self, edit: &EditSession, track: Track) -> PublisherResult<Value> {
        let url = self.edit_endpoint(edit, &["tracks", track.as_str()])?;
        self.send_json("edits.tracks.get", self.request(Method::GET, url))
            .await
    }

    async fn update_track(
        &self,
        edit: &EditSession,
        update: &TrackUpdate,
    ) -> PublisherResult<Value> {
        let url = self.edit_endpoint(edit, &["tracks", update.track.as_str()])?;
        self.send_json("edits.tracks.update", self.request(Method::PUT, url).json(update))
            .await
    }

    async fn get_listing(&self, edit: &EditSession, language: &str) -> PublisherResult<Value> {
        let url = self.edit_endpoint(edit, &["listings", language])?;
        self.send_json("edits.listings.get", self.request(Method::GET, url))
            .await
    }

    async fn patch_listing(
        &self,
        edit: &EditSession,
        language: &str,
        patch: &ListingPatch,
    ) -> PublisherResult<Value> {
        let url = self.edit_endpoint(edit, &["listings", language])?;
        self.send_json("edits.listings.patch", self.request(Method::PATCH, url).json(patch))
            .await
    }

    async fn commit_edit(&self, edit: &EditSession) -> PublisherResult<()> {
        let commit = format!("{}:commit", edit.edit_id());
        let url = self.endpoint(&[edit.package_name(), "edits", &commit])?;
        self.send("edits.commit", self.request(Method::POST, url))
            .await
            .map(|_| ())
    }

    async fn delete_edit(&self, edit: &EditSession) -> PublisherResult<()> {
        let url = self.edit_endpoint(edit, &[])?;
        self.send("edits.delete", self.request(Method::DELETE, url))
            .await
            .map(|_| ())
    }

    async fn list_reviews(&self, package_name: &str, max_results: u32) -> PublisherResult<Value> {
        let url = self.endpoint(&[package_name, "reviews"])?;
        let request = self
            .request(Method::GET, url)
            .query(&[("maxResults", max_results)]);
        self.send_json("reviews.list", request).await
    }

    async fn reply_to_review(
        &self,
        package_name: &str,
        review_id: &str,
        reply_text: &str,
    ) -> PublisherResult<Value> {
        let reply = format!("{}:reply", review_id);
        let url = self.endpoint(&[package_name, "reviews", &reply])?;
        let body = serde_json::json!({ "replyText": reply_text });
        self.send_json("reviews.reply", self.request(Method::POST, url).json(&body))
            .await
    }
}

fn endpoint_url(base_url: &Url, segments: &[&str]) -> PublisherResult<Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| PublisherError::InvalidBaseUrl(base_url.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Extract the message from a Google API error envelope.
fn api_error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct Envelope {
        error: ErrorBody,
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Envelope>(trimmed) {
        Ok(envelope) => Some(envelope.error.message),
        Err(_) => Some(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://androidpublisher.googleapis.com/androidpublisher/v3/applications")
            .unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let url = endpoint_url(&base(), &["com.example.app", "edits", "123:commit"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://androidpublisher.googleapis.com/androidpublisher/v3/applications/com.example.app/edits/123:commit"
        );
    }

    #[test]
    fn test_endpoint_encodes_separators() {
        let url = endpoint_url(&base(), &["com.example.app", "reviews", "a/b:reply"]).unwrap();
        assert!(url.path().ends_with("/reviews/a%2Fb:reply"));
    }

    #[test]
    fn test_endpoint_with_trailing_slash_base() {
        let base = Url::parse("http://127.0.0.1:9000/v3/applications/").unwrap();
        let url = endpoint_url(&base, &["com.example.app", "edits"]).unwrap();
        assert_eq!(url.path(), "/v3/applications/com.example.app/edits");
    }

    #[test]
    fn test_api_error_message_from_envelope() {
        let body = r#"{"error":{"code":404,"message":"Package not found: com.example.app.","status":"NOT_FOUND"}}"#;
        assert_eq!(
            api_error_message(body).as_deref(),
            Some("Package not found: com.example.app.")
        );
    }

    #[test]
    fn test_api_error_message_plain_and_empty() {
        assert_eq!(api_error_message("  Bad Gateway \n").as_deref(), Some("Bad Gateway"));
        assert_eq!(api_error_message(""), None);
    }

    #[test]
    fn test_connector_rejects_bad_base_url() {
        let config = PublisherConfig {
            api_base_url: "not a url".to_string(),
            ..Default::default()
        };
        let result = HttpPublisherConnector::new(reqwest::Client::new(), &config);
        assert!(matches!(result, Err(PublisherError::InvalidBaseUrl(_))));
    }
}
