//! Edit sessions.
//!
//! The Android Publisher API stages changes inside an *edit*: it is opened
//! with `edits.insert`, used by any number of calls, and finally either
//! committed (`edits.commit`) or deleted (`edits.delete`). An edit left open
//! lingers on the remote side and blocks later edits for the package, so
//! every edit opened here is resolved exactly once before
//! [`run_in_edit_session`] returns.
//!
//! Resolution policy:
//!
//! | body    | requested | resolution        | result                 |
//! |---------|-----------|-------------------|------------------------|
//! | ok      | Commit    | commit            | value, or `Resolve`    |
//! | ok      | Discard   | delete            | value, or `Resolve`    |
//! | failed  | any       | delete            | `Body`                 |
//!
//! If the edit cannot be opened, the body never runs and nothing is resolved.

use std::fmt;
use std::future::Future;

use thiserror::Error;
use tracing::{info, warn};

use super::client::PublisherApi;
use super::error::PublisherError;

/// One open edit on the remote side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    package_name: String,
    edit_id: String,
}

impl EditSession {
    pub fn new(package_name: impl Into<String>, edit_id: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            edit_id: edit_id.into(),
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn edit_id(&self) -> &str {
        &self.edit_id
    }
}

/// How a successful edit is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Persist the staged changes.
    Commit,
    /// Abandon the edit; used for read-only inspection.
    Discard,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commit => f.write_str("commit"),
            Self::Discard => f.write_str("discard"),
        }
    }
}

/// Failure of an edit-scoped operation.
#[derive(Debug, Error)]
pub enum EditError {
    /// No edit could be opened; nothing ran.
    #[error("Could not open an edit for {package_name}: {source}")]
    Open {
        package_name: String,
        #[source]
        source: PublisherError,
    },

    /// The operation inside the edit failed. The edit was discarded, so no
    /// change was applied. `discard_error` is set when that discard failed as
    /// well.
    #[error("{source}{}", discard_note(.discard_error))]
    Body {
        #[source]
        source: PublisherError,
        discard_error: Option<PublisherError>,
    },

    /// The operation succeeded but closing the edit failed.
    #[error("{}", resolve_message(.resolution, .edit_id, .source))]
    Resolve {
        edit_id: String,
        resolution: Resolution,
        #[source]
        source: PublisherError,
    },
}

impl EditError {
    /// Whether changes staged in the edit might have been applied anyway.
    ///
    /// Only a failed commit leaves that open; every other failure path ends
    /// with the edit discarded or never opened.
    pub fn may_have_applied(&self) -> bool {
        matches!(
            self,
            Self::Resolve {
                resolution: Resolution::Commit,
                ..
            }
        )
    }
}

fn discard_note(discard_error: &Option<PublisherError>) -> String {
    match discard_error {
        Some(e) => format!(" (discarding the edit also failed: {})", e),
        None => String::new(),
    }
}

fn resolve_message(resolution: &Resolution, edit_id: &str, source: &PublisherError) -> String {
    match resolution {
        Resolution::Commit => format!(
            "Commit of edit {} failed; the changes may or may not have been applied: {}",
            edit_id, source
        ),
        Resolution::Discard => format!(
            "The operation succeeded but discarding edit {} failed: {}",
            edit_id, source
        ),
    }
}

/// Run `body` inside a freshly opened edit for `package_name` and resolve the
/// edit before returning.
///
/// `body` receives the session by value; the edit id it carries must not be
/// used once this function returns.
pub async fn run_in_edit_session<T, F, Fut>(
    api: &dyn PublisherApi,
    package_name: &str,
    resolution: Resolution,
    body: F,
) -> Result<T, EditError>
where
    F: FnOnce(EditSession) -> Fut,
    Fut: Future<Output = Result<T, PublisherError>>,
{
    let session = api
        .insert_edit(package_name)
        .await
        .map_err(|source| EditError::Open {
            package_name: package_name.to_string(),
            source,
        })?;

    info!(
        "Opened edit {} for {} ({})",
        session.edit_id(),
        package_name,
        resolution
    );

    match body(session.clone()).await {
        Ok(value) => {
            resolve(api, &session, resolution)
                .await
                .map_err(|source| EditError::Resolve {
                    edit_id: session.edit_id().to_string(),
                    resolution,
                    source,
                })?;
            Ok(value)
        }
        Err(source) => {
            // A failed body is never committed, whatever was requested.
            let discard_error = resolve(api, &session, Resolution::Discard).await.err();
            if let Some(e) = &discard_error {
                warn!("Failed to discard edit {} after error: {}", session.edit_id(), e);
            }
            Err(EditError::Body {
                source,
                discard_error,
            })
        }
    }
}

async fn resolve(
    api: &dyn PublisherApi,
    session: &EditSession,
    resolution: Resolution,
) -> Result<(), PublisherError> {
    let result = match resolution {
        Resolution::Commit => api.commit_edit(session).await,
        Resolution::Discard => api.delete_edit(session).await,
    };

    match &result {
        Ok(()) => info!("Resolved edit {} ({})", session.edit_id(), resolution),
        Err(e) => warn!("Resolving edit {} ({}) failed: {}", session.edit_id(), resolution, e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::publisher::testing::{ApiCall, Failing, MockPublisher};

    fn not_found() -> PublisherError {
        PublisherError::http("edits.details.get", 404, "Package not found")
    }

    #[tokio::test]
    async fn test_commit_on_success() {
        let api = MockPublisher::new();
        let value = run_in_edit_session(&api, "com.example.app", Resolution::Commit, |edit| {
            let api = &api;
            async move { api.get_details(&edit).await }
        })
        .await;

        tokio_test::assert_ok!(value);
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::InsertEdit("com.example.app".into()),
                ApiCall::GetDetails("edit-1".into()),
                ApiCall::CommitEdit("edit-1".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_discard_on_success() {
        let api = MockPublisher::new();
        run_in_edit_session(&api, "com.example.app", Resolution::Discard, |edit| {
            let api = &api;
            async move { api.get_details(&edit).await }
        })
        .await
        .unwrap();

        assert_eq!(api.commit_count(), 0);
        assert_eq!(api.calls().last(), Some(&ApiCall::DeleteEdit("edit-1".into())));
    }

    #[tokio::test]
    async fn test_body_failure_discards_instead_of_commit() {
        let api = MockPublisher::new();
        let result: Result<(), EditError> =
            run_in_edit_session(&api, "com.example.app", Resolution::Commit, |_edit| async {
                Err(not_found())
            })
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, EditError::Body { discard_error: None, .. }));
        assert!(!err.may_have_applied());
        assert_eq!(api.commit_count(), 0);
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::InsertEdit("com.example.app".into()),
                ApiCall::DeleteEdit("edit-1".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_open_failure_skips_body_and_resolution() {
        let api = MockPublisher::new().failing(Failing::InsertEdit);
        let mut body_ran = false;
        let result = run_in_edit_session(&api, "com.example.app", Resolution::Commit, |_edit| {
            body_ran = true;
            async { Ok(()) }
        })
        .await;

        assert!(matches!(result, Err(EditError::Open { .. })));
        assert!(!body_ran);
        assert_eq!(api.calls(), vec![ApiCall::InsertEdit("com.example.app".into())]);
    }

    #[tokio::test]
    async fn test_commit_failure_is_resolution_error() {
        let api = MockPublisher::new().failing(Failing::CommitEdit);
        let result = run_in_edit_session(&api, "com.example.app", Resolution::Commit, |_edit| async {
            Ok(7)
        })
        .await;

        let err = result.unwrap_err();
        assert!(err.may_have_applied());
        assert!(err.to_string().contains("may or may not have been applied"));
        // The commit failure must not trigger a second resolution.
        assert_eq!(api.delete_count(), 0);
    }

    #[tokio::test]
    async fn test_discard_failure_after_read_is_resolution_error() {
        let api = MockPublisher::new().failing(Failing::DeleteEdit);
        let result = run_in_edit_session(&api, "com.example.app", Resolution::Discard, |_edit| async {
            Ok(())
        })
        .await;

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            EditError::Resolve {
                resolution: Resolution::Discard,
                ..
            }
        ));
        assert!(!err.may_have_applied());
    }

    #[tokio::test]
    async fn test_discard_failure_does_not_mask_body_error() {
        let api = MockPublisher::new().failing(Failing::DeleteEdit);
        let result: Result<(), EditError> =
            run_in_edit_session(&api, "com.example.app", Resolution::Commit, |_edit| async {
                Err(not_found())
            })
            .await;

        let err = result.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Package not found"));
        assert!(message.contains("discarding the edit also failed"));
        assert_eq!(api.commit_count(), 0);
    }

    #[tokio::test]
    async fn test_each_run_opens_a_new_edit() {
        let api = MockPublisher::new();
        for _ in 0..2 {
            run_in_edit_session(&api, "com.example.app", Resolution::Discard, |_edit| async {
                Ok(())
            })
            .await
            .unwrap();
        }

        assert_eq!(
            api.calls(),
            vec![
                ApiCall::InsertEdit("com.example.app".into()),
                ApiCall::DeleteEdit("edit-1".into()),
                ApiCall::InsertEdit("com.example.app".into()),
                ApiCall::DeleteEdit("edit-2".into()),
            ]
        );
    }
}
