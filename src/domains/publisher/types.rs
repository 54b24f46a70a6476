//! Request payloads and enumerations for the Android Publisher API.
//!
//! Read responses are passed through as raw JSON so that every field the API
//! returns reaches the caller; only write payloads are typed here.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distribution track an app version can be released to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Internal,
    Alpha,
    Beta,
    Production,
}

impl Track {
    /// Track name as used in API paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rollout status of a release on a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReleaseStatus {
    /// Staged rollout to a fraction of users.
    InProgress,
    /// Fully rolled out.
    Completed,
}

impl ReleaseStatus {
    /// Pick the status implied by an optional staged-rollout fraction.
    ///
    /// A fraction below 1.0 means a staged rollout; anything else is a full
    /// release.
    pub fn for_user_fraction(user_fraction: Option<f64>) -> Self {
        match user_fraction {
            Some(fraction) if fraction < 1.0 => Self::InProgress,
            _ => Self::Completed,
        }
    }

    /// Status name as sent to the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "inProgress",
            Self::Completed => "completed",
        }
    }
}

/// Text localized for one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub language: String,
    pub text: String,
}

/// One release entry written to a track.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRelease {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Version codes are int64 values the API transports as strings.
    pub version_codes: Vec<String>,

    pub status: ReleaseStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_fraction: Option<f64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub release_notes: Vec<LocalizedText>,
}

/// Body of an `edits.tracks.update` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackUpdate {
    pub track: Track,
    pub releases: Vec<TrackRelease>,
}

/// Body of an `edits.listings.patch` call.
///
/// Absent fields are left out of the payload entirely, so the API keeps
/// their current values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

impl ListingPatch {
    /// API names of the fields this patch carries.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.title.is_some() {
            names.push("title");
        }
        if self.short_description.is_some() {
            names.push("shortDescription");
        }
        if self.full_description.is_some() {
            names.push("fullDescription");
        }
        if self.video.is_some() {
            names.push("video");
        }
        names
    }

    /// Whether the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.field_names().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_status_for_fraction() {
        assert_eq!(ReleaseStatus::for_user_fraction(Some(0.5)), ReleaseStatus::InProgress);
        assert_eq!(ReleaseStatus::for_user_fraction(Some(0.999)), ReleaseStatus::InProgress);
        assert_eq!(ReleaseStatus::for_user_fraction(Some(1.0)), ReleaseStatus::Completed);
        assert_eq!(ReleaseStatus::for_user_fraction(None), ReleaseStatus::Completed);
    }

    #[test]
    fn test_track_rejects_unknown_name() {
        assert!(serde_json::from_str::<Track>("\"nightly\"").is_err());
        assert_eq!(serde_json::from_str::<Track>("\"beta\"").unwrap(), Track::Beta);
    }

    #[test]
    fn test_listing_patch_omits_absent_fields() {
        let patch = ListingPatch {
            title: Some("My App".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["title"], "My App");
        assert!(!object.contains_key("shortDescription"));
        assert!(!object.contains_key("video"));
    }

    #[test]
    fn test_track_update_wire_shape() {
        let update = TrackUpdate {
            track: Track::Beta,
            releases: vec![TrackRelease {
                name: None,
                version_codes: vec!["42".to_string()],
                status: ReleaseStatus::InProgress,
                user_fraction: Some(0.5),
                release_notes: vec![],
            }],
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["track"], "beta");
        assert_eq!(value["releases"][0]["status"], "inProgress");
        assert_eq!(value["releases"][0]["versionCodes"][0], "42");
        assert_eq!(value["releases"][0]["userFraction"], 0.5);
        assert!(value["releases"][0].get("releaseNotes").is_none());
    }
}
