use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UpdateGroup;

/// A published or draft release entry.
///
/// Versions are the unit of persistence: the structured update groups are
/// only ever stored as part of a version record, never on their own.
/// Field names serialize as camelCase to stay compatible with changelog
/// data files produced by earlier deployments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: String,
    /// Semantic version string, e.g. `1.4.2`.
    pub version: String,
    /// Product tag this release belongs to (e.g. `IDE`, `CLI`).
    pub product: String,
    pub publish_date: DateTime<Utc>,
    pub status: VersionStatus,
    pub title: String,
    pub updates: Vec<UpdateGroup>,
}

/// Draft entries are visible in the admin list only; the public changelog
/// shows published versions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    Draft,
    Published,
}

impl VersionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

/// Input for creating a new version. The id (`v<version>`) and publish date
/// are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVersionInput {
    pub version: String,
    pub product: String,
    pub title: String,
    /// Defaults to `Draft` if not specified.
    pub status: Option<VersionStatus>,
    #[serde(default)]
    pub updates: Vec<UpdateGroup>,
}

/// Input for updating an existing version. All fields are optional for
/// partial updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateVersionInput {
    pub version: Option<String>,
    pub product: Option<String>,
    pub title: Option<String>,
    pub status: Option<VersionStatus>,
    pub updates: Option<Vec<UpdateGroup>>,
}

/// The newest version for a product plus the suggested next version
/// string the editor pre-fills.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestVersion {
    pub latest_version: Option<String>,
    pub suggested_version: String,
}
