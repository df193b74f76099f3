//! JSON-file persistence for versions, site configuration, backups, and
//! uploaded media.
//!
//! Layout under the data directory:
//!
//! ```text
//! changelog.json    all version records, newest first
//! config.json       site settings + admin credential
//! backups/          timestamped snapshots of changelog.json
//! uploads/          media files referenced from release notes
//! ```
//!
//! Every operation runs under the store lock; the JSON-backed ones re-read
//! the file, mutate, and write it back. Contention is a non-issue at
//! changelog scale and re-reading keeps the server honest about edits made
//! directly on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::*;

/// On-disk shape of `changelog.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ChangelogData {
    versions: Vec<Version>,
}

/// An entry in the uploads directory, served under `/uploads/<filename>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadEntry {
    pub filename: String,
    pub url: String,
    /// Millisecond timestamp parsed from the filename prefix, used for
    /// newest-first ordering.
    pub timestamp: i64,
}

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

#[derive(Clone)]
pub struct Store {
    data_dir: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl Store {
    /// Open a store rooted at `data_dir`, creating the directory tree and
    /// an empty changelog file on first use.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("creating data directory {}", data_dir.display()))?;
        fs::create_dir_all(data_dir.join("uploads"))?;

        let store = Self {
            data_dir,
            lock: Arc::new(Mutex::new(())),
        };
        if !store.changelog_path().exists() {
            store.write_data(&ChangelogData::default())?;
        }
        Ok(store)
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "chlog")
            .context("could not determine data directory")?;
        Self::open(dirs.data_dir())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }

    fn changelog_path(&self) -> PathBuf {
        self.data_dir.join("changelog.json")
    }

    fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    fn read_data(&self) -> Result<ChangelogData> {
        let path = self.changelog_path();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    fn write_data(&self, data: &ChangelogData) -> Result<()> {
        let path = self.changelog_path();
        fs::write(&path, serde_json::to_string_pretty(data)?)
            .with_context(|| format!("writing {}", path.display()))
    }

    // ============================================================
    // Versions
    // ============================================================

    /// Published versions, optionally filtered by product, newest first.
    pub fn published_versions(&self, product: Option<&str>) -> Result<Vec<Version>> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let mut versions: Vec<Version> = self
            .read_data()?
            .versions
            .into_iter()
            .filter(|v| v.status == VersionStatus::Published)
            .filter(|v| product.map_or(true, |p| v.product == p))
            .collect();
        versions.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
        Ok(versions)
    }

    /// All versions including drafts, newest first.
    pub fn all_versions(&self) -> Result<Vec<Version>> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let mut versions = self.read_data()?.versions;
        versions.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
        Ok(versions)
    }

    pub fn version(&self, id: &str) -> Result<Option<Version>> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        Ok(self.read_data()?.versions.into_iter().find(|v| v.id == id))
    }

    pub fn create_version(&self, input: CreateVersionInput) -> Result<Version> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let mut data = self.read_data()?;

        let id = format!("v{}", input.version);
        if data.versions.iter().any(|v| v.id == id) {
            bail!("Version {} already exists", id);
        }

        let version = Version {
            id,
            version: input.version,
            product: input.product,
            publish_date: Utc::now(),
            status: input.status.unwrap_or(VersionStatus::Draft),
            title: input.title,
            updates: input.updates,
        };

        data.versions.insert(0, version.clone());
        self.write_data(&data)?;
        Ok(version)
    }

    pub fn update_version(&self, id: &str, input: UpdateVersionInput) -> Result<Option<Version>> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let mut data = self.read_data()?;

        let Some(existing) = data.versions.iter_mut().find(|v| v.id == id) else {
            return Ok(None);
        };

        if let Some(version) = input.version {
            existing.version = version;
        }
        if let Some(product) = input.product {
            existing.product = product;
        }
        if let Some(title) = input.title {
            existing.title = title;
        }
        if let Some(status) = input.status {
            existing.status = status;
        }
        if let Some(updates) = input.updates {
            existing.updates = updates;
        }

        let updated = existing.clone();
        self.write_data(&data)?;
        Ok(Some(updated))
    }

    pub fn delete_version(&self, id: &str) -> Result<bool> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let mut data = self.read_data()?;
        let before = data.versions.len();
        data.versions.retain(|v| v.id != id);
        if data.versions.len() == before {
            return Ok(false);
        }
        self.write_data(&data)?;
        Ok(true)
    }

    /// The newest semantic version for a product and a suggested next
    /// version (patch + 1). Products with no versions yet suggest `1.0.0`.
    pub fn latest_version(&self, product: &str) -> Result<LatestVersion> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let data = self.read_data()?;

        let latest = data
            .versions
            .iter()
            .filter(|v| v.product == product)
            .max_by_key(|v| semver_parts(&v.version));

        Ok(match latest {
            Some(v) => {
                let [major, minor, patch] = semver_parts(&v.version);
                LatestVersion {
                    latest_version: Some(v.version.clone()),
                    suggested_version: format!("{}.{}.{}", major, minor, patch + 1),
                }
            }
            None => LatestVersion {
                latest_version: None,
                suggested_version: "1.0.0".to_string(),
            },
        })
    }

    // ============================================================
    // Configuration
    // ============================================================

    /// Site configuration, falling back to defaults when the file is
    /// missing. A malformed file is an error rather than silently reset.
    pub fn config(&self) -> Result<AppConfig> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let path = self.config_path();
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let content =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let path = self.config_path();
        fs::write(&path, serde_json::to_string_pretty(config)?)
            .with_context(|| format!("writing {}", path.display()))
    }

    // ============================================================
    // Backups
    // ============================================================

    /// Snapshot `changelog.json` into the backups directory. Returns the
    /// backup file path.
    pub fn backup(&self) -> Result<PathBuf> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let backups_dir = self.data_dir.join("backups");
        fs::create_dir_all(&backups_dir)?;

        let timestamp = Utc::now()
            .to_rfc3339()
            .replace([':', '.'], "-");
        let backup_path = backups_dir.join(format!("backup-{}.json", timestamp));
        fs::copy(self.changelog_path(), &backup_path)
            .with_context(|| format!("writing {}", backup_path.display()))?;
        Ok(backup_path)
    }

    // ============================================================
    // Uploads
    // ============================================================

    /// Store an uploaded file under a `<millis>-<random>.<ext>` name and
    /// return its public entry.
    pub fn save_upload(&self, original_name: &str, bytes: &[u8]) -> Result<UploadEntry> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let timestamp = Utc::now().timestamp_millis();
        let random = Uuid::new_v4().simple().to_string();
        let filename = match ext {
            Some(ext) => format!("{}-{}.{}", timestamp, &random[..6], ext),
            None => format!("{}-{}", timestamp, &random[..6]),
        };

        let path = self.uploads_dir().join(&filename);
        fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;

        Ok(UploadEntry {
            url: format!("/uploads/{}", filename),
            filename,
            timestamp,
        })
    }

    /// Image files in the uploads directory, newest first by the timestamp
    /// prefix in their names.
    pub fn list_uploads(&self) -> Result<Vec<UploadEntry>> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let uploads_dir = self.uploads_dir();
        if !uploads_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&uploads_dir)? {
            let entry = entry?;
            let filename = entry.file_name().to_string_lossy().into_owned();

            let is_image = Path::new(&filename)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                .unwrap_or(false);
            if !is_image {
                continue;
            }

            let timestamp = filename
                .split('-')
                .next()
                .and_then(|s| s.parse::<i64>().ok())
                .unwrap_or(0);

            entries.push(UploadEntry {
                url: format!("/uploads/{}", filename),
                filename,
                timestamp,
            });
        }

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }
}

/// Numeric `[major, minor, patch]` for ordering. Missing or non-numeric
/// components count as zero.
fn semver_parts(version: &str) -> [u64; 3] {
    let mut parts = [0u64; 3];
    for (i, piece) in version.split('.').take(3).enumerate() {
        parts[i] = piece.parse().unwrap_or(0);
    }
    parts
}
