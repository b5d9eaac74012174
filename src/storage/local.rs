// src/storage/local.rs

//! Local filesystem seen-set store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{Lecture, Source};
use crate::utils::log;

/// Seen-set document: source key → lecture URL → lecture.
pub type SeenMap = BTreeMap<String, BTreeMap<String, Lecture>>;

/// Persisted record of previously discovered lectures.
pub struct SeenStore {
    path: PathBuf,
    lectures: SeenMap,
}

impl SeenStore {
    /// Load the seen-set from `path`.
    ///
    /// An absent file is treated as "no prior history": a warning is
    /// logged and every configured source starts with an empty sub-map.
    /// A present but malformed file is a fatal error. Silent reset would
    /// re-notify the full history, so corruption is left for a human.
    pub async fn load(path: impl Into<PathBuf>, sources: &[Source]) -> Result<Self> {
        let path = path.into();

        let mut lectures: SeenMap = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn(&format!("{} not found, starting fresh", path.display()));
                SeenMap::new()
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        // Sources added to the config since the last run start empty.
        for source in sources {
            lectures.entry(source.key.clone()).or_default();
        }

        Ok(Self { path, lectures })
    }

    /// Membership test for a lecture URL under a source key.
    pub fn contains(&self, source_key: &str, url: &str) -> bool {
        self.lectures
            .get(source_key)
            .is_some_and(|m| m.contains_key(url))
    }

    /// Insert or overwrite a lecture in memory. Does not persist.
    pub fn record(&mut self, source_key: &str, lecture: Lecture) {
        self.lectures
            .entry(source_key.to_string())
            .or_default()
            .insert(lecture.url.clone(), lecture);
    }

    /// Serialize the whole in-memory seen-set to disk, atomically
    /// (write to temp, then rename). Overwrites any prior content.
    pub async fn save(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.lectures)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of recorded lectures for one source key.
    pub fn source_count(&self, source_key: &str) -> usize {
        self.lectures.get(source_key).map_or(0, |m| m.len())
    }

    /// Total number of recorded lectures across all sources.
    pub fn total_count(&self) -> usize {
        self.lectures.values().map(|m| m.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sources() -> Vec<Source> {
        vec![
            Source {
                name: "Numerical Analysis".to_string(),
                url: "http://www.arazim-project.com/node/386".to_string(),
                key: "numerical_analysis".to_string(),
            },
            Source {
                name: "Complexity".to_string(),
                url: "http://www.arazim-project.com/node/369".to_string(),
                key: "complexity".to_string(),
            },
        ]
    }

    fn lecture(name: &str, url: &str) -> Lecture {
        Lecture {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_initializes_all_sources() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("saved_lectures.json");

        let store = SeenStore::load(&path, &sources()).await.unwrap();

        assert_eq!(store.source_count("numerical_analysis"), 0);
        assert_eq!(store.source_count("complexity"), 0);
        assert_eq!(store.total_count(), 0);
    }

    #[tokio::test]
    async fn test_record_and_contains() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("saved_lectures.json");

        let mut store = SeenStore::load(&path, &sources()).await.unwrap();
        assert!(!store.contains("complexity", "/files/l1.pdf"));

        store.record("complexity", lecture("Lecture 1", "/files/l1.pdf"));
        assert!(store.contains("complexity", "/files/l1.pdf"));
        assert!(!store.contains("numerical_analysis", "/files/l1.pdf"));
    }

    #[tokio::test]
    async fn test_save_and_reload_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("saved_lectures.json");

        let mut store = SeenStore::load(&path, &sources()).await.unwrap();
        store.record("complexity", lecture("Lecture 1", "/files/l1.pdf"));
        store.save().await.unwrap();

        let reloaded = SeenStore::load(&path, &sources()).await.unwrap();
        assert!(reloaded.contains("complexity", "/files/l1.pdf"));
        assert_eq!(reloaded.total_count(), 1);
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("saved_lectures.json");

        let mut store = SeenStore::load(&path, &sources()).await.unwrap();
        store.record("complexity", lecture("Lecture 1", "/files/l1.pdf"));
        store.save().await.unwrap();

        let mut store = SeenStore::load(&path, &sources()).await.unwrap();
        store.record("complexity", lecture("Lecture 2", "/files/l2.pdf"));
        store.save().await.unwrap();

        let reloaded = SeenStore::load(&path, &sources()).await.unwrap();
        assert_eq!(reloaded.source_count("complexity"), 2);
    }

    #[tokio::test]
    async fn test_malformed_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("saved_lectures.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let result = SeenStore::load(&path, &sources()).await;
        assert!(matches!(result, Err(AppError::Json(_))));
    }

    #[tokio::test]
    async fn test_new_source_key_added_on_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("saved_lectures.json");
        tokio::fs::write(&path, br#"{"complexity": {}}"#)
            .await
            .unwrap();

        let store = SeenStore::load(&path, &sources()).await.unwrap();
        assert_eq!(store.source_count("numerical_analysis"), 0);
        assert!(!store.contains("numerical_analysis", "/x"));
    }
}
