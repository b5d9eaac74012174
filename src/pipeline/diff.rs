// src/pipeline/diff.rs

//! Novelty diff against the seen-set.

use crate::models::{Lecture, NewLecture, Source};
use crate::storage::SeenStore;

/// Diff extracted lectures against the seen-set for one source.
///
/// Every lecture whose URL is absent from the source's sub-map is
/// returned once and recorded in memory immediately, so a duplicate URL
/// later in the same page yields nothing. Recording happens regardless
/// of the eventual notification outcome; only `save()` is gated on it.
pub fn novel_lectures(
    store: &mut SeenStore,
    source: &Source,
    extracted: &[Lecture],
) -> Vec<NewLecture> {
    let mut new_lectures = Vec::new();

    for lecture in extracted {
        if store.contains(&source.key, &lecture.url) {
            continue;
        }
        new_lectures.push(NewLecture {
            source_name: source.name.clone(),
            lecture_name: lecture.name.clone(),
            url: lecture.url.clone(),
        });
        store.record(&source.key, lecture.clone());
    }

    new_lectures
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn source() -> Source {
        Source {
            name: "Complexity".to_string(),
            url: "http://www.arazim-project.com/node/369".to_string(),
            key: "complexity".to_string(),
        }
    }

    fn lecture(name: &str, url: &str) -> Lecture {
        Lecture {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    async fn empty_store(tmp: &TempDir) -> SeenStore {
        SeenStore::load(tmp.path().join("saved_lectures.json"), &[source()])
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_unseen_lecture_is_novel() {
        let tmp = TempDir::new().unwrap();
        let mut store = empty_store(&tmp).await;

        let extracted = vec![lecture("Lecture 1", "/files/l1.pdf")];
        let new = novel_lectures(&mut store, &source(), &extracted);

        assert_eq!(
            new,
            vec![NewLecture {
                source_name: "Complexity".to_string(),
                lecture_name: "Lecture 1".to_string(),
                url: "/files/l1.pdf".to_string(),
            }]
        );
        assert!(store.contains("complexity", "/files/l1.pdf"));
    }

    #[tokio::test]
    async fn test_duplicate_url_within_page_reported_once() {
        let tmp = TempDir::new().unwrap();
        let mut store = empty_store(&tmp).await;

        let extracted = vec![
            lecture("Lecture 1", "/files/l1.pdf"),
            lecture("Lecture 1 (mirror)", "/files/l1.pdf"),
        ];
        let new = novel_lectures(&mut store, &source(), &extracted);

        assert_eq!(new.len(), 1);
        assert_eq!(new[0].lecture_name, "Lecture 1");
    }

    #[tokio::test]
    async fn test_seen_lecture_is_not_novel() {
        let tmp = TempDir::new().unwrap();
        let mut store = empty_store(&tmp).await;
        store.record("complexity", lecture("Lecture 1", "/files/l1.pdf"));

        let extracted = vec![lecture("Lecture 1", "/files/l1.pdf")];
        let new = novel_lectures(&mut store, &source(), &extracted);

        assert!(new.is_empty());
    }

    #[tokio::test]
    async fn test_second_pass_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let mut store = empty_store(&tmp).await;

        let extracted = vec![
            lecture("Lecture 1", "/files/l1.pdf"),
            lecture("Lecture 2", "/files/l2.pdf"),
        ];
        let first = novel_lectures(&mut store, &source(), &extracted);
        let second = novel_lectures(&mut store, &source(), &extracted);

        assert_eq!(first.len(), 2);
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn test_empty_extraction_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut store = empty_store(&tmp).await;

        let new = novel_lectures(&mut store, &source(), &[]);
        assert!(new.is_empty());
    }
}
