use std::sync::Arc;

use tempfile::TempDir;
use uuid::Uuid;

use fitform_core::models::{AssessmentKey, AssessmentStatus, FormState};
use fitform_storage::{AssessmentStore, FileStore, SaveRequest, StorageError};

fn store() -> (TempDir, FileStore) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path());
    (dir, store)
}

fn key(trainer: &str, client: &str) -> AssessmentKey {
    AssessmentKey::new(trainer, client, "par_q_plus")
}

fn draft(key: &AssessmentKey, pairs: &[(&str, &str)]) -> SaveRequest {
    let mut data = FormState::new();
    for (id, value) in pairs {
        data.set(*id, *value);
    }
    SaveRequest {
        key: key.clone(),
        data,
        status: AssessmentStatus::Draft,
    }
}

#[tokio::test]
async fn load_of_an_unsaved_key_is_none() {
    let (_dir, store) = store();
    assert!(store.load(&key("t1", "c1")).await.unwrap().is_none());
}

#[tokio::test]
async fn save_then_load_round_trips_the_data_blob() {
    let (_dir, store) = store();
    let key = key("t1", "c1");

    let saved = store
        .save(draft(&key, &[("age", "40"), ("chest_pain", "Yes")]))
        .await
        .unwrap();
    assert_eq!(saved.status, AssessmentStatus::Draft);

    let loaded = store.load(&key).await.unwrap().unwrap();
    assert_eq!(loaded.id, saved.id);
    assert_eq!(loaded.data, saved.data);
    assert_eq!(loaded.data.text("chest_pain"), Some("Yes"));
}

#[tokio::test]
async fn resaving_an_unchanged_blob_is_idempotent() {
    let (_dir, store) = store();
    let key = key("t1", "c1");

    store
        .save(draft(&key, &[("age", "40")]))
        .await
        .unwrap();

    // Load and immediately re-save without edits: same identity, same data.
    let loaded = store.load(&key).await.unwrap().unwrap();
    let resaved = store
        .save(SaveRequest {
            key: key.clone(),
            data: loaded.data.clone(),
            status: loaded.status,
        })
        .await
        .unwrap();

    assert_eq!(resaved.id, loaded.id);
    assert_eq!(resaved.data, loaded.data);
    assert_eq!(resaved.created_at, loaded.created_at);
}

#[tokio::test]
async fn saving_twice_updates_one_record() {
    let (_dir, store) = store();
    let key = key("t1", "c1");

    let first = store.save(draft(&key, &[("age", "40")])).await.unwrap();
    let second = store
        .save(draft(&key, &[("age", "41"), ("dizziness", "No")]))
        .await
        .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);

    let listed = store.list("t1").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].data.text("age"), Some("41"));
}

#[tokio::test]
async fn complete_commit_overwrites_the_draft_status() {
    let (_dir, store) = store();
    let key = key("t1", "c1");

    store.save(draft(&key, &[("age", "40")])).await.unwrap();
    let completed = store
        .save(SaveRequest {
            key: key.clone(),
            data: store.load(&key).await.unwrap().unwrap().data,
            status: AssessmentStatus::Complete,
        })
        .await
        .unwrap();

    assert_eq!(completed.status, AssessmentStatus::Complete);
    let loaded = store.load(&key).await.unwrap().unwrap();
    assert_eq!(loaded.status, AssessmentStatus::Complete);
}

#[tokio::test]
async fn list_is_ordered_most_recently_updated_first() {
    let (_dir, store) = store();

    store
        .save(draft(&key("t1", "c1"), &[("age", "30")]))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    store
        .save(draft(&key("t1", "c2"), &[("age", "50")]))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    store
        .save(draft(&key("t1", "c1"), &[("age", "31")]))
        .await
        .unwrap();

    let listed = store.list("t1").await.unwrap();
    let clients: Vec<_> = listed.iter().map(|a| a.client_id.as_str()).collect();
    assert_eq!(clients, ["c1", "c2"]);
}

#[tokio::test]
async fn list_never_shows_another_trainers_records() {
    let (_dir, store) = store();

    store
        .save(draft(&key("t1", "c1"), &[("age", "30")]))
        .await
        .unwrap();
    store
        .save(draft(&key("t2", "c1"), &[("age", "60")]))
        .await
        .unwrap();

    let listed = store.list("t1").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].trainer_id, "t1");
}

#[tokio::test]
async fn delete_requires_ownership() {
    let (_dir, store) = store();
    let saved = store
        .save(draft(&key("t1", "c1"), &[("age", "30")]))
        .await
        .unwrap();

    match store.delete(saved.id, "t2").await {
        Err(StorageError::Forbidden { id, trainer_id }) => {
            assert_eq!(id, saved.id);
            assert_eq!(trainer_id, "t2");
        }
        other => panic!("expected Forbidden, got {other:?}"),
    }

    // The record survived the unauthorized attempt.
    assert!(store.load(&key("t1", "c1")).await.unwrap().is_some());

    store.delete(saved.id, "t1").await.unwrap();
    assert!(store.load(&key("t1", "c1")).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_of_a_missing_record_is_not_found() {
    let (_dir, store) = store();
    assert!(matches!(
        store.delete(Uuid::new_v4(), "t1").await,
        Err(StorageError::NotFound { .. })
    ));
}

#[tokio::test]
async fn saves_leave_no_temp_files_behind() {
    let (dir, store) = store();
    store
        .save(draft(&key("t1", "c1"), &[("age", "30")]))
        .await
        .unwrap();

    let mut tmp_files = Vec::new();
    let mut stack = vec![dir.path().to_path_buf()];
    while let Some(d) = stack.pop() {
        for entry in std::fs::read_dir(&d).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().is_some_and(|e| e == "tmp") {
                tmp_files.push(path);
            }
        }
    }
    assert!(tmp_files.is_empty());
}

#[tokio::test]
async fn store_is_object_safe_behind_arc_dyn() {
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn AssessmentStore> = Arc::new(FileStore::new(dir.path()));
    let key = key("t1", "c1");
    store.save(draft(&key, &[("age", "25")])).await.unwrap();
    assert!(store.load(&key).await.unwrap().is_some());
}
