//! In-memory assessment store.
//!
//! Backs tests and examples. `set_failing` makes every save return an
//! `Unavailable` error so controller retry behavior can be exercised
//! without a real broken backend.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use uuid::Uuid;

use fitform_core::models::{Assessment, AssessmentKey};

use crate::error::StorageError;
use crate::store::{AssessmentStore, BoxFuture, SaveRequest};

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<AssessmentKey, Assessment>>,
    failing: AtomicBool,
    save_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle injected save failures.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of save attempts that reached the store (including failed ones).
    pub fn save_attempts(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<AssessmentKey, Assessment>> {
        // A poisoned lock means a panicking test thread; the map itself is
        // always left consistent.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AssessmentStore for MemoryStore {
    fn load<'a>(
        &'a self,
        key: &'a AssessmentKey,
    ) -> BoxFuture<'a, Result<Option<Assessment>, StorageError>> {
        Box::pin(async move { Ok(self.lock().get(key).cloned()) })
    }

    fn save<'a>(
        &'a self,
        request: SaveRequest,
    ) -> BoxFuture<'a, Result<Assessment, StorageError>> {
        Box::pin(async move {
            self.save_count.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(StorageError::Unavailable("injected failure".to_string()));
            }

            let now = jiff::Timestamp::now();
            let mut records = self.lock();
            let (id, created_at) = records
                .get(&request.key)
                .map(|a| (a.id, a.created_at))
                .unwrap_or_else(|| (Uuid::new_v4(), now));

            let assessment = Assessment {
                id,
                trainer_id: request.key.trainer_id.clone(),
                client_id: request.key.client_id.clone(),
                template_id: request.key.template_id.clone(),
                data: request.data,
                status: request.status,
                created_at,
                updated_at: now,
            };
            records.insert(request.key, assessment.clone());
            Ok(assessment)
        })
    }

    fn delete<'a>(
        &'a self,
        id: Uuid,
        trainer_id: &'a str,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let mut records = self.lock();
            let key = records
                .values()
                .find(|a| a.id == id)
                .map(Assessment::key)
                .ok_or(StorageError::NotFound { id })?;

            if key.trainer_id != trainer_id {
                return Err(StorageError::Forbidden {
                    id,
                    trainer_id: trainer_id.to_string(),
                });
            }
            records.remove(&key);
            Ok(())
        })
    }

    fn list<'a>(
        &'a self,
        trainer_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Assessment>, StorageError>> {
        Box::pin(async move {
            let mut records: Vec<_> = self
                .lock()
                .values()
                .filter(|a| a.trainer_id == trainer_id)
                .cloned()
                .collect();
            records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            Ok(records)
        })
    }
}
