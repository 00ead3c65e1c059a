//! File-backed assessment store.
//!
//! One pretty-printed JSON file per assessment under the data root, at the
//! canonical key path for its (trainer, client, template) triple — upsert
//! uniqueness is structural, not checked. Writes are atomic (tmp + rename)
//! so a crashed save never leaves a torn record.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use fitform_core::models::{Assessment, AssessmentKey};
use fitform_core::store_keys;

use crate::error::StorageError;
use crate::store::{AssessmentStore, BoxFuture, SaveRequest};

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: &AssessmentKey) -> PathBuf {
        self.root.join(store_keys::assessment(key))
    }

    fn read_record(path: &Path) -> Result<Option<Assessment>, StorageError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn write_record(path: &Path, assessment: &Assessment) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(assessment)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json.as_bytes())?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Every record under `dir`, recursively. Skips in-flight `.tmp` files.
    fn collect_records(dir: &Path, out: &mut Vec<Assessment>) -> Result<(), StorageError> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                Self::collect_records(&path, out)?;
            } else if path.extension().is_some_and(|ext| ext == "json")
                && let Some(assessment) = Self::read_record(&path)?
            {
                out.push(assessment);
            }
        }
        Ok(())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Assessment>, StorageError> {
        let mut records = Vec::new();
        Self::collect_records(&self.root.join(store_keys::ASSESSMENTS_PREFIX), &mut records)?;
        Ok(records.into_iter().find(|a| a.id == id))
    }
}

impl AssessmentStore for FileStore {
    fn load<'a>(
        &'a self,
        key: &'a AssessmentKey,
    ) -> BoxFuture<'a, Result<Option<Assessment>, StorageError>> {
        Box::pin(async move { Self::read_record(&self.record_path(key)) })
    }

    fn save<'a>(
        &'a self,
        request: SaveRequest,
    ) -> BoxFuture<'a, Result<Assessment, StorageError>> {
        Box::pin(async move {
            let path = self.record_path(&request.key);
            let now = jiff::Timestamp::now();

            // Upsert: keep the existing identity, replace the payload.
            let existing = Self::read_record(&path)?;
            let (id, created_at) = existing
                .map(|a| (a.id, a.created_at))
                .unwrap_or_else(|| (Uuid::new_v4(), now));

            let assessment = Assessment {
                id,
                trainer_id: request.key.trainer_id,
                client_id: request.key.client_id,
                template_id: request.key.template_id,
                data: request.data,
                status: request.status,
                created_at,
                updated_at: now,
            };

            Self::write_record(&path, &assessment)?;
            tracing::debug!(
                key = %assessment.key(),
                status = ?assessment.status,
                "assessment saved"
            );
            Ok(assessment)
        })
    }

    fn delete<'a>(
        &'a self,
        id: Uuid,
        trainer_id: &'a str,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let assessment = self
                .find_by_id(id)?
                .ok_or(StorageError::NotFound { id })?;

            if assessment.trainer_id != trainer_id {
                return Err(StorageError::Forbidden {
                    id,
                    trainer_id: trainer_id.to_string(),
                });
            }

            fs::remove_file(self.record_path(&assessment.key()))?;
            tracing::info!(key = %assessment.key(), "assessment deleted");
            Ok(())
        })
    }

    fn list<'a>(
        &'a self,
        trainer_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Assessment>, StorageError>> {
        Box::pin(async move {
            let mut records = Vec::new();
            Self::collect_records(&self.root.join(store_keys::trainer_prefix(trainer_id)), &mut records)?;
            records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            Ok(records)
        })
    }
}
