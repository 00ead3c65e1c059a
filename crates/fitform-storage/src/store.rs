use std::future::Future;
use std::pin::Pin;

use uuid::Uuid;

use fitform_core::models::{Assessment, AssessmentKey, AssessmentStatus, FormState};

use crate::error::StorageError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One write, draft or final. Saves upsert: the first save for a key
/// creates the record, every later save updates it in place.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub key: AssessmentKey,
    pub data: FormState,
    pub status: AssessmentStatus,
}

/// The persistence collaborator consumed by the session controller.
///
/// Methods return boxed futures for dyn compatibility.
pub trait AssessmentStore: Send + Sync {
    /// Fetch the unique record for a composite key, if one exists.
    fn load<'a>(
        &'a self,
        key: &'a AssessmentKey,
    ) -> BoxFuture<'a, Result<Option<Assessment>, StorageError>>;

    /// Upsert by the request's composite key and return the stored record.
    fn save<'a>(
        &'a self,
        request: SaveRequest,
    ) -> BoxFuture<'a, Result<Assessment, StorageError>>;

    /// Remove a record by id, re-verifying that `trainer_id` owns it.
    /// `NotFound` and `Forbidden` are distinct failures.
    fn delete<'a>(
        &'a self,
        id: Uuid,
        trainer_id: &'a str,
    ) -> BoxFuture<'a, Result<(), StorageError>>;

    /// All of a trainer's assessments, most recently updated first.
    fn list<'a>(
        &'a self,
        trainer_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Assessment>, StorageError>>;
}
