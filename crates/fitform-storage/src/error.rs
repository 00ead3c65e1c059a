use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("assessment not found: {id}")]
    NotFound { id: Uuid },

    /// The record exists but belongs to a different trainer. Distinct from
    /// `NotFound` so callers can report authorization failures honestly.
    #[error("assessment {id} is not owned by trainer {trainer_id}")]
    Forbidden { id: Uuid, trainer_id: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
