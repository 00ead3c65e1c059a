//! fitform-storage
//!
//! The persistence collaborator: saved assessments as pretty JSON records,
//! upserted by their (trainer, client, template) composite key. The file
//! store is the production backend; the memory store backs tests and can
//! inject failures.

pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{AssessmentStore, BoxFuture, SaveRequest};
