use thiserror::Error;

use fitform_storage::StorageError;
use fitform_templates::TemplateError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
