use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown formula '{formula}' on field '{field_id}'")]
    UnknownFormula { field_id: String, formula: String },

    #[error("calculated field '{field_id}' has no formula")]
    MissingFormula { field_id: String },

    #[error("duplicate field id '{field_id}' in template '{template_id}'")]
    DuplicateField {
        template_id: String,
        field_id: String,
    },

    #[error("template '{0}' is already registered")]
    AlreadyRegistered(String),
}
