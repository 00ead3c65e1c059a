//! fitform-templates
//!
//! Declarative assessment template definitions: the JSON wire schema for
//! sections, conditional visibility, fields, and computed formulas, plus
//! the registry of loaded templates. Adding a new assessment type is a data
//! change — only a new named formula requires code.

pub mod error;
pub mod formula;
pub mod registry;
pub mod schema;

pub use error::TemplateError;
pub use formula::Formula;
pub use registry::{TemplateRegistry, builtin_templates, get_template};
pub use schema::{Conditional, Field, FieldConditional, FieldType, Section, Subsection, Template};
