pub mod assessment;
pub mod value;

pub use assessment::{Assessment, AssessmentKey, AssessmentStatus};
pub use value::{FieldValue, FormState};
