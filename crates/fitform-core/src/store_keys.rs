//! Storage key/path conventions.
//!
//! Pure string functions — no filesystem dependency. These define the
//! canonical layout of persisted records under a FitForm data root. One
//! path per (trainer, client, template) triple makes the upsert-uniqueness
//! invariant structural: two saves for the same triple land on the same key.

use crate::models::AssessmentKey;

pub const ASSESSMENTS_PREFIX: &str = "assessments/";

pub fn assessment(key: &AssessmentKey) -> String {
    format!(
        "assessments/{}/{}/{}.json",
        encode(&key.trainer_id),
        encode(&key.client_id),
        encode(&key.template_id),
    )
}

pub fn trainer_prefix(trainer_id: &str) -> String {
    format!("assessments/{}/", encode(trainer_id))
}

/// Identifiers come from the auth layer and are normally UUID-shaped, but
/// a path component must never contain separators or relative segments.
fn encode(id: &str) -> String {
    id.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect()
}
