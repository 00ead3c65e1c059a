use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::value::FormState;

/// The persisted unit: one trainer's in-progress or finalized assessment of
/// one client against one template. At most one record exists per
/// `(trainer_id, client_id, template_id)` triple; saves upsert against that
/// composite key.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Assessment {
    pub id: Uuid,
    pub trainer_id: String,
    pub client_id: String,
    pub template_id: String,
    pub data: FormState,
    pub status: AssessmentStatus,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Assessment {
    pub fn key(&self) -> AssessmentKey {
        AssessmentKey {
            trainer_id: self.trainer_id.clone(),
            client_id: self.client_id.clone(),
            template_id: self.template_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AssessmentStatus {
    /// Autosaved work-in-progress.
    Draft,
    /// Finalized by explicit trainer action.
    Complete,
}

/// The composite upsert key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentKey {
    pub trainer_id: String,
    pub client_id: String,
    pub template_id: String,
}

impl AssessmentKey {
    pub fn new(
        trainer_id: impl Into<String>,
        client_id: impl Into<String>,
        template_id: impl Into<String>,
    ) -> Self {
        Self {
            trainer_id: trainer_id.into(),
            client_id: client_id.into(),
            template_id: template_id.into(),
        }
    }
}

impl fmt::Display for AssessmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.trainer_id, self.client_id, self.template_id
        )
    }
}
