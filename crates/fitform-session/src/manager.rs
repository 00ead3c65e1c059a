//! Active-session bookkeeping.
//!
//! At most one assessment session is live at a time. Opening a new subject
//! drops the previous session first, which aborts its autosave task before
//! the new subject's state exists — a stale timer can never write across
//! subjects.

use std::sync::Arc;

use fitform_core::models::AssessmentKey;
use fitform_storage::AssessmentStore;
use fitform_templates::TemplateRegistry;

use crate::config::SessionConfig;
use crate::controller::AssessmentSession;
use crate::error::SessionError;

pub struct SessionManager {
    store: Arc<dyn AssessmentStore>,
    registry: TemplateRegistry,
    config: SessionConfig,
    active: Option<AssessmentSession>,
}

impl SessionManager {
    pub fn new(
        store: Arc<dyn AssessmentStore>,
        registry: TemplateRegistry,
        config: SessionConfig,
    ) -> Self {
        Self {
            store,
            registry,
            config,
            active: None,
        }
    }

    /// Switch to (or start) the session for `key`, discarding any previous
    /// subject's session and timer.
    pub async fn open(&mut self, key: AssessmentKey) -> Result<&AssessmentSession, SessionError> {
        self.active = None;

        let template = self
            .registry
            .get(&key.template_id)
            .ok_or_else(|| SessionError::UnknownTemplate(key.template_id.clone()))?;

        tracing::info!(key = %key, "opening assessment session");
        let session = AssessmentSession::open(
            Arc::clone(&self.store),
            template,
            key,
            self.config.clone(),
        )
        .await?;

        Ok(self.active.insert(session))
    }

    pub fn active(&self) -> Option<&AssessmentSession> {
        self.active.as_ref()
    }

    pub fn close(&mut self) {
        if let Some(session) = self.active.take() {
            tracing::debug!(key = %session.key(), "session closed");
        }
    }
}
