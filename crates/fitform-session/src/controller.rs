//! One subject's assessment session.
//!
//! `AssessmentSession` scopes everything — form state, autosave timer, save
//! status — to a single (trainer, client, template) triple. It is created
//! by loading whatever record already exists for that triple and is
//! discarded wholesale on subject switch; nothing is shared between
//! subjects.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use uuid::Uuid;

use fitform_core::models::{Assessment, AssessmentKey, AssessmentStatus, FieldValue, FormState};
use fitform_engine::FormSession;
use fitform_storage::{AssessmentStore, SaveRequest};
use fitform_templates::Template;

use crate::audit::AuditEvent;
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::status::SaveStatus;

pub struct AssessmentSession {
    key: AssessmentKey,
    store: Arc<dyn AssessmentStore>,
    form: Arc<Mutex<FormSession>>,
    status_tx: Arc<watch::Sender<SaveStatus>>,
    /// One outstanding write per subject. The autosave task try-locks and
    /// skips its tick; explicit commits wait their turn.
    save_gate: Arc<Mutex<()>>,
    completed: Arc<AtomicBool>,
    config: SessionConfig,
    autosave: JoinHandle<()>,
}

impl AssessmentSession {
    /// Load the unique record for `key` (if any), hydrate the form from its
    /// `data` blob, and start the autosave timer.
    pub async fn open(
        store: Arc<dyn AssessmentStore>,
        template: Arc<Template>,
        key: AssessmentKey,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let (form, already_complete) = match store.load(&key).await? {
            Some(record) => {
                tracing::debug!(key = %key, fields = record.data.len(), "restored saved assessment");
                let complete = record.status == AssessmentStatus::Complete;
                (FormSession::hydrate(template, record.data)?, complete)
            }
            None => (FormSession::new(template)?, false),
        };

        let form = Arc::new(Mutex::new(form));
        let status_tx = Arc::new(watch::Sender::new(SaveStatus::Idle));
        let save_gate = Arc::new(Mutex::new(()));
        let completed = Arc::new(AtomicBool::new(already_complete));

        let autosave = tokio::spawn(autosave_loop(AutosaveCtx {
            key: key.clone(),
            store: Arc::clone(&store),
            form: Arc::clone(&form),
            status_tx: Arc::clone(&status_tx),
            save_gate: Arc::clone(&save_gate),
            completed: Arc::clone(&completed),
            config: config.clone(),
        }));

        Ok(Self {
            key,
            store,
            form,
            status_tx,
            save_gate,
            completed,
            config,
            autosave,
        })
    }

    pub fn key(&self) -> &AssessmentKey {
        &self.key
    }

    /// Apply one field update. The engine finishes its full recomputation
    /// (calculated fields included) before the lock is released, so updates
    /// never interleave partially.
    pub async fn set_field(&self, field_id: impl Into<String>, value: impl Into<FieldValue>) {
        self.form.lock().await.set_field(field_id, value);
    }

    pub async fn value(&self, field_id: &str) -> Option<FieldValue> {
        self.form.lock().await.value(field_id).cloned()
    }

    pub async fn completion(&self) -> u8 {
        self.form.lock().await.completion()
    }

    pub async fn visible_section_ids(&self) -> Vec<String> {
        self.form
            .lock()
            .await
            .visible_sections()
            .iter()
            .map(|s| s.id.clone())
            .collect()
    }

    pub async fn snapshot(&self) -> FormState {
        self.form.lock().await.state().clone()
    }

    pub fn save_status(&self) -> SaveStatus {
        *self.status_tx.borrow()
    }

    /// A live feed of save-status transitions for UI feedback.
    pub fn subscribe_status(&self) -> watch::Receiver<SaveStatus> {
        self.status_tx.subscribe()
    }

    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }

    /// Explicit draft save. Reopens a previously-completed session for
    /// further autosaving.
    pub async fn save_draft(&self) -> Result<Assessment, SessionError> {
        let _gate = self.save_gate.lock().await;
        self.completed.store(false, Ordering::SeqCst);
        self.write(AssessmentStatus::Draft).await
    }

    /// Final commit. Waits out any in-flight draft save — the complete
    /// write always lands after it and is never clobbered in return,
    /// because autosave ticks skip while the gate is held and stop once
    /// the session is marked complete.
    pub async fn complete(&self) -> Result<Assessment, SessionError> {
        let _gate = self.save_gate.lock().await;
        let saved = self.write(AssessmentStatus::Complete).await?;
        self.completed.store(true, Ordering::SeqCst);
        AuditEvent::new(
            "complete",
            "assessment",
            saved.id.to_string(),
            self.key.trainer_id.as_str(),
        )
        .emit();
        Ok(saved)
    }

    async fn write(&self, status: AssessmentStatus) -> Result<Assessment, SessionError> {
        let data = self.form.lock().await.state().clone();
        self.status_tx.send_replace(SaveStatus::Saving);
        match self
            .store
            .save(SaveRequest {
                key: self.key.clone(),
                data,
                status,
            })
            .await
        {
            Ok(saved) => {
                mark_saved(&self.status_tx, self.config.saved_display);
                Ok(saved)
            }
            Err(e) => {
                // In-memory state is untouched; the caller (or the next
                // autosave tick) can retry.
                self.status_tx.send_replace(SaveStatus::Error);
                Err(e.into())
            }
        }
    }
}

impl Drop for AssessmentSession {
    fn drop(&mut self) {
        self.autosave.abort();
    }
}

/// Ownership-gated removal. Storage re-verifies the trainer; absence and
/// mismatch come back as distinct errors, never as silent success.
pub async fn delete_assessment(
    store: &dyn AssessmentStore,
    id: Uuid,
    trainer_id: &str,
) -> Result<(), SessionError> {
    store.delete(id, trainer_id).await?;
    AuditEvent::new("delete", "assessment", id.to_string(), trainer_id).emit();
    Ok(())
}

struct AutosaveCtx {
    key: AssessmentKey,
    store: Arc<dyn AssessmentStore>,
    form: Arc<Mutex<FormSession>>,
    status_tx: Arc<watch::Sender<SaveStatus>>,
    save_gate: Arc<Mutex<()>>,
    completed: Arc<AtomicBool>,
    config: SessionConfig,
}

async fn autosave_loop(ctx: AutosaveCtx) {
    let mut interval = tokio::time::interval(ctx.config.autosave_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick of a fresh interval resolves immediately; consume it
    // so the first write happens one full interval after open.
    interval.tick().await;

    let mut consecutive_errors: u32 = 0;
    let mut backoff_until: Option<Instant> = None;

    loop {
        interval.tick().await;

        if ctx.completed.load(Ordering::SeqCst) {
            continue;
        }
        if let Some(until) = backoff_until
            && Instant::now() < until
        {
            continue;
        }
        // A write is already in flight — skip this tick rather than queue a
        // second concurrent save for the same subject.
        let Ok(_gate) = ctx.save_gate.try_lock() else {
            continue;
        };

        let data = ctx.form.lock().await.state().clone();
        if data.is_empty() {
            continue;
        }

        ctx.status_tx.send_replace(SaveStatus::Saving);
        let request = SaveRequest {
            key: ctx.key.clone(),
            data,
            status: AssessmentStatus::Draft,
        };
        match ctx.store.save(request).await {
            Ok(_) => {
                consecutive_errors = 0;
                backoff_until = None;
                tracing::debug!(key = %ctx.key, "draft autosaved");
                mark_saved(&ctx.status_tx, ctx.config.saved_display);
            }
            Err(e) => {
                consecutive_errors += 1;
                backoff_until = Some(Instant::now() + backoff(&ctx.config, consecutive_errors));
                let status = if consecutive_errors >= ctx.config.stall_after {
                    SaveStatus::Stalled
                } else {
                    SaveStatus::Error
                };
                ctx.status_tx.send_replace(status);
                tracing::warn!(
                    key = %ctx.key,
                    error = %e,
                    consecutive = consecutive_errors,
                    "autosave failed; in-memory state kept, will retry"
                );
            }
        }
    }
}

fn backoff(config: &SessionConfig, consecutive_errors: u32) -> Duration {
    let exp = consecutive_errors.saturating_sub(1).min(10);
    let delay = config.backoff_base.saturating_mul(1u32 << exp);
    delay.min(config.backoff_cap)
}

/// Flip to `saved`, then decay to `idle` after the display delay unless
/// something else has taken over the status in the meantime.
fn mark_saved(status_tx: &Arc<watch::Sender<SaveStatus>>, display: Duration) {
    status_tx.send_replace(SaveStatus::Saved);
    let tx = Arc::clone(status_tx);
    tokio::spawn(async move {
        tokio::time::sleep(display).await;
        tx.send_if_modified(|status| {
            if *status == SaveStatus::Saved {
                *status = SaveStatus::Idle;
                true
            } else {
                false
            }
        });
    });
}
