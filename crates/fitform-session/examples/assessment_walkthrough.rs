//! Smoke test for the assessment session flow.
//!
//! Walks a PAR-Q+ screening end to end against a throwaway file store:
//! answer fields, watch calculated fields and conditional sections react,
//! let the autosave timer fire, complete the assessment, then reload it to
//! prove the draft round-tripped.
//!
//! Usage:
//!   cargo run -p fitform-session --example assessment_walkthrough

use std::sync::Arc;
use std::time::Duration;

use fitform_core::models::AssessmentKey;
use fitform_session::{SessionConfig, SessionManager};
use fitform_storage::{AssessmentStore, FileStore};
use fitform_templates::TemplateRegistry;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt().with_env_filter("info").init();

    let data_dir = tempfile::tempdir()?;
    let store: Arc<dyn AssessmentStore> = Arc::new(FileStore::new(data_dir.path()));

    let config = SessionConfig {
        autosave_interval: Duration::from_secs(1),
        ..SessionConfig::default()
    };

    let mut manager = SessionManager::new(
        Arc::clone(&store),
        TemplateRegistry::with_builtins(),
        config,
    );

    let key = AssessmentKey::new("trainer-demo", "client-demo", "par_q_plus");

    println!("╔══════════════════════════════════════════════════╗");
    println!("║      FitForm Assessment Session — Smoke Test     ║");
    println!("╠══════════════════════════════════════════════════╣");
    println!("║  Template:   {:<36} ║", key.template_id);
    println!("║  Data dir:   {:<36} ║", data_dir.path().display().to_string());
    println!("╚══════════════════════════════════════════════════╝");
    println!();

    let session = manager.open(key.clone()).await?;

    println!("Answering the participant profile...");
    session.set_field("assessment_date", "2026-08-06").await;
    session.set_field("age", 40.0).await;
    println!(
        "  age = 40  →  estimated_max_hr = {:?}",
        session.value("estimated_max_hr").await
    );
    println!("  completion: {}%", session.completion().await);
    println!();

    println!("Answering the screening questions (one YES)...");
    for question in [
        "heart_condition",
        "dizziness",
        "chronic_condition",
        "medications",
        "joint_problem",
        "doctor_restriction",
    ] {
        session.set_field(question, "No").await;
    }
    session.set_field("chest_pain", "Yes").await;

    let visible = session.visible_section_ids().await;
    println!("  visible sections: {visible:?}");
    println!("  completion: {}%", session.completion().await);
    println!();

    println!("Filling the revealed follow-up...");
    session
        .set_field("condition_details", "Occasional chest tightness on stairs; GP aware.")
        .await;
    session.set_field("physician_clearance", "Yes").await;
    session.set_field("clearance_date", "2026-07-20").await;
    session.set_field("declaration_consent", true).await;
    println!("  completion: {}%", session.completion().await);
    println!();

    println!("Waiting for the autosave timer...");
    tokio::time::sleep(Duration::from_millis(1500)).await;
    println!("  save status: {:?}", session.save_status());

    println!("Completing the assessment...");
    let completed = session.complete().await?;
    println!("  record {} is now {:?}", completed.id, completed.status);
    println!();

    println!("Reloading the same (trainer, client, template)...");
    manager.close();
    let restored = manager.open(key).await?;
    println!(
        "  age = {:?}, estimated_max_hr = {:?}",
        restored.value("age").await,
        restored.value("estimated_max_hr").await
    );
    println!(
        "  follow-up still visible: {}",
        restored
            .visible_section_ids()
            .await
            .contains(&"follow_up".to_string())
    );
    println!("  already complete: {}", restored.is_completed());
    println!();

    let dashboard = store.list("trainer-demo").await?;
    println!("Dashboard: {} assessment(s) on file", dashboard.len());
    for record in dashboard {
        println!(
            "  {} / {} — {:?}, updated {}",
            record.client_id, record.template_id, record.status, record.updated_at
        );
    }

    println!();
    println!("✅ Walkthrough finished.");
    Ok(())
}
