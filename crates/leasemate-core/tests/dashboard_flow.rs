//! End-to-end flow through the application context: log in, upload a
//! document, check the derived reminders and dashboard stats, then ask the
//! agent a question.

use std::sync::Arc;

use async_trait::async_trait;
use leasemate_core::domain::models::AgentService;
use leasemate_core::domain::models::Author;
use leasemate_core::domain::models::DocumentService;
use leasemate_core::domain::models::FilePayload;
use leasemate_core::domain::models::HealthReport;
use leasemate_core::domain::models::ReminderKind;
use leasemate_core::domain::models::StructuredInfo;
use leasemate_core::domain::models::UploadResponse;
use leasemate_core::infrastructure::storage::MemoryStore;
use leasemate_core::infrastructure::NoDelayScheduler;
use leasemate_core::AppContext;
use leasemate_core::AppContextProps;
use leasemate_core::Config;
use leasemate_core::CoreError;

struct FakeBackend;

#[async_trait]
impl DocumentService for FakeBackend {
    async fn upload(&self, user_id: &str, file: &FilePayload) -> Result<UploadResponse, CoreError> {
        assert_eq!(user_id, "abc123");
        assert_eq!(file.mime_type, "application/pdf");
        return Ok(UploadResponse {
            summary: "A twelve-month lease for 12 Main St.".to_string(),
            structured_info: StructuredInfo {
                due_date: Some("1".to_string()),
                rent_amount: Some("$1200".to_string()),
                ..StructuredInfo::default()
            },
            ..UploadResponse::default()
        });
    }

    async fn health_check(&self) -> Result<HealthReport, CoreError> {
        return Ok(HealthReport::default());
    }
}

#[async_trait]
impl AgentService for FakeBackend {
    async fn query(&self, user_id: &str, text: &str) -> Result<String, CoreError> {
        assert_eq!(user_id, "abc123");
        assert_eq!(text, "when is rent due?");
        return Ok("Rent is due on day 1 of each month.".to_string());
    }

    async fn health_check(&self) -> Result<HealthReport, CoreError> {
        return Ok(HealthReport::default());
    }
}

fn context() -> AppContext {
    let backend = Arc::new(FakeBackend);
    let (context, _event_rx) = AppContext::new(AppContextProps {
        config: Config::default(),
        documents: backend.clone(),
        agent: backend,
        storage: Arc::new(MemoryStore::default()),
        scheduler: Arc::new(NoDelayScheduler),
    });
    return context;
}

#[tokio::test]
async fn test_full_dashboard_scenario() {
    let context = context();

    context.session.set_user("abc123").await.unwrap();

    let file = FilePayload {
        filename: "lease.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        bytes: vec![0; 2 * 1024 * 1024],
    };
    context.upload.submit(file).await.unwrap();

    let state = context.snapshot().await;
    assert_eq!(state.agreements.len(), 1);
    assert_eq!(state.agreements[0].filename, "lease.pdf");
    assert_eq!(state.agreements[0].rent_display, "$1,200.00");

    let titles = state
        .reminders
        .iter()
        .map(|r| r.title.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(titles, vec!["Rent Due Date", "Monthly Rent Amount"]);
    assert_eq!(state.reminders[0].kind, ReminderKind::Rent);
    assert_eq!(state.reminders[1].kind, ReminderKind::Amount);

    assert_eq!(state.stats.total, 1);
    assert_eq!(state.stats.active, 1);
    assert_eq!(state.stats.expiring_soon, 0);
    assert_eq!(state.stats.alerts, 2);

    context.chat.submit("when is rent due?").await.unwrap();
    let state = context.snapshot().await;
    assert_eq!(state.chat.messages.len(), 2);
    assert_eq!(state.chat.messages[0].author, Author::User);
    assert_eq!(state.chat.messages[1].author, Author::Agent);
    assert_eq!(
        state.chat.messages[1].text,
        "Rent is due on day 1 of each month."
    );

    context.shutdown().await;
}

#[tokio::test]
async fn test_change_user_resets_dashboard_but_not_chat() {
    let context = context();
    context.session.set_user("abc123").await.unwrap();

    let file = FilePayload {
        filename: "lease.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        bytes: vec![0; 1024],
    };
    context.upload.submit(file).await.unwrap();
    context.chat.submit("when is rent due?").await.unwrap();

    context.session.change_user().await.unwrap();

    let state = context.snapshot().await;
    assert!(!state.session.logged_in());
    assert!(state.agreements.is_empty());
    assert!(state.reminders.is_empty());
    assert_eq!(state.stats.total, 0);
    assert_eq!(state.stats.alerts, 0);
    // The transcript survives a user switch.
    assert_eq!(state.chat.messages.len(), 2);

    context.shutdown().await;
}
