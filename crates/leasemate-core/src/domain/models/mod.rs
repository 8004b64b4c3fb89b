mod agreement;
mod backend;
mod chat;
mod event;
mod reminder;
mod scheduler;
mod session;
mod stats;
mod storage;

pub use agreement::Agreement;
pub use agreement::AgreementStatus;
pub use agreement::NOT_AVAILABLE;
pub use agreement::StructuredInfo;
pub use backend::AgentService;
pub use backend::DocumentService;
pub use backend::FilePayload;
pub use backend::HealthReport;
pub use backend::QueryResponse;
pub use backend::UploadResponse;
pub use chat::Author;
pub use chat::ChatMessage;
pub use event::Event;
pub use event::Notification;
pub use event::NotificationLevel;
pub use reminder::Reminder;
pub use reminder::ReminderKind;
pub use scheduler::Scheduler;
pub use session::Session;
pub use stats::DashboardStats;
pub use storage::BACKEND_URL_KEY;
pub use storage::KeyValueStore;
pub use storage::USER_ID_KEY;
