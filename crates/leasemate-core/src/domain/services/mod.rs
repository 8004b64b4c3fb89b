mod app_context;
mod app_state;
mod chat;
mod reminders;
mod session;
mod stats;
mod upload;

pub use app_context::AppContext;
pub use app_context::AppContextProps;
pub use app_state::AppState;
pub use app_state::ChatLog;
pub use app_state::UploadPhase;
pub use chat::APOLOGY_MESSAGE;
pub use chat::ChatService;
pub use reminders::derive_reminders;
pub use reminders::format_currency;
pub use session::SessionService;
pub use stats::project;
pub use upload::ALLOWED_MIME_TYPES;
pub use upload::MAX_UPLOAD_BYTES;
pub use upload::UploadService;
