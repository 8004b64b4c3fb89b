use crate::domain::models::DashboardStats;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A transient, dismissible notice for the view layer to display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: &str) -> Notification {
        return Notification {
            level: NotificationLevel::Info,
            message: message.to_string(),
        };
    }

    pub fn error(message: &str) -> Notification {
        return Notification {
            level: NotificationLevel::Error,
            message: message.to_string(),
        };
    }
}

/// Events the core pushes to the (external) view layer over an unbounded
/// channel. The view holds no logic; it renders these and reads state
/// snapshots back through the context.
#[derive(Clone, Debug)]
pub enum Event {
    Notice(Notification),
    /// Cosmetic upload progress, 0-100. Not derived from actual transfer
    /// progress.
    UploadProgress(u8),
    /// Progress has been reset and the file-selection control should clear.
    UploadReset,
    ChatPlaceholderCreated(u64),
    ChatPlaceholderRemoved(u64),
    /// The query input may be re-enabled and refocused.
    ChatInputEnabled,
    StatsUpdated(DashboardStats),
}
