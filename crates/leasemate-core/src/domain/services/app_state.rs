use crate::domain::models::Agreement;
use crate::domain::models::ChatMessage;
use crate::domain::models::DashboardStats;
use crate::domain::models::Reminder;
use crate::domain::models::Session;

/// Upload workflow phases. The controller moves `Idle → Validating →
/// {Rejected | Uploading} → {Succeeded | Failed}` and returns to `Idle`
/// after a fixed delay. A rejected validation drops straight back to `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Validating,
    Uploading,
    Succeeded,
    Failed,
}

/// The chat transcript plus the bookkeeping for the transient "agent is
/// responding" placeholder.
#[derive(Clone, Debug, Default)]
pub struct ChatLog {
    pub messages: Vec<ChatMessage>,
    pub placeholders: Vec<u64>,
    pub awaiting_response: bool,
    next_placeholder_id: u64,
}

impl ChatLog {
    /// Registers a new placeholder tagged with a monotonically increasing
    /// identifier.
    pub fn create_placeholder(&mut self) -> u64 {
        self.next_placeholder_id += 1;
        let id = self.next_placeholder_id;
        self.placeholders.push(id);
        return id;
    }

    /// Removes the placeholder with exactly this identifier.
    pub fn remove_placeholder(&mut self, id: u64) -> Option<u64> {
        if let Some(pos) = self.placeholders.iter().position(|p| *p == id) {
            return Some(self.placeholders.remove(pos));
        }
        return None;
    }

    /// Removes the placeholder with this identifier, falling back to the
    /// most recently created one when the original is gone.
    ///
    /// The fallback can target the wrong placeholder if two were ever live at
    /// once. Single-flight submission currently makes that impossible, so the
    /// legacy behavior is kept as-is rather than silently corrected.
    pub fn remove_placeholder_or_latest(&mut self, id: u64) -> Option<u64> {
        if let Some(removed) = self.remove_placeholder(id) {
            return Some(removed);
        }
        return self.placeholders.pop();
    }
}

/// All mutable state of the client core, shared behind one async mutex.
///
/// Constructed exactly once per process by the context; nothing in this
/// crate reads it ambiently.
#[derive(Clone, Debug)]
pub struct AppState {
    pub session: Session,
    pub agreements: Vec<Agreement>,
    pub reminders: Vec<Reminder>,
    pub chat: ChatLog,
    pub upload_phase: UploadPhase,
    pub upload_progress: u8,
    pub stats: DashboardStats,
}

impl Default for AppState {
    fn default() -> AppState {
        return AppState {
            session: Session::default(),
            agreements: vec![],
            reminders: vec![],
            chat: ChatLog::default(),
            upload_phase: UploadPhase::Idle,
            upload_progress: 0,
            stats: DashboardStats::default(),
        };
    }
}
