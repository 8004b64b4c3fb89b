use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderKind {
    Rent,
    Amount,
    Lease,
    Deposit,
}

/// A derived notice computed from the most recently uploaded agreement's
/// structured info. Reminders are never persisted; the whole set is replaced
/// wholesale each time a new agreement is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub kind: ReminderKind,
    pub title: String,
    pub description: String,
    pub date: String,
}
