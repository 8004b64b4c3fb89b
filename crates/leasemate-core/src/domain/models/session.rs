use serde::Deserialize;
use serde::Serialize;

/// The logged-in user's identifying context. Exactly one exists per client
/// process; every remote call is gated on it being set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Option<String>,
}

impl Session {
    pub fn logged_in(&self) -> bool {
        return self.user_id.is_some();
    }
}
