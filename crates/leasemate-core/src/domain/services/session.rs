//! Session identity and its persisted footprint.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::Mutex;

use crate::domain::models::BACKEND_URL_KEY;
use crate::domain::models::Event;
use crate::domain::models::KeyValueStore;
use crate::domain::models::USER_ID_KEY;
use crate::domain::services::stats;
use crate::domain::services::AppState;
use crate::errors::CoreError;

const MIN_USER_ID_LEN: usize = 3;

pub struct SessionService {
    state: Arc<Mutex<AppState>>,
    storage: Arc<dyn KeyValueStore>,
    event_tx: mpsc::UnboundedSender<Event>,
}

impl SessionService {
    pub fn new(
        state: Arc<Mutex<AppState>>,
        storage: Arc<dyn KeyValueStore>,
        event_tx: mpsc::UnboundedSender<Event>,
    ) -> SessionService {
        return SessionService {
            state,
            storage,
            event_tx,
        };
    }

    /// Sets the active user, persists the identifier, and resets the
    /// agreement and reminder projections to their unauthenticated state.
    pub async fn set_user(&self, user_id: &str) -> Result<(), CoreError> {
        let trimmed = user_id.trim();
        if trimmed.len() < MIN_USER_ID_LEN {
            return Err(CoreError::Validation(format!(
                "User ID must be at least {MIN_USER_ID_LEN} characters"
            )));
        }

        self.storage.set(USER_ID_KEY, trimmed).await?;

        let mut state = self.state.lock().await;
        state.session.user_id = Some(trimmed.to_string());
        state.agreements.clear();
        state.reminders.clear();
        state.stats = stats::project(&state);
        let _ = self.event_tx.send(Event::StatsUpdated(state.stats));

        log::info!("session started for user {trimmed}");
        Ok(())
    }

    /// Clears the session identity, its persisted key, and the agreement and
    /// reminder collections.
    ///
    /// Chat history is left in place; switching users has never cleared the
    /// transcript, and that behavior is kept rather than aligned with the
    /// other reset paths.
    pub async fn change_user(&self) -> Result<(), CoreError> {
        self.storage.remove(USER_ID_KEY).await?;

        let mut state = self.state.lock().await;
        state.session.user_id = None;
        state.agreements.clear();
        state.reminders.clear();
        state.stats = stats::project(&state);
        let _ = self.event_tx.send(Event::StatsUpdated(state.stats));

        log::info!("session cleared");
        Ok(())
    }

    /// Re-enters the logged-in state from the persisted identifier, if any.
    ///
    /// The stored value is trusted as-is: it was validated when written and
    /// is not re-validated here. Anything that can write the store can
    /// therefore mint a session; real authorization is enforced by the
    /// backend on every request.
    pub async fn restore_session(&self) -> Result<Option<String>, CoreError> {
        let stored = self.storage.get(USER_ID_KEY).await?;
        let user_id = match stored {
            Some(value) if !value.is_empty() => value,
            _ => return Ok(None),
        };

        let mut state = self.state.lock().await;
        state.session.user_id = Some(user_id.clone());
        log::info!("session restored for user {user_id}");
        return Ok(Some(user_id));
    }

    /// Persists the backend base address. Written only on explicit save.
    pub async fn save_backend_url(&self, url: &str) -> Result<(), CoreError> {
        return self.storage.set(BACKEND_URL_KEY, url.trim()).await;
    }
}
