//! The serialized conversational query workflow.
//!
//! At most one query is outstanding at a time, so the transcript is strictly
//! linearly ordered by submission/resolution. In-flight queries cannot be
//! cancelled.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::Mutex;

use crate::domain::models::AgentService;
use crate::domain::models::Author;
use crate::domain::models::ChatMessage;
use crate::domain::models::Event;
use crate::domain::models::Notification;
use crate::domain::models::Scheduler;
use crate::domain::services::AppState;
use crate::errors::CoreError;

/// Scripted fallback appended when the answering service fails.
pub const APOLOGY_MESSAGE: &str =
    "I'm experiencing technical difficulties. Please try again later.";

pub struct ChatService {
    state: Arc<Mutex<AppState>>,
    agent: Arc<dyn AgentService>,
    scheduler: Arc<dyn Scheduler>,
    event_tx: mpsc::UnboundedSender<Event>,
}

impl ChatService {
    pub fn new(
        state: Arc<Mutex<AppState>>,
        agent: Arc<dyn AgentService>,
        scheduler: Arc<dyn Scheduler>,
        event_tx: mpsc::UnboundedSender<Event>,
    ) -> ChatService {
        return ChatService {
            state,
            agent,
            scheduler,
            event_tx,
        };
    }

    /// Submits one query to the answering service.
    ///
    /// Whitespace-only input is a no-op. The user's message is appended
    /// optimistically before the call goes out; a failure degrades to a
    /// scripted apology instead of propagating. Whatever the exit path, the
    /// awaiting flag is cleared and the view is told to re-enable and
    /// refocus its input.
    pub async fn submit(&self, text: &str) -> Result<(), CoreError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let (user_id, placeholder) = {
            let mut state = self.state.lock().await;
            let user_id = match state.session.user_id.clone() {
                Some(user_id) => user_id,
                None => {
                    return Err(CoreError::Validation(
                        "Sign in before asking questions".to_string(),
                    ))
                }
            };
            if state.chat.awaiting_response {
                return Err(CoreError::Busy);
            }
            state.chat.awaiting_response = true;
            let message = ChatMessage::new(Author::User, trimmed, self.scheduler.now());
            state.chat.messages.push(message);
            let placeholder = state.chat.create_placeholder();
            (user_id, placeholder)
        };
        let _ = self.event_tx.send(Event::ChatPlaceholderCreated(placeholder));

        let result = self.agent.query(&user_id, trimmed).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(answer) => {
                if let Some(removed) = state.chat.remove_placeholder(placeholder) {
                    let _ = self.event_tx.send(Event::ChatPlaceholderRemoved(removed));
                }
                let message = ChatMessage::new(Author::Agent, &answer, self.scheduler.now());
                state.chat.messages.push(message);
            }
            Err(err) => {
                if let Some(removed) = state.chat.remove_placeholder_or_latest(placeholder) {
                    let _ = self.event_tx.send(Event::ChatPlaceholderRemoved(removed));
                }
                let message =
                    ChatMessage::new(Author::Agent, APOLOGY_MESSAGE, self.scheduler.now());
                state.chat.messages.push(message);
                let _ = self.event_tx.send(Event::Notice(Notification::error(&format!(
                    "Query failed: {err}"
                ))));
                log::warn!("agent query failed: {err}");
            }
        }
        state.chat.awaiting_response = false;
        drop(state);

        let _ = self.event_tx.send(Event::ChatInputEnabled);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use async_trait::async_trait;
    use tokio::sync::Semaphore;

    use super::*;
    use crate::domain::models::HealthReport;
    use crate::domain::models::Session;
    use crate::infrastructure::NoDelayScheduler;

    /// Scripted answering service: pops one canned result per query and
    /// counts calls. An optional gate holds responses back until released.
    struct ScriptedAgent {
        calls: AtomicUsize,
        responses: Mutex<Vec<Result<String, CoreError>>>,
        gate: Option<Arc<Semaphore>>,
    }

    impl ScriptedAgent {
        fn with(responses: Vec<Result<String, CoreError>>) -> ScriptedAgent {
            return ScriptedAgent {
                calls: AtomicUsize::new(0),
                responses: Mutex::new(responses),
                gate: None,
            };
        }
    }

    #[async_trait]
    impl AgentService for ScriptedAgent {
        async fn query(&self, _user_id: &str, _text: &str) -> Result<String, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                let permit = gate.acquire().await.unwrap();
                permit.forget();
            }
            return self.responses.lock().await.remove(0);
        }

        async fn health_check(&self) -> Result<HealthReport, CoreError> {
            return Ok(HealthReport::default());
        }
    }

    fn service_with(
        agent: Arc<ScriptedAgent>,
    ) -> (
        ChatService,
        Arc<Mutex<AppState>>,
        mpsc::UnboundedReceiver<Event>,
    ) {
        let state = Arc::new(Mutex::new(AppState {
            session: Session {
                user_id: Some("abc123".to_string()),
            },
            ..AppState::default()
        }));
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let chat = ChatService::new(
            state.clone(),
            agent,
            Arc::new(NoDelayScheduler),
            event_tx,
        );
        return (chat, state, event_rx);
    }

    #[tokio::test]
    async fn test_blank_input_is_a_noop() {
        let agent = Arc::new(ScriptedAgent::with(vec![]));
        let (chat, state, _event_rx) = service_with(agent.clone());

        chat.submit("").await.unwrap();
        chat.submit("   \n\t").await.unwrap();

        assert_eq!(agent.calls.load(Ordering::SeqCst), 0);
        assert!(state.lock().await.chat.messages.is_empty());
    }

    #[tokio::test]
    async fn test_submit_requires_session() {
        let agent = Arc::new(ScriptedAgent::with(vec![]));
        let (chat, state, _event_rx) = service_with(agent.clone());
        state.lock().await.session.user_id = None;

        assert!(matches!(
            chat.submit("when is rent due?").await,
            Err(CoreError::Validation(_))
        ));
        assert!(state.lock().await.chat.messages.is_empty());
    }

    #[tokio::test]
    async fn test_successful_query_orders_messages() {
        let agent = Arc::new(ScriptedAgent::with(vec![Ok(
            "Rent is due on the 1st.".to_string()
        )]));
        let (chat, state, _event_rx) = service_with(agent);

        chat.submit("when is rent due?").await.unwrap();

        let state = state.lock().await;
        assert_eq!(state.chat.messages.len(), 2);
        assert_eq!(state.chat.messages[0].author, Author::User);
        assert_eq!(state.chat.messages[0].text, "when is rent due?");
        assert_eq!(state.chat.messages[1].author, Author::Agent);
        assert_eq!(state.chat.messages[1].text, "Rent is due on the 1st.");
        assert!(state.chat.placeholders.is_empty());
        assert!(!state.chat.awaiting_response);
    }

    #[tokio::test]
    async fn test_failed_query_degrades_to_apology_and_reenables_input() {
        let agent = Arc::new(ScriptedAgent::with(vec![Err(CoreError::Network(
            "agent unreachable".to_string(),
        ))]));
        let (chat, state, mut event_rx) = service_with(agent);

        chat.submit("hello?").await.unwrap();

        let state = state.lock().await;
        assert_eq!(state.chat.messages.len(), 2);
        assert_eq!(state.chat.messages[1].text, APOLOGY_MESSAGE);
        assert!(state.chat.placeholders.is_empty());
        assert!(!state.chat.awaiting_response);

        let mut saw_input_enabled = false;
        let mut saw_error_notice = false;
        while let Ok(event) = event_rx.try_recv() {
            match event {
                Event::ChatInputEnabled => saw_input_enabled = true,
                Event::Notice(notice) => {
                    saw_error_notice = notice.level
                        == crate::domain::models::NotificationLevel::Error
                        || saw_error_notice;
                }
                _ => {}
            }
        }
        assert!(saw_input_enabled);
        assert!(saw_error_notice);
    }

    #[tokio::test]
    async fn test_concurrent_query_is_rejected_busy() {
        let gate = Arc::new(Semaphore::new(0));
        let agent = Arc::new(ScriptedAgent {
            calls: AtomicUsize::new(0),
            responses: Mutex::new(vec![Ok("first answer".to_string())]),
            gate: Some(gate.clone()),
        });
        let (chat, state, _event_rx) = service_with(agent.clone());
        let chat = Arc::new(chat);

        let first = {
            let chat = chat.clone();
            tokio::spawn(async move { chat.submit("first").await })
        };
        while agent.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        assert!(matches!(chat.submit("second").await, Err(CoreError::Busy)));

        gate.add_permits(1);
        first.await.unwrap().unwrap();

        let state = state.lock().await;
        assert_eq!(state.chat.messages.len(), 2);
        assert_eq!(state.chat.messages[1].text, "first answer");
        assert!(!state.chat.awaiting_response);
    }

    #[tokio::test]
    async fn test_placeholder_created_and_removed_in_order() {
        let agent = Arc::new(ScriptedAgent::with(vec![
            Ok("first answer".to_string()),
            Ok("second answer".to_string()),
        ]));
        let (chat, _state, mut event_rx) = service_with(agent);

        chat.submit("first").await.unwrap();
        chat.submit("second").await.unwrap();

        let mut created = vec![];
        let mut removed = vec![];
        while let Ok(event) = event_rx.try_recv() {
            match event {
                Event::ChatPlaceholderCreated(id) => created.push(id),
                Event::ChatPlaceholderRemoved(id) => removed.push(id),
                _ => {}
            }
        }
        assert_eq!(created, removed);
        assert_eq!(created.len(), 2);
        assert!(created[1] > created[0]);
    }
}
