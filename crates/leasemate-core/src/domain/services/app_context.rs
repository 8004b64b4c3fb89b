//! Construction root for the client core.
//!
//! The context replaces what the old dashboard kept as module-level mutable
//! globals: it is built exactly once per client process, owns the shared
//! state, and hands the (external) view layer an explicit command surface
//! plus an event channel. No UI framework types appear anywhere in this
//! crate, which keeps the whole layer testable headlessly.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::configuration::Config;
use crate::domain::models::AgentService;
use crate::domain::models::DocumentService;
use crate::domain::models::Event;
use crate::domain::models::KeyValueStore;
use crate::domain::models::Scheduler;
use crate::domain::services::AppState;
use crate::domain::services::ChatService;
use crate::domain::services::SessionService;
use crate::domain::services::UploadPhase;
use crate::domain::services::UploadService;

pub struct AppContextProps {
    pub config: Config,
    pub documents: Arc<dyn DocumentService>,
    pub agent: Arc<dyn AgentService>,
    pub storage: Arc<dyn KeyValueStore>,
    pub scheduler: Arc<dyn Scheduler>,
}

pub struct AppContext {
    pub session: SessionService,
    pub upload: UploadService,
    pub chat: ChatService,
    state: Arc<Mutex<AppState>>,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl AppContext {
    /// Builds the context and the event channel the view layer drains.
    pub fn new(props: AppContextProps) -> (AppContext, mpsc::UnboundedReceiver<Event>) {
        let state = Arc::new(Mutex::new(AppState::default()));
        let tasks = Arc::new(Mutex::new(vec![]));
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let session = SessionService::new(state.clone(), props.storage, event_tx.clone());
        let upload = UploadService::new(
            state.clone(),
            props.documents,
            props.scheduler.clone(),
            event_tx.clone(),
            tasks.clone(),
            props.config.max_upload_bytes,
        );
        let chat = ChatService::new(state.clone(), props.agent, props.scheduler, event_tx);

        let context = AppContext {
            session,
            upload,
            chat,
            state,
            tasks,
        };
        return (context, event_rx);
    }

    /// Clones the current state for the view layer to render.
    pub async fn snapshot(&self) -> AppState {
        return self.state.lock().await.clone();
    }

    /// Aborts any pending timer tasks and returns the upload controller to
    /// idle. Abandoning the page mid-operation would otherwise orphan the
    /// progress and reset timers and leave the controller stuck busy.
    pub async fn shutdown(&self) {
        for handle in self.tasks.lock().await.drain(..) {
            handle.abort();
        }

        let mut state = self.state.lock().await;
        if state.upload_phase != UploadPhase::Idle {
            state.upload_phase = UploadPhase::Idle;
            state.upload_progress = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::models::FilePayload;
    use crate::domain::models::HealthReport;
    use crate::domain::models::UploadResponse;
    use crate::errors::CoreError;
    use crate::infrastructure::storage::MemoryStore;
    use crate::infrastructure::NoDelayScheduler;

    /// Backend that never responds, standing in for a request the user walks
    /// away from.
    struct StalledBackend;

    #[async_trait]
    impl DocumentService for StalledBackend {
        async fn upload(
            &self,
            _user_id: &str,
            _file: &FilePayload,
        ) -> Result<UploadResponse, CoreError> {
            return std::future::pending().await;
        }

        async fn health_check(&self) -> Result<HealthReport, CoreError> {
            return Ok(HealthReport::default());
        }
    }

    #[async_trait]
    impl AgentService for StalledBackend {
        async fn query(&self, _user_id: &str, _text: &str) -> Result<String, CoreError> {
            return std::future::pending().await;
        }

        async fn health_check(&self) -> Result<HealthReport, CoreError> {
            return Ok(HealthReport::default());
        }
    }

    #[tokio::test]
    async fn test_shutdown_clears_abandoned_upload() {
        let backend = Arc::new(StalledBackend);
        let (context, mut event_rx) = AppContext::new(AppContextProps {
            config: Config::default(),
            documents: backend.clone(),
            agent: backend,
            storage: Arc::new(MemoryStore::default()),
            scheduler: Arc::new(NoDelayScheduler),
        });
        let context = Arc::new(context);
        context.session.set_user("abc123").await.unwrap();

        let submit = {
            let context = context.clone();
            tokio::spawn(async move {
                let file = FilePayload {
                    filename: "lease.pdf".to_string(),
                    mime_type: "application/pdf".to_string(),
                    bytes: vec![0; 1024],
                };
                let _ = context.upload.submit(file).await;
            })
        };
        while context.snapshot().await.upload_phase != UploadPhase::Uploading {
            tokio::task::yield_now().await;
        }

        // The view layer abandons the pending upload, then tears down.
        submit.abort();
        context.shutdown().await;

        while event_rx.try_recv().is_ok() {}
        for _ in 0..64 {
            tokio::task::yield_now().await;
        }

        // The progress ticker is gone and the controller is usable again.
        assert!(event_rx.try_recv().is_err());
        let state = context.snapshot().await;
        assert_eq!(state.upload_phase, UploadPhase::Idle);
        assert_eq!(state.upload_progress, 0);
    }
}
