//! The validated asynchronous upload workflow.
//!
//! One upload may be in flight at a time. Validation happens entirely on the
//! client before any network call; the progress indicator is cosmetic and
//! timer-driven rather than derived from actual transfer progress.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::domain::models::Agreement;
use crate::domain::models::AgreementStatus;
use crate::domain::models::DocumentService;
use crate::domain::models::Event;
use crate::domain::models::FilePayload;
use crate::domain::models::Notification;
use crate::domain::models::Scheduler;
use crate::domain::models::StructuredInfo;
use crate::domain::models::UploadResponse;
use crate::domain::services::reminders;
use crate::domain::services::stats;
use crate::domain::services::AppState;
use crate::domain::services::UploadPhase;
use crate::errors::CoreError;

/// Upload size ceiling.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types the processing service accepts: PDF, plain text, legacy Word,
/// and Open XML Word.
pub const ALLOWED_MIME_TYPES: [&str; 4] = [
    "application/pdf",
    "text/plain",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

const PROGRESS_TICK: Duration = Duration::from_millis(800);
const PROGRESS_CAP: u8 = 85;
const RESET_DELAY: Duration = Duration::from_secs(3);

pub struct UploadService {
    state: Arc<Mutex<AppState>>,
    documents: Arc<dyn DocumentService>,
    scheduler: Arc<dyn Scheduler>,
    event_tx: mpsc::UnboundedSender<Event>,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
    max_upload_bytes: u64,
}

impl UploadService {
    pub fn new(
        state: Arc<Mutex<AppState>>,
        documents: Arc<dyn DocumentService>,
        scheduler: Arc<dyn Scheduler>,
        event_tx: mpsc::UnboundedSender<Event>,
        tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
        max_upload_bytes: u64,
    ) -> UploadService {
        return UploadService {
            state,
            documents,
            scheduler,
            event_tx,
            tasks,
            max_upload_bytes,
        };
    }

    /// Runs the full upload workflow for one file.
    ///
    /// Validation failures and a concurrent upload return an error before any
    /// network call, with no state mutated. A failed upload never partially
    /// commits an agreement. Either terminal phase schedules the fixed-delay
    /// reset back to idle; that reset is not cancellable.
    pub async fn submit(&self, file: FilePayload) -> Result<Agreement, CoreError> {
        let user_id = {
            let mut state = self.state.lock().await;
            if state.upload_phase != UploadPhase::Idle {
                return Err(CoreError::Busy);
            }
            state.upload_phase = UploadPhase::Validating;
            match state.session.user_id.clone() {
                Some(user_id) => user_id,
                None => {
                    state.upload_phase = UploadPhase::Idle;
                    return Err(CoreError::Validation(
                        "Sign in before uploading documents".to_string(),
                    ));
                }
            }
        };

        if let Err(err) = self.validate(&file) {
            self.state.lock().await.upload_phase = UploadPhase::Idle;
            return Err(err);
        }

        {
            let mut state = self.state.lock().await;
            state.upload_phase = UploadPhase::Uploading;
            state.upload_progress = 0;
        }
        let ticker = self.spawn_progress_ticker().await;

        log::info!("uploading {} ({} bytes)", file.filename, file.bytes.len());
        let result = self.documents.upload(&user_id, &file).await;

        // The response has arrived; ownership of the progress field passes
        // from the ticker to this completion path.
        ticker.abort();

        match result {
            Ok(response) => {
                let agreement = self.build_agreement(&file.filename, &response);
                let mut state = self.state.lock().await;
                state.upload_progress = 100;
                let _ = self.event_tx.send(Event::UploadProgress(100));
                state.agreements.insert(0, agreement.clone());
                state.reminders = reminders::derive_reminders(&response.structured_info);
                state.upload_phase = UploadPhase::Succeeded;
                state.stats = stats::project(&state);
                let _ = self.event_tx.send(Event::StatsUpdated(state.stats));
                let _ = self.event_tx.send(Event::Notice(Notification::info(&format!(
                    "{} processed successfully",
                    file.filename
                ))));
                drop(state);

                self.schedule_reset().await;
                Ok(agreement)
            }
            Err(err) => {
                let mut state = self.state.lock().await;
                state.upload_progress = 100;
                let _ = self.event_tx.send(Event::UploadProgress(100));
                state.upload_phase = UploadPhase::Failed;
                let _ = self.event_tx.send(Event::Notice(Notification::error(&format!(
                    "Upload failed: {err}"
                ))));
                drop(state);

                log::warn!("upload of {} failed: {err}", file.filename);
                self.schedule_reset().await;
                Err(err)
            }
        }
    }

    fn validate(&self, file: &FilePayload) -> Result<(), CoreError> {
        if file.bytes.len() as u64 > self.max_upload_bytes {
            return Err(CoreError::Validation(format!(
                "File exceeds the {} MiB upload limit",
                self.max_upload_bytes / (1024 * 1024)
            )));
        }
        if !ALLOWED_MIME_TYPES.contains(&file.mime_type.as_str()) {
            return Err(CoreError::Validation(format!(
                "Unsupported file type: {}",
                file.mime_type
            )));
        }
        Ok(())
    }

    fn build_agreement(&self, filename: &str, response: &UploadResponse) -> Agreement {
        let info = &response.structured_info;
        let parties = match (
            StructuredInfo::known(&info.tenant_name),
            StructuredInfo::known(&info.landlord_name),
        ) {
            (Some(tenant), Some(landlord)) => format!("{tenant} / {landlord}"),
            (Some(tenant), None) => tenant.to_string(),
            (None, Some(landlord)) => landlord.to_string(),
            (None, None) => "Not specified".to_string(),
        };
        let rent_display = match StructuredInfo::known(&info.rent_amount) {
            Some(amount) => reminders::format_currency(amount),
            None => "N/A".to_string(),
        };

        return Agreement {
            // Collision-resistant id; ids derived from wall-clock time can
            // collide under rapid repeated uploads.
            id: Uuid::new_v4().to_string(),
            filename: filename.to_string(),
            upload_date: self.scheduler.now(),
            parties,
            rent_display,
            status: AgreementStatus::Active,
            structured_info: info.clone(),
            summary: response.summary.clone(),
        };
    }

    /// Advances the cosmetic progress indicator on a fixed cadence with
    /// randomized increments, capped until the response arrives.
    ///
    /// The join handle goes into the tracked task list so teardown can clear
    /// the timer even when the submit future itself was abandoned; the
    /// returned abort handle serves the normal completion path.
    async fn spawn_progress_ticker(&self) -> AbortHandle {
        let state = self.state.clone();
        let scheduler = self.scheduler.clone();
        let event_tx = self.event_tx.clone();

        let handle = tokio::spawn(async move {
            loop {
                scheduler.sleep(PROGRESS_TICK).await;
                let mut state = state.lock().await;
                if state.upload_phase != UploadPhase::Uploading {
                    break;
                }
                let bump: u8 = rand::thread_rng().gen_range(5..=20);
                state.upload_progress = (state.upload_progress + bump).min(PROGRESS_CAP);
                let _ = event_tx.send(Event::UploadProgress(state.upload_progress));
            }
        });
        let abort = handle.abort_handle();
        self.track(handle).await;
        return abort;
    }

    /// Tracks a timer task for teardown, dropping handles that have already
    /// finished so the list does not grow across uploads.
    async fn track(&self, handle: JoinHandle<()>) {
        let mut tasks = self.tasks.lock().await;
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }

    /// Returns the controller to idle after a fixed delay, unconditionally.
    /// The task is tracked so teardown can abort it if the process is going
    /// away.
    async fn schedule_reset(&self) {
        let state = self.state.clone();
        let scheduler = self.scheduler.clone();
        let event_tx = self.event_tx.clone();

        let handle = tokio::spawn(async move {
            scheduler.sleep(RESET_DELAY).await;
            let mut state = state.lock().await;
            state.upload_progress = 0;
            state.upload_phase = UploadPhase::Idle;
            let _ = event_tx.send(Event::UploadReset);
        });
        self.track(handle).await;
    }
}
