//! Thin command-line front end for the Leasemate client core.
//!
//! This binary is deliberately dumb view glue: it wires the core up, runs
//! one command, and prints whatever events the core emitted. All state,
//! validation, and failure handling live in `leasemate-core`.

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use leasemate_core::domain::models::AgentService;
use leasemate_core::domain::models::BACKEND_URL_KEY;
use leasemate_core::domain::models::DocumentService;
use leasemate_core::domain::models::Event;
use leasemate_core::domain::models::FilePayload;
use leasemate_core::domain::models::KeyValueStore;
use leasemate_core::domain::models::NotificationLevel;
use leasemate_core::infrastructure::clients::HttpBackend;
use leasemate_core::infrastructure::storage::FileStore;
use leasemate_core::infrastructure::TokioScheduler;
use leasemate_core::AppContext;
use leasemate_core::AppContextProps;
use leasemate_core::Config;
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[clap(
    name = "leasemate",
    version,
    about = "Rental-agreement assistant client"
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(long, help = "Backend base URL, overriding config and saved value")]
    backend_url: Option<String>,

    #[clap(long, short, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start a session as the given user
    Login { user_id: String },
    /// Clear the session and its persisted identifier
    Logout,
    /// Upload a rental agreement for processing
    Upload { path: PathBuf },
    /// Ask the assistant a question
    Ask { question: Vec<String> },
    /// Check backend health
    Health,
    /// Save the backend base URL for future runs
    SetBackend { url: String },
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    return match extension.as_str() {
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    };
}

fn print_events(event_rx: &mut mpsc::UnboundedReceiver<Event>) {
    while let Ok(event) = event_rx.try_recv() {
        match event {
            Event::Notice(notice) => match notice.level {
                NotificationLevel::Info => println!("{}", notice.message),
                NotificationLevel::Error => eprintln!("error: {}", notice.message),
            },
            Event::StatsUpdated(stats) => {
                println!(
                    "stats: total={} active={} expiring_soon={} alerts={}",
                    stats.total, stats.active, stats.expiring_soon, stats.alerts
                );
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .parse_filters(&cli.log_level)
        .init();

    let config_path = Config::default_path().ok_or_else(|| anyhow!("no config directory"))?;
    let config = Config::load(&config_path).await?;

    let store_path = FileStore::default_path().ok_or_else(|| anyhow!("no data directory"))?;
    let storage: Arc<FileStore> = Arc::new(FileStore::new(store_path));

    // Precedence: flag, then last-saved address, then config default.
    let backend_url = match &cli.backend_url {
        Some(url) => url.clone(),
        None => storage
            .get(BACKEND_URL_KEY)
            .await?
            .unwrap_or_else(|| config.backend_url.clone()),
    };
    log::debug!("using backend at {backend_url}");
    let backend = Arc::new(
        HttpBackend::new(backend_url)
            .with_timeout(Duration::from_secs(config.request_timeout_secs)),
    );

    let (context, mut event_rx) = AppContext::new(AppContextProps {
        config,
        documents: backend.clone() as Arc<dyn DocumentService>,
        agent: backend.clone() as Arc<dyn AgentService>,
        storage: storage.clone(),
        scheduler: Arc::new(TokioScheduler),
    });
    context.session.restore_session().await?;

    let outcome = run_command(&cli.command, &context, backend.as_ref()).await;
    print_events(&mut event_rx);
    context.shutdown().await;
    return outcome;
}

async fn run_command(
    command: &Commands,
    context: &AppContext,
    backend: &HttpBackend,
) -> Result<()> {
    match command {
        Commands::Login { user_id } => {
            context.session.set_user(user_id).await?;
            println!("logged in as {user_id}");
        }
        Commands::Logout => {
            context.session.change_user().await?;
            println!("logged out");
        }
        Commands::Upload { path } => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("document")
                .to_string();
            let file = FilePayload {
                mime_type: mime_for(path).to_string(),
                filename,
                bytes,
            };

            let agreement = context.upload.submit(file).await?;
            println!("processed {}", agreement.filename);
            println!("  parties: {}", agreement.parties);
            println!("  rent:    {}", agreement.rent_display);
            println!("  summary: {}", agreement.summary);
            let state = context.snapshot().await;
            for reminder in &state.reminders {
                println!("reminder: {} - {}", reminder.title, reminder.description);
            }
        }
        Commands::Ask { question } => {
            let question = question.join(" ");
            context.chat.submit(&question).await?;
            let state = context.snapshot().await;
            if let Some(message) = state.chat.messages.last() {
                println!("{}", message.text);
            }
        }
        Commands::Health => {
            let report = DocumentService::health_check(backend).await?;
            println!("status: {}", report.status.as_deref().unwrap_or("unknown"));
            let mut services = report.services.iter().collect::<Vec<_>>();
            services.sort();
            for (name, state) in services {
                println!("  {name}: {state}");
            }
        }
        Commands::SetBackend { url } => {
            context.session.save_backend_url(url).await?;
            println!("backend saved: {url}");
        }
    }
    Ok(())
}
