//! Client-side session and orchestration core for the Leasemate
//! rental-agreement assistant.
//!
//! This crate holds everything in the client with real state and failure
//! handling: the session identity and its persisted footprint, the processed
//! agreement collection, reminder derivation from extracted document fields,
//! the validated asynchronous upload workflow, the serialized conversational
//! query session, and the dashboard stats projection. Page routing, modal
//! rendering, and styling are external collaborators that call into this
//! crate and drain its event channel; the extraction, summarization, and
//! answering logic are remote services whose contracts are consumed, not
//! reimplemented, here.
//!
//! # Architecture Overview
//!
//! - **Domain models**: agreements, structured info, reminders, chat
//!   messages, and the service/storage/scheduler traits at the seams
//! - **Domain services**: the session store, reminder derivation engine,
//!   upload controller, chat session, and stats projector, wired together by
//!   an explicit per-process [`AppContext`]
//! - **Infrastructure**: reqwest-backed service clients and the file-backed
//!   key-value store
//! - **Configuration**: YAML config with environment-aware defaults

pub mod configuration;
pub mod domain;
pub mod errors;
pub mod infrastructure;

pub use configuration::Config;
pub use domain::services::AppContext;
pub use domain::services::AppContextProps;
pub use errors::CoreError;
