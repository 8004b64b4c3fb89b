use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::models::StructuredInfo;
use crate::errors::CoreError;

/// A file selected for upload, already read into memory. Dashboard documents
/// are capped at 10 MiB so buffering the whole payload is fine.
#[derive(Clone, Debug)]
pub struct FilePayload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Response body of the document-processing endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    pub summary: String,
    pub structured_info: StructuredInfo,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub chunks_created: Option<u64>,
}

/// Response body of the query endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: String,
}

/// Health endpoint payload. The backend nests a per-service status map;
/// missing keys are tolerated rather than treated as fatal.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub services: HashMap<String, String>,
}

/// Remote document-extraction service. The extraction and summarization
/// logic lives entirely on the server; this layer only consumes the contract.
#[async_trait]
pub trait DocumentService: Send + Sync {
    async fn upload(&self, user_id: &str, file: &FilePayload) -> Result<UploadResponse, CoreError>;
    async fn health_check(&self) -> Result<HealthReport, CoreError>;
}

/// Remote conversational answering service.
#[async_trait]
pub trait AgentService: Send + Sync {
    async fn query(&self, user_id: &str, text: &str) -> Result<String, CoreError>;
    async fn health_check(&self) -> Result<HealthReport, CoreError>;
}
