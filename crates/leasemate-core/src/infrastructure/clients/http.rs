//! HTTP implementations of the remote service contracts.
//!
//! One reqwest-backed client serves both contracts; the backend hosts the
//! document-processing and answering endpoints under a single base address.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::domain::models::AgentService;
use crate::domain::models::DocumentService;
use crate::domain::models::FilePayload;
use crate::domain::models::HealthReport;
use crate::domain::models::QueryResponse;
use crate::domain::models::UploadResponse;
use crate::errors::CoreError;

/// Every request once a session exists carries this header; enforcement of
/// its presence is the backend's job, not ours.
pub const USER_ID_HEADER: &str = "X-User-ID";

/// Error body the backend sends on non-success responses.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpBackend {
    pub fn new(base_url: String) -> HttpBackend {
        return HttpBackend {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(120),
        };
    }

    pub fn with_timeout(mut self, timeout: Duration) -> HttpBackend {
        self.timeout = timeout;
        return self;
    }

    /// Turns a non-success response into a network error carrying the
    /// service-reported detail when the body has one.
    async fn error_from(response: reqwest::Response) -> CoreError {
        let status = response.status();
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);
        return match detail {
            Some(detail) => CoreError::Network(detail),
            None => CoreError::Network(format!("request failed with status {status}")),
        };
    }
}

#[async_trait]
impl DocumentService for HttpBackend {
    async fn upload(&self, user_id: &str, file: &FilePayload) -> Result<UploadResponse, CoreError> {
        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.filename.clone())
            .mime_str(&file.mime_type)?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/api/upload-document/", self.base_url))
            .header(USER_ID_HEADER, user_id)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(HttpBackend::error_from(response).await);
        }
        return Ok(response.json::<UploadResponse>().await?);
    }

    async fn health_check(&self) -> Result<HealthReport, CoreError> {
        let response = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(HttpBackend::error_from(response).await);
        }
        return Ok(response.json::<HealthReport>().await?);
    }
}

#[async_trait]
impl AgentService for HttpBackend {
    async fn query(&self, user_id: &str, text: &str) -> Result<String, CoreError> {
        let response = self
            .client
            .post(format!("{}/api/query-agent/", self.base_url))
            .query(&[("query", text)])
            .header(USER_ID_HEADER, user_id)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(HttpBackend::error_from(response).await);
        }
        let body = response.json::<QueryResponse>().await?;
        return Ok(body.response);
    }

    async fn health_check(&self) -> Result<HealthReport, CoreError> {
        return DocumentService::health_check(self).await;
    }
}
