// src/core/service_client.rs
//! HTTP client for the search, export and job collaborator services

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::core::feedback::FeedbackEntry;
use crate::types::response::ApiErrorBody;
use crate::types::{
    ChatMessage, JobChatResponse, JobCreationResponse, JobRecord, ListExportResponse,
    SearchResponse,
};

const SEARCH_CHAT_ENDPOINT: &str = "/query/chat";
const CSV_EXPORT_ENDPOINT: &str = "/query/export";
const LIST_EXPORT_ENDPOINT: &str = "/query/export-clickup";
const JOB_CHAT_ENDPOINT: &str = "/jobs/chat";
const JOB_CREATE_ENDPOINT: &str = "/jobs/create";

/// The operations the backend collaborators expose. The orchestrator,
/// export coordinator and intake session are generic over this seam so
/// tests can substitute a stub.
pub trait BackendApi {
    fn search_chat(
        &self,
        message: &str,
        history: &[ChatMessage],
        feedback: &[FeedbackEntry],
    ) -> impl std::future::Future<Output = Result<SearchResponse>> + Send;

    fn export_csv(
        &self,
        history: &[ChatMessage],
        feedback: &[FeedbackEntry],
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    fn export_to_list(
        &self,
        list_id: &str,
        job_title: &str,
        history: &[ChatMessage],
        feedback: &[FeedbackEntry],
    ) -> impl std::future::Future<Output = Result<ListExportResponse>> + Send;

    fn job_chat(
        &self,
        message: &str,
        history: &[ChatMessage],
        current: &JobRecord,
    ) -> impl std::future::Future<Output = Result<JobChatResponse>> + Send;

    fn create_job(
        &self,
        job: &JobRecord,
    ) -> impl std::future::Future<Output = Result<JobCreationResponse>> + Send;
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_json<T, R>(&self, endpoint: &str, payload: &T) -> Result<R>
    where
        T: serde::Serialize,
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<R>()
                .await
                .context("Failed to parse JSON response")
        } else {
            Err(service_error(endpoint, status, response).await)
        }
    }
}

/// Non-2xx bodies carry `{message}`; surface that text verbatim as the
/// user-visible error, falling back to the raw body.
async fn service_error(
    endpoint: &str,
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> anyhow::Error {
    let body = response.text().await.unwrap_or_default();
    error!("Backend error on {} ({}): {}", endpoint, status, body);

    match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => anyhow::anyhow!("{}", parsed.message),
        Err(_) => anyhow::anyhow!("HTTP {} error: {}", status, body),
    }
}

impl BackendApi for BackendClient {
    async fn search_chat(
        &self,
        message: &str,
        history: &[ChatMessage],
        feedback: &[FeedbackEntry],
    ) -> Result<SearchResponse> {
        info!("Calling search collaborator with {} history turns", history.len());
        self.post_json(
            SEARCH_CHAT_ENDPOINT,
            &serde_json::json!({
                "message": message,
                "conversationHistory": history,
                "profileFeedback": feedback,
            }),
        )
        .await
    }

    async fn export_csv(
        &self,
        history: &[ChatMessage],
        feedback: &[FeedbackEntry],
    ) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, CSV_EXPORT_ENDPOINT);
        info!("Calling CSV export collaborator: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "conversationHistory": history,
                "profileFeedback": feedback,
            }))
            .send()
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        let status = response.status();
        if status.is_success() {
            let bytes = response
                .bytes()
                .await
                .context("Failed to read export payload")?;
            Ok(bytes.to_vec())
        } else {
            Err(service_error(CSV_EXPORT_ENDPOINT, status, response).await)
        }
    }

    async fn export_to_list(
        &self,
        list_id: &str,
        job_title: &str,
        history: &[ChatMessage],
        feedback: &[FeedbackEntry],
    ) -> Result<ListExportResponse> {
        info!("Calling list export collaborator for list {}", list_id);
        self.post_json(
            LIST_EXPORT_ENDPOINT,
            &serde_json::json!({
                "clickUpListId": list_id,
                "jobTitle": job_title,
                "conversationHistory": history,
                "profileFeedback": feedback,
            }),
        )
        .await
    }

    async fn job_chat(
        &self,
        message: &str,
        history: &[ChatMessage],
        current: &JobRecord,
    ) -> Result<JobChatResponse> {
        self.post_json(
            JOB_CHAT_ENDPOINT,
            &serde_json::json!({
                "message": message,
                "conversationHistory": history,
                "currentJobData": current,
            }),
        )
        .await
    }

    async fn create_job(&self, job: &JobRecord) -> Result<JobCreationResponse> {
        info!("Creating job record");
        self.post_json(JOB_CREATE_ENDPOINT, job).await
    }
}
