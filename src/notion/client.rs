use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::schema::{self, CreatePage, StudyRecord, StudyRecordProperties};
use crate::config::NotionConfig;

#[derive(Debug, Error)]
pub enum NotionError {
    #[error("Notion API key or database ID is not configured")]
    NotConfigured,

    #[error("Notion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Notion rejected the page with HTTP {status}")]
    Rejected { status: u16, body: String },

    #[error("Notion response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result of a study-record write: the page that was sent and Notion's raw answer.
#[derive(Debug)]
pub struct StudyRecordOutcome {
    pub page: CreatePage<StudyRecordProperties>,
    pub status: u16,
    /// Notion's JSON answer, read only for non-200 statuses. `Null` after a successful write.
    pub body: Value,
}

impl StudyRecordOutcome {
    pub fn is_saved(&self) -> bool {
        self.status == StatusCode::OK.as_u16()
    }
}

pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    database_id: Option<String>,
    version: String,
}

impl NotionClient {
    pub fn new(config: &NotionConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("failed to build Notion HTTP client")?;

        info!(configured = config.is_configured(), "Notion client ready");

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            database_id: config.database_id.clone().filter(|d| !d.is_empty()),
            version: config.version.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.database_id.is_some()
    }

    /// Save a concept and its explanation as a new page.
    ///
    /// Returns [`NotionError::NotConfigured`] without any network call when the API key
    /// or database ID is missing.
    pub async fn persist_explanation(&self, concept: &str, explanation: &str) -> Result<(), NotionError> {
        if !self.is_configured() {
            warn!("skipping Notion save: API key or database ID not set");
            return Err(NotionError::NotConfigured);
        }

        let page = schema::explanation_page(self.database_id.as_deref(), concept, explanation);
        let (status, body) = self.create_page(&page).await?;

        if status != StatusCode::OK {
            return Err(NotionError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(concept = %concept, "explanation saved to Notion");
        Ok(())
    }

    /// Save a study record as a new page and hand back Notion's status and, for a
    /// rejection, its JSON body.
    ///
    /// Sent even when credentials are missing; Notion's rejection is then reported
    /// through the outcome like any other non-200 answer. A 200 counts as saved
    /// whatever its body holds.
    pub async fn persist_study_record(&self, record: &StudyRecord) -> Result<StudyRecordOutcome, NotionError> {
        let page = schema::study_record_page(self.database_id.as_deref(), record);
        let (status, body) = self.create_page(&page).await?;
        let body = if status == StatusCode::OK {
            Value::Null
        } else {
            serde_json::from_str(&body)?
        };

        debug!(status = status.as_u16(), "Notion answered study record write");

        Ok(StudyRecordOutcome {
            page,
            status: status.as_u16(),
            body,
        })
    }

    async fn create_page<P: Serialize>(&self, page: &CreatePage<P>) -> Result<(StatusCode, String), NotionError> {
        let url = format!("{}/v1/pages", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.as_deref().unwrap_or_default())
            .header("Notion-Version", &self.version)
            .json(page)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}
