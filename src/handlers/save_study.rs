use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;
use crate::notion::schema::{CreatePage, StudyRecordProperties};
use crate::notion::StudyRecord;

const UNKNOWN: &str = "알 수 없음";
const SAVED_MESSAGE: &str = "공부 기록 저장 성공!";

#[derive(Debug, Default, Deserialize)]
pub struct SaveStudyRequest {
    #[serde(rename = "과목", default)]
    pub subject: Option<String>,
    #[serde(rename = "개념", default)]
    pub concept: Option<String>,
    #[serde(rename = "중요도", default)]
    pub importance: Option<serde_json::Number>,
    #[serde(rename = "복습 날짜", default)]
    pub review_date: Option<String>,
    #[serde(rename = "메모", default)]
    pub memo: Option<String>,
}

impl SaveStudyRequest {
    pub fn into_record(self) -> StudyRecord {
        StudyRecord {
            subject: self.subject.unwrap_or_else(|| UNKNOWN.to_string()),
            concept: self.concept.unwrap_or_else(|| UNKNOWN.to_string()),
            importance: self.importance.unwrap_or_else(|| 0.into()),
            review_date: self.review_date,
            memo: self.memo.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveStudyResponse {
    pub message: &'static str,
    /// Echo of the page body sent to Notion.
    pub data: CreatePage<StudyRecordProperties>,
}

/// `POST /save_study`
///
/// Any fault other than a Notion rejection, including an unreadable request body,
/// is reported as a 500 with the fault text.
pub async fn save_study(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaveStudyRequest>, JsonRejection>,
) -> Result<Json<SaveStudyResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Internal(e.body_text()))?;
    let record = request.into_record();

    tracing::info!(subject = %record.subject, concept = %record.concept, "save_study called");

    let outcome = state
        .notion
        .persist_study_record(&record)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "study record save failed");
            ApiError::Internal(e.to_string())
        })?;

    if !outcome.is_saved() {
        tracing::warn!(status = outcome.status, "Notion rejected study record");
        return Err(ApiError::NotionRejected {
            status: outcome.status,
            details: outcome.body,
        });
    }

    Ok(Json(SaveStudyResponse {
        message: SAVED_MESSAGE,
        data: outcome.page,
    }))
}
