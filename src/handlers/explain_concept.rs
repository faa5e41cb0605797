use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AppState;
use crate::error::ApiError;
use crate::notion::NotionError;

#[derive(Debug, Deserialize)]
pub struct ExplainConceptRequest {
    #[serde(rename = "개념", default)]
    pub concept: Option<Value>,
}

impl ExplainConceptRequest {
    /// The concept as text, or `None` when it is missing, `null`, or empty.
    fn concept_text(&self) -> Option<String> {
        let text = match self.concept.as_ref()? {
            Value::Null => return None,
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub enum SaveLabel {
    #[serde(rename = "성공")]
    Saved,
    #[serde(rename = "실패")]
    Failed,
}

#[derive(Debug, Serialize)]
pub struct ExplainConceptResponse {
    #[serde(rename = "개념")]
    pub concept: String,
    #[serde(rename = "설명")]
    pub explanation: String,
    #[serde(rename = "Notion 저장")]
    pub notion_saved: SaveLabel,
}

/// `POST /api/explain_concept`
///
/// Validate, ask Gemini, then save to Notion. A failed Notion save is reported in the
/// body rather than as an error status.
pub async fn explain_concept(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExplainConceptRequest>, JsonRejection>,
) -> Result<Json<ExplainConceptResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::MalformedBody(e.body_text()))?;
    let concept = request.concept_text().ok_or(ApiError::MissingConcept)?;

    tracing::info!(concept = %concept, "explain_concept called");

    let explanation = match state.gemini.explain(&concept).await {
        Ok(text) if !text.is_empty() => text,
        Ok(_) => {
            tracing::error!("Gemini returned an empty explanation");
            return Err(ApiError::ExplanationUnavailable);
        }
        Err(exhausted) => {
            tracing::error!(
                error = %exhausted,
                failures = ?exhausted.failures,
                "no Gemini API key produced an explanation"
            );
            return Err(ApiError::ExplanationUnavailable);
        }
    };

    let notion_saved = match state.notion.persist_explanation(&concept, &explanation).await {
        Ok(()) => SaveLabel::Saved,
        Err(NotionError::Transport(e)) => return Err(ApiError::Internal(e.to_string())),
        Err(NotionError::Rejected { status, body }) => {
            tracing::warn!(status, body = %body, "Notion rejected explanation page");
            SaveLabel::Failed
        }
        Err(e) => {
            tracing::warn!(error = %e, "explanation not saved to Notion");
            SaveLabel::Failed
        }
    };

    Ok(Json(ExplainConceptResponse {
        concept,
        explanation,
        notion_saved,
    }))
}
