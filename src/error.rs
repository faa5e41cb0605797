//! HTTP-facing error taxonomy.
//!
//! Every variant renders as a JSON body with at least an `error` field.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("요청 본문이 올바른 JSON이 아닙니다.")]
    MalformedBody(String),

    #[error("개념이 입력되지 않았습니다.")]
    MissingConcept,

    #[error("AI 응답을 가져오지 못했습니다.")]
    ExplanationUnavailable,

    /// Notion answered with a non-200 status; both are forwarded unchanged.
    #[error("Notion 저장 실패")]
    NotionRejected { status: u16, details: Value },

    #[error("서버 오류 발생")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) | ApiError::MissingConcept => StatusCode::BAD_REQUEST,
            ApiError::ExplanationUnavailable | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotionRejected { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        let body = match self {
            ApiError::MalformedBody(details) | ApiError::Internal(details) => {
                json!({ "error": message, "details": details })
            }
            ApiError::NotionRejected { details, .. } => {
                json!({ "error": message, "details": details })
            }
            ApiError::MissingConcept | ApiError::ExplanationUnavailable => {
                json!({ "error": message })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_status_is_forwarded() {
        let err = ApiError::NotionRejected {
            status: 403,
            details: json!({"message": "unauthorized"}),
        };
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        assert_eq!(ApiError::MissingConcept.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::MalformedBody("eof".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn upstream_failures_are_server_errors() {
        assert_eq!(
            ApiError::ExplanationUnavailable.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
