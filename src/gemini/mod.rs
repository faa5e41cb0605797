//! Concept explanations from the Gemini text-generation API.
//!
//! [`GeminiClient`] walks a shared [`KeyRing`] of API keys, trying each at most once
//! per request and stopping at the first successful call.

pub mod client;
pub mod keys;

pub use client::{AttemptError, AttemptFailure, GeminiClient, KeysExhausted};
pub use keys::KeyRing;

/// Default Gemini API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default text-generation model.
pub const DEFAULT_MODEL: &str = "gemini-pro";

/// Explanation returned when a successful response carries no `text` field.
pub const MISSING_TEXT_PLACEHOLDER: &str = "AI 응답이 없습니다.";

/// Build the prompt sent for a concept.
pub fn explain_prompt(concept: &str) -> String {
    format!("'{concept}' 개념을 쉽게 설명해줘.")
}
