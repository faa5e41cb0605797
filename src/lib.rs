//! Study helper API: explains concepts with Google Gemini and records them in Notion.
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | `GET` | `/` | Liveness string |
//! | `POST` | `/api/explain_concept` | Explain `{"개념": ...}` with Gemini, save the pair to Notion |
//! | `POST` | `/save_study` | Save a structured study record to Notion |
//!
//! # Key failover
//!
//! Several Gemini API keys can be configured. Each request tries them in order from
//! a process-wide cursor, at most once each, and stops at the first that works. The
//! cursor is not reset afterwards, so the next request starts from the key that last
//! succeeded.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`gemini`] — Key ring and Gemini `generateText` client
//! - [`notion`] — Notion page payloads and client
//! - [`handlers`] — axum handlers and shared state
//! - [`server`] — Router construction and the serve loop

pub mod config;
pub mod error;
pub mod gemini;
pub mod handlers;
pub mod notion;
pub mod server;
