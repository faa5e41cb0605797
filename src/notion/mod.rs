//! Persistence of concepts and study records as Notion database pages.
//!
//! [`NotionClient`] issues exactly one `POST /v1/pages` per call and never retries.
//! Payload types live in [`schema`].

pub mod client;
pub mod schema;

pub use client::{NotionClient, NotionError, StudyRecordOutcome};
pub use schema::StudyRecord;

/// Default Notion API host.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";

/// `Notion-Version` header value sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";
