//! HTTP handlers. One module per endpoint.

pub mod explain_concept;
pub mod health;
pub mod save_study;

pub use explain_concept::explain_concept;
pub use health::home;
pub use save_study::save_study;

use crate::gemini::GeminiClient;
use crate::notion::NotionClient;

/// Shared state handed to every handler. The Gemini key cursor inside is process-wide.
pub struct AppState {
    pub gemini: GeminiClient,
    pub notion: NotionClient,
}

impl AppState {
    pub fn from_config(config: &crate::config::StudybotConfig) -> anyhow::Result<Self> {
        Ok(Self {
            gemini: GeminiClient::new(&config.gemini)?,
            notion: NotionClient::new(&config.notion)?,
        })
    }
}
