use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Prefix of the numbered Gemini key variables (`GOOGLE_GEMINI_API_KEY_1`, `_2`, ...).
pub const GEMINI_KEY_ENV_PREFIX: &str = "GOOGLE_GEMINI_API_KEY_";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StudybotConfig {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub notion: NotionConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    /// Ordered credential list. Empty strings are kept as empty slots.
    pub api_keys: Vec<String>,
    /// Request timeout. Unset means outbound calls wait indefinitely.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NotionConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub database_id: Option<String>,
    pub version: String,
    pub timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
            log_level: "info".into(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: crate::gemini::DEFAULT_BASE_URL.into(),
            model: crate::gemini::DEFAULT_MODEL.into(),
            api_keys: Vec::new(),
            timeout_secs: None,
        }
    }
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            base_url: crate::notion::DEFAULT_BASE_URL.into(),
            api_key: None,
            database_id: None,
            version: crate::notion::NOTION_VERSION.into(),
            timeout_secs: None,
        }
    }
}

impl GeminiConfig {
    /// Number of key slots holding a non-empty credential.
    pub fn usable_keys(&self) -> usize {
        self.api_keys.iter().filter(|k| !k.is_empty()).count()
    }
}

impl NotionConfig {
    /// Both the integration token and the target database are set.
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
            && self.database_id.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// Returns `~/.studybot/`
pub fn default_studybot_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".studybot")
}

/// Returns the default config file path: `~/.studybot/config.toml`
pub fn default_config_path() -> PathBuf {
    default_studybot_dir().join("config.toml")
}

impl StudybotConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            StudybotConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Some(keys) = gemini_keys_from_vars(std::env::vars()) {
            self.gemini.api_keys = keys;
        }
        if let Ok(val) = std::env::var("NOTION_API_KEY") {
            self.notion.api_key = Some(val);
        }
        if let Ok(val) = std::env::var("NOTION_DATABASE_ID") {
            self.notion.database_id = Some(val);
        }
        if let Ok(val) = std::env::var("STUDYBOT_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("STUDYBOT_PORT") {
            match val.parse() {
                Ok(port) => self.server.port = port,
                Err(e) => warn!(value = %val, error = %e, "ignoring invalid STUDYBOT_PORT"),
            }
        }
        if let Ok(val) = std::env::var("STUDYBOT_LOG_LEVEL") {
            self.server.log_level = val;
        }
    }

    /// Fail fast on configurations that cannot serve explanations.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.gemini.usable_keys() > 0,
            "no Gemini API key configured; set {GEMINI_KEY_ENV_PREFIX}1 (and _2, _3, ... for failover) \
             or gemini.api_keys in the config file"
        );
        if !self.notion.is_configured() {
            warn!("NOTION_API_KEY or NOTION_DATABASE_ID not set; explanations will not be saved");
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Collect numbered Gemini keys from `(name, value)` pairs, ordered by suffix.
///
/// Returns `None` when no numbered variable is present so the file config stays in effect.
pub fn gemini_keys_from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Option<Vec<String>> {
    let mut numbered: Vec<(u32, String)> = vars
        .into_iter()
        .filter_map(|(name, value)| {
            let index = name.strip_prefix(GEMINI_KEY_ENV_PREFIX)?.parse::<u32>().ok()?;
            (index > 0).then_some((index, value))
        })
        .collect();

    if numbered.is_empty() {
        return None;
    }

    numbered.sort_by_key(|(index, _)| *index);
    Some(numbered.into_iter().map(|(_, value)| value).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn default_config_is_valid_shape() {
        let config = StudybotConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.gemini.model, "gemini-pro");
        assert_eq!(config.notion.version, "2022-06-28");
        assert!(config.gemini.api_keys.is_empty());
        assert!(config.gemini.timeout_secs.is_none());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[server]
port = 8080

[gemini]
api_keys = ["first", "", "third"]
timeout_secs = 30

[notion]
api_key = "secret_abc"
database_id = "db123"
"#;
        let config: StudybotConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.gemini.api_keys, vec!["first", "", "third"]);
        assert_eq!(config.gemini.usable_keys(), 2);
        assert_eq!(config.gemini.timeout_secs, Some(30));
        assert!(config.notion.is_configured());
        // defaults still apply for unset fields
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.notion.base_url, "https://api.notion.com");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nlog_level = \"debug\"\n").unwrap();

        let config = StudybotConfig::load_from(&path).unwrap();
        assert_eq!(config.server.log_level, "debug");
    }

    #[test]
    fn numbered_keys_are_ordered_by_suffix() {
        let keys = gemini_keys_from_vars(vars(&[
            ("GOOGLE_GEMINI_API_KEY_3", "c"),
            ("PATH", "/usr/bin"),
            ("GOOGLE_GEMINI_API_KEY_1", "a"),
            ("GOOGLE_GEMINI_API_KEY_10", "j"),
            ("GOOGLE_GEMINI_API_KEY_2", ""),
        ]))
        .unwrap();
        assert_eq!(keys, vec!["a", "", "c", "j"]);
    }

    #[test]
    fn malformed_key_names_are_ignored() {
        let keys = gemini_keys_from_vars(vars(&[
            ("GOOGLE_GEMINI_API_KEY_", "x"),
            ("GOOGLE_GEMINI_API_KEY_0", "zero"),
            ("GOOGLE_GEMINI_API_KEY_one", "y"),
        ]));
        assert!(keys.is_none());
    }

    #[test]
    fn validate_requires_a_usable_key() {
        let mut config = StudybotConfig::default();
        config.gemini.api_keys = vec![String::new(), String::new()];
        assert!(config.validate().is_err());

        config.gemini.api_keys.push("real".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn notion_requires_both_key_and_database() {
        let mut notion = NotionConfig::default();
        assert!(!notion.is_configured());
        notion.api_key = Some("secret".into());
        assert!(!notion.is_configured());
        notion.database_id = Some(String::new());
        assert!(!notion.is_configured());
        notion.database_id = Some("db".into());
        assert!(notion.is_configured());
    }
}
