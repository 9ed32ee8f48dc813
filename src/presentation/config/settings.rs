use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{DEFAULT_REPLY_LANGUAGE, DEFAULT_SIGNATURE};

use super::environment::Environment;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Provider key variable honoured in addition to `APP_LLM__API_KEY`.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub prompt: PromptSettings,
    pub extraction: ExtractionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

#[derive(Clone, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_ms: u64,
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptSettings {
    pub reply_language: String,
    pub signature: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub pdf_enabled: bool,
    pub pdf_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub json: bool,
}

impl Settings {
    /// Layers built-in defaults, the optional `appsettings.{env}` file and
    /// `APP_*` environment variables (`__` separates nested keys).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.max_upload_bytes", DEFAULT_MAX_UPLOAD_BYTES as u64)?
            .set_default("llm.base_url", "https://api.openai.com/v1")?
            .set_default("llm.model", "gpt-3.5-turbo")?
            .set_default("llm.temperature", 0.2)?
            .set_default("llm.timeout_ms", 30_000)?
            .set_default("prompt.reply_language", DEFAULT_REPLY_LANGUAGE)?
            .set_default("prompt.signature", DEFAULT_SIGNATURE)?
            .set_default("extraction.pdf_enabled", true)?
            .set_default("extraction.pdf_timeout_secs", 30)?
            .set_default("logging.json", false)?;

        if let Ok(api_key) = std::env::var(OPENAI_API_KEY_VAR) {
            builder = builder.set_default("llm.api_key", api_key)?;
        }

        builder
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
