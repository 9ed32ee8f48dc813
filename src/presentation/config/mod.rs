mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    DEFAULT_MAX_UPLOAD_BYTES, ExtractionSettings, LlmSettings, LoggingSettings,
    OPENAI_API_KEY_VAR, PromptSettings, ServerSettings, Settings,
};
