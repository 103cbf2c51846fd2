use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{PixelSeekerError, Result};

/// Environment variable holding the catalog-search credential.
pub const CATALOG_API_KEY_ENV: &str = "RAWG_API_KEY";
/// Environment variable holding the dialogue-service credential.
pub const DIALOGUE_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable overriding the dialogue model identifier.
pub const DIALOGUE_MODEL_ENV: &str = "OPENAI_MODEL_NAME";

const DEFAULT_PERSONA: &str = "You are PixelSeeker, an expert in video games. Help users find games \
based on their preferences, recommend trending titles, and answer any gaming-related questions. \
Respond in an engaging and knowledgeable manner.";

const DEFAULT_WELCOME: &str = "Welcome to PixelSeeker! Ask me for game recommendations by genre, \
style, or keywords like \"first-person shooters\" or \"RPGs\".";

/// Top-level configuration for PixelSeeker.
///
/// Loaded from `~/.pixelseeker/config.toml` by default. Every section falls
/// back to its defaults when absent, so an empty file is a valid config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PixelSeekerConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub dialogue: DialogueConfig,
}

impl PixelSeekerConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PixelSeekerConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Overlay credentials and the model name from process environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary key lookup. Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup(CATALOG_API_KEY_ENV) {
            self.catalog.api_key = key;
        }
        if let Some(key) = lookup(DIALOGUE_API_KEY_ENV) {
            self.dialogue.api_key = key;
        }
        if let Some(model) = lookup(DIALOGUE_MODEL_ENV) {
            self.dialogue.model = model;
        }
    }

    /// Check that the values the conversation core relies on are usable.
    pub fn validate(&self) -> Result<()> {
        if self.assistant.name.trim().is_empty() {
            return Err(PixelSeekerError::Config(
                "assistant.name must not be empty".to_string(),
            ));
        }
        if self.catalog.trigger.trim().is_empty() {
            return Err(PixelSeekerError::Config(
                "catalog.trigger must not be empty".to_string(),
            ));
        }
        if self.catalog.page_size == 0 {
            return Err(PixelSeekerError::Config(
                "catalog.page_size must be at least 1".to_string(),
            ));
        }
        if self.dialogue.model.trim().is_empty() {
            return Err(PixelSeekerError::Config(
                "dialogue.model must not be empty".to_string(),
            ));
        }
        if self.catalog.api_key.is_empty() {
            warn!("No catalog API key configured; set {}", CATALOG_API_KEY_ENV);
        }
        if self.dialogue.api_key.is_empty() {
            warn!("No dialogue API key configured; set {}", DIALOGUE_API_KEY_ENV);
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Assistant identity and the fixed texts shown around the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Sender identity used for every assistant-produced message.
    pub name: String,
    /// The message the transcript is seeded with.
    pub welcome_message: String,
    /// Text shown while a request is outstanding.
    pub typing_label: String,
    /// Prompt shown next to the input line.
    pub input_prompt: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: "PixelSeeker".to_string(),
            welcome_message: DEFAULT_WELCOME.to_string(),
            typing_label: "PixelSeeker is typing...".to_string(),
            input_prompt: "What game genre are you looking for?".to_string(),
        }
    }
}

/// Game-catalog search service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Search endpoint URL.
    pub endpoint: String,
    /// Credential sent as the `key` query parameter.
    pub api_key: String,
    /// Maximum number of games per lookup.
    pub page_size: u32,
    /// Substring that routes an utterance to a catalog lookup.
    pub trigger: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.rawg.io/api/games".to_string(),
            api_key: String::new(),
            page_size: 5,
            trigger: "recommend".to_string(),
        }
    }
}

/// Generative dialogue service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// Chat-completions endpoint URL.
    pub endpoint: String,
    /// Bearer credential.
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// System directive prepended to every request.
    pub persona: String,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            persona: DEFAULT_PERSONA.to_string(),
        }
    }
}
