//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Generation backend settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Summary editor settings
    #[serde(default)]
    pub editor: EditorSettings,

    /// Share-by-email settings
    #[serde(default)]
    pub share: ShareSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Largest transcript accepted, from a file or over HTTP
    #[serde(default = "default_max_transcript_bytes")]
    pub max_transcript_bytes: usize,

    /// Ceiling on a single backend call before it is treated as failed
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (groq, gemini)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key
    #[serde(default)]
    pub api_key: String,

    /// Model name (empty = provider default)
    #[serde(default)]
    pub model: String,

    /// API endpoint (empty = provider default)
    #[serde(default)]
    pub endpoint: String,

    /// Upper bound on generated tokens
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Sampling temperature; kept low so repeated runs stay consistent
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Quiet period after the last edit before the draft is flushed
    #[serde(default = "default_autosave_ms")]
    pub autosave_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareSettings {
    /// Default email subject
    #[serde(default = "default_share_subject")]
    pub subject: String,

    /// Default message placed above the summary
    #[serde(default = "default_share_message")]
    pub message: String,

    /// Simulated delivery delay of the stub mailer
    #[serde(default = "default_send_delay_ms")]
    pub send_delay_ms: u64,
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_max_transcript_bytes() -> usize {
    1024 * 1024
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_llm_provider() -> String {
    "groq".to_string()
}

fn default_max_output_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.3
}

fn default_autosave_ms() -> u64 {
    1000
}

fn default_share_subject() -> String {
    "Meeting Summary".to_string()
}

fn default_share_message() -> String {
    "Please find the meeting summary attached below.".to_string()
}

fn default_send_delay_ms() -> u64 {
    1000
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_transcript_bytes: default_max_transcript_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: String::new(),
            endpoint: String::new(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            autosave_ms: default_autosave_ms(),
        }
    }
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            subject: default_share_subject(),
            message: default_share_message(),
            send_delay_ms: default_send_delay_ms(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            server: ServerSettings::default(),
            llm: LlmSettings::default(),
            editor: EditorSettings::default(),
            share: ShareSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Parse settings from TOML text; missing sections fall back to defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if self.llm.api_key.trim().is_empty() {
            let provider_var = match self.llm.provider.to_lowercase().as_str() {
                "gemini" => "GEMINI_API_KEY",
                _ => "GROQ_API_KEY",
            };
            for var in ["MEETNOTES_API_KEY", provider_var] {
                if let Ok(key) = std::env::var(var) {
                    if !key.trim().is_empty() {
                        self.llm.api_key = key;
                        break;
                    }
                }
            }
        }

        if let Ok(addr) = std::env::var("MEETNOTES_BIND_ADDR") {
            if !addr.trim().is_empty() {
                self.server.bind_addr = addr.trim().to_string();
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "meetnotes", "meetnotes")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &PathBuf) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Ceiling on one backend call
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    /// Autosave quiet period
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.editor.autosave_ms)
    }

    /// Stub mailer delivery delay
    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.share.send_delay_ms)
    }
}
