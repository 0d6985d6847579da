//! Configuration module for meetnotes
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{
    EditorSettings, GeneralSettings, LlmSettings, ServerSettings, Settings, ShareSettings,
};
