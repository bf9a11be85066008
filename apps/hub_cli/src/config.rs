use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::{anyhow, Result};
use hub_core::controller::DEFAULT_MAP_TARGET;
use info_service::{ServiceConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT};
use serde::Deserialize;
use shared::domain::Language;

pub const SETTINGS_FILE: &str = "hub.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub model: String,
    pub language: Language,
    pub request_timeout_seconds: u64,
    pub default_map_target: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            language: Language::En,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            default_map_target: DEFAULT_MAP_TARGET.into(),
        }
    }
}

impl Settings {
    /// Transport settings for the information service; fails when no key is configured.
    pub fn service_config(&self) -> Result<ServiceConfig> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                anyhow!("no API key configured: set GEMINI_API_KEY or api_key in {SETTINGS_FILE}")
            })?;

        Ok(ServiceConfig {
            base_url: self.api_base_url.clone(),
            api_key: api_key.to_string(),
            model: self.model.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_seconds),
        })
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then the flat `key = "value"` file, then environment variables.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            for (key, value) in &file_cfg {
                apply(&mut settings, key, value);
            }
        }
    }

    let overrides = [
        ("GEMINI_API_KEY", "api_key"),
        ("APP__API_KEY", "api_key"),
        ("GEMINI_API_BASE_URL", "api_base_url"),
        ("APP__API_BASE_URL", "api_base_url"),
        ("GEMINI_MODEL", "model"),
        ("APP__MODEL", "model"),
        ("APP__LANGUAGE", "language"),
        ("APP__REQUEST_TIMEOUT_SECONDS", "request_timeout_seconds"),
        ("APP__DEFAULT_MAP_TARGET", "default_map_target"),
    ];
    for (var, key) in overrides {
        if let Some(value) = env(var) {
            apply(&mut settings, key, &value);
        }
    }

    settings
}

fn apply(settings: &mut Settings, key: &str, value: &str) {
    match key {
        "api_key" => settings.api_key = Some(value.to_string()),
        "api_base_url" => settings.api_base_url = value.to_string(),
        "model" => settings.model = value.to_string(),
        "language" => {
            if let Some(language) = Language::from_code(value.trim()) {
                settings.language = language;
            }
        }
        "request_timeout_seconds" => {
            if let Ok(parsed) = value.trim().parse::<u64>() {
                settings.request_timeout_seconds = parsed;
            }
        }
        "default_map_target" => settings.default_map_target = value.to_string(),
        _ => {}
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
