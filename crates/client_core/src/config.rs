use std::{fs, io, path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::error::SettingsError;

pub const SETTINGS_FILE: &str = "lab.toml";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Base URL of the generation/log backend, always ending in `/`.
    pub api_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn with_api_url(mut self, raw: &str) -> Result<Self, SettingsError> {
        self.api_url = normalize_api_url(raw)?;
        Ok(self)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

pub fn load_settings() -> Result<ClientSettings, SettingsError> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then the settings file if present, then environment overrides.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, SettingsError> {
    let mut settings = ClientSettings::default();

    let file_cfg = read_file_settings(path)?;
    if let Some(v) = file_cfg.api_url {
        settings.api_url = normalize_api_url(&v)?;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        if v == 0 {
            return Err(SettingsError::Timeout { raw: v.to_string() });
        }
        settings.request_timeout_secs = v;
    }

    let non_empty = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("LAB_API_URL") {
        settings.api_url = normalize_api_url(&v)?;
    }
    if let Some(v) = non_empty("APP__API_URL") {
        settings.api_url = normalize_api_url(&v)?;
    }
    if let Some(v) = non_empty("LAB_REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = v
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(SettingsError::Timeout { raw: v })?;
    }

    Ok(settings)
}

fn read_file_settings(path: &Path) -> Result<FileSettings, SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(FileSettings::default()),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };

    toml::from_str(&raw).map_err(|source| SettingsError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn normalize_api_url(raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    let with_slash = if with_scheme.ends_with('/') {
        with_scheme
    } else {
        format!("{with_scheme}/")
    };

    Url::parse(&with_slash)
        .map(String::from)
        .map_err(|source| SettingsError::ApiUrl {
            raw: raw.to_string(),
            source,
        })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
