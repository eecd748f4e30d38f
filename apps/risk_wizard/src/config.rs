use std::{fs, io::ErrorKind, path::Path, time::Duration};

use anyhow::{anyhow, Context};
use client_core::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "wizard.toml";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Call the provider directly with a local API key.
    #[default]
    Direct,
    /// Post to a relay endpoint that holds the key.
    Relay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub transport: TransportKind,
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub relay_url: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transport: TransportKind::Direct,
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            relay_url: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    transport: Option<TransportKind>,
    api_key: Option<String>,
    model: Option<String>,
    api_base_url: Option<String>,
    relay_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Where analysis calls go, resolved from `Settings` with its required
/// values present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportTarget {
    Direct {
        api_key: String,
        base_url: String,
        model: String,
    },
    Relay {
        endpoint: String,
    },
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn transport_target(&self) -> anyhow::Result<TransportTarget> {
        match self.transport {
            TransportKind::Direct => {
                let api_key = self.api_key.clone().ok_or_else(|| {
                    anyhow!("direct transport requires an API key (set GEMINI_API_KEY or api_key)")
                })?;
                validate_url(&self.api_base_url, "api_base_url")?;
                if self.model.trim().is_empty() {
                    return Err(anyhow!("model must not be empty"));
                }
                Ok(TransportTarget::Direct {
                    api_key,
                    base_url: self.api_base_url.clone(),
                    model: self.model.clone(),
                })
            }
            TransportKind::Relay => {
                let endpoint = self.relay_url.clone().ok_or_else(|| {
                    anyhow!("relay transport requires a relay URL (set WIZARD_RELAY_URL or relay_url)")
                })?;
                validate_url(&endpoint, "relay_url")?;
                Ok(TransportTarget::Relay { endpoint })
            }
        }
    }
}

pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    };

    resolve_settings(raw.as_deref(), |key| std::env::var(key).ok())
        .with_context(|| format!("invalid configuration in '{}'", path.display()))
}

/// Layers defaults, then the TOML file contents, then environment values
/// looked up through `env`.
pub fn resolve_settings(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        let file_cfg: FileSettings = toml::from_str(raw).context("failed to parse TOML")?;
        if let Some(v) = file_cfg.transport {
            settings.transport = v;
        }
        if let Some(v) = file_cfg.api_key {
            settings.api_key = Some(v);
        }
        if let Some(v) = file_cfg.model {
            settings.model = v;
        }
        if let Some(v) = file_cfg.api_base_url {
            settings.api_base_url = v;
        }
        if let Some(v) = file_cfg.relay_url {
            settings.relay_url = Some(v);
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            settings.request_timeout_secs = v;
        }
    }

    if let Some(v) = env("WIZARD_TRANSPORT") {
        match v.trim().to_ascii_lowercase().as_str() {
            "direct" => settings.transport = TransportKind::Direct,
            "relay" => settings.transport = TransportKind::Relay,
            other => warn!("ignoring unknown WIZARD_TRANSPORT value '{other}'"),
        }
    }

    if let Some(v) = env("API_KEY") {
        settings.api_key = Some(v);
    }
    if let Some(v) = env("GEMINI_API_KEY") {
        settings.api_key = Some(v);
    }

    if let Some(v) = env("GEMINI_MODEL") {
        settings.model = v;
    }
    if let Some(v) = env("GEMINI_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("WIZARD_RELAY_URL") {
        settings.relay_url = Some(v);
    }

    if let Some(v) = env("WIZARD_REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(_) => warn!("ignoring non-numeric WIZARD_REQUEST_TIMEOUT_SECS value '{v}'"),
        }
    }

    settings.api_key = non_blank(settings.api_key);
    settings.relay_url = non_blank(settings.relay_url);
    if settings.request_timeout_secs == 0 {
        return Err(anyhow!("request_timeout_secs must be greater than zero"));
    }

    Ok(settings)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_url(raw: &str, setting: &str) -> anyhow::Result<()> {
    let url = Url::parse(raw).with_context(|| format!("{setting} is not a valid URL: '{raw}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(anyhow!(
            "{setting} must use http or https, got '{scheme}'"
        )),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
