//! Client configuration loading (`tagset.toml`).

#![allow(missing_docs)]

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use smol_str::SmolStr;
use tagset_core::{ValueKind, WidgetState, WidgetStore};

use crate::error::ClientError;

pub const DEFAULT_CONFIG_FILE: &str = "tagset.toml";
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:28080";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: SmolStr,
    pub timeout: Duration,
    pub widgets: WidgetStore,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: SmolStr::new(DEFAULT_ENDPOINT),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            widgets: WidgetStore::new(),
        }
    }
}

impl ClientConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            ClientError::InvalidConfig(format!("{}: {err}", path.display()).into())
        })?;
        Self::from_toml(&text)
            .map_err(|err| ClientError::InvalidConfig(format!("{}: {err}", path.display()).into()))
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, ClientError> {
        let raw: ConfigToml =
            toml::from_str(text).map_err(|err| ClientError::InvalidConfig(err.to_string().into()))?;
        raw.into_config()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    client: Option<ClientSection>,
    #[serde(default, rename = "widget")]
    widgets: Vec<WidgetSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClientSection {
    endpoint: Option<String>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WidgetSection {
    id: String,
    tag: String,
    kind: ValueKind,
    size: Option<usize>,
    value: Option<String>,
}

impl ConfigToml {
    fn into_config(self) -> Result<ClientConfig, ClientError> {
        let mut config = ClientConfig::default();
        if let Some(client) = self.client {
            if let Some(endpoint) = client.endpoint {
                config.endpoint = endpoint.trim().into();
            }
            if let Some(timeout_ms) = client.timeout_ms {
                if timeout_ms == 0 {
                    return Err(ClientError::InvalidConfig(
                        "client.timeout_ms must be greater than zero".into(),
                    ));
                }
                config.timeout = Duration::from_millis(timeout_ms);
            }
        }
        for section in self.widgets {
            if config.widgets.get(&section.id).is_some() {
                return Err(ClientError::InvalidConfig(
                    format!("duplicate widget id '{}'", section.id).into(),
                ));
            }
            let mut widget = WidgetState::new(
                section.id.as_str(),
                &section.tag,
                section.kind,
                section.size.unwrap_or(0),
            )?;
            if let Some(value) = section.value {
                // The initial value must be something the widget could send.
                widget.request_for(&value)?;
                widget = widget.with_value(value.trim());
            }
            config.widgets.insert(widget);
        }
        Ok(config)
    }
}
