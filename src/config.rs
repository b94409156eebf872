use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

#[cfg(target_arch = "wasm32")]
use web_sys::window;

/// Element id of the optional JSON config block in the host page.
#[cfg(target_arch = "wasm32")]
pub const CONFIG_ELEMENT_ID: &str = "player-config";

const DEFAULT_STREAM_URL: &str =
    "http://radio-fm-azuracast-5cca97-38-242-235-54.traefik.me:8000/radio.mp3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid player config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("player config lists no stream endpoints")]
    NoEndpoints,
    #[error("unsupported stream URL (expected http or https): {0}")]
    UnsupportedScheme(String),
}

/// Player settings, fixed for the lifetime of the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerConfig {
    pub station_name: String,
    /// Primary first, then fallbacks in the order they are tried.
    pub endpoints: Vec<String>,
    pub fallback_delay_ms: u64,
    /// Pause between `load()` and `play()` on a user-initiated start.
    pub load_settle_ms: u64,
    pub retry_on_online: bool,
    pub autoplay_on_reconnect: bool,
    pub initial_volume: u8,
    pub error_hint: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            station_name: "Ecou FM".to_string(),
            endpoints: vec![DEFAULT_STREAM_URL.to_string()],
            fallback_delay_ms: 500,
            load_settle_ms: 100,
            retry_on_online: true,
            autoplay_on_reconnect: false,
            initial_volume: 80,
            error_hint: "Nu s-a putut conecta la stream. Verifică că stream-ul este activ în AzuraCast."
                .to_string(),
        }
    }
}

impl PlayerConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: PlayerConfig = serde_json::from_str(raw)?;
        config.validated()
    }

    /// Trims endpoints, drops blanks, checks schemes and clamps the volume.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.endpoints = self
            .endpoints
            .into_iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();
        if self.endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints);
        }
        if let Some(bad) = self
            .endpoints
            .iter()
            .find(|url| !(url.starts_with("http://") || url.starts_with("https://")))
        {
            return Err(ConfigError::UnsupportedScheme(bad.clone()));
        }
        self.initial_volume = self.initial_volume.min(100);
        Ok(self)
    }

    pub fn start_volume(&self) -> u8 {
        self.initial_volume.min(100)
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }

    pub fn load_settle(&self) -> Duration {
        Duration::from_millis(self.load_settle_ms)
    }
}

/// Reads the page's config block, falling back to defaults on any problem.
#[cfg(target_arch = "wasm32")]
pub fn load_config() -> PlayerConfig {
    let raw = window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());
    resolve_config(raw.as_deref())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> PlayerConfig {
    resolve_config(None)
}

fn resolve_config(raw: Option<&str>) -> PlayerConfig {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return PlayerConfig::default();
    };
    match PlayerConfig::from_json(raw) {
        Ok(config) => config,
        Err(err) => {
            warn!("{err}; using built-in player config");
            PlayerConfig::default()
        }
    }
}
