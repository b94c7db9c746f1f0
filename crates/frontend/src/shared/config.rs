use once_cell::sync::OnceCell;
use serde::Deserialize;

static CONFIG: OnceCell<ClientConfig> = OnceCell::new();

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub handshake: HandshakeConfig,
    pub autocomplete: AutocompleteConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Prefix put in front of every backend path; empty for same-origin
    #[serde(default)]
    pub base_path: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PollingConfig {
    pub rekap_secs: u32,
    pub dashboard_secs: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HandshakeConfig {
    pub timeout_ms: u32,
    pub poll_step_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AutocompleteConfig {
    pub min_query_len: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UploadConfig {
    pub max_file_bytes: u64,
}

/// Default configuration embedded in the wasm module
const DEFAULT_CONFIG: &str = r#"
[api]
base_path = ""

[polling]
rekap_secs = 30
dashboard_secs = 300

[handshake]
timeout_ms = 2000
poll_step_ms = 100

[autocomplete]
min_query_len = 2

[upload]
max_file_bytes = 10485760
"#;

impl ClientConfig {
    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let config: ClientConfig = toml::from_str(contents)?;
        if config.handshake.poll_step_ms == 0 {
            anyhow::bail!("handshake.poll_step_ms must be greater than zero");
        }
        Ok(config)
    }

    /// Loads the embedded configuration
    pub fn load() -> anyhow::Result<Self> {
        Self::parse(DEFAULT_CONFIG)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api.base_path.trim_end_matches('/'), path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_path: String::new(),
            },
            polling: PollingConfig {
                rekap_secs: 30,
                dashboard_secs: 300,
            },
            handshake: HandshakeConfig {
                timeout_ms: 2000,
                poll_step_ms: 100,
            },
            autocomplete: AutocompleteConfig { min_query_len: 2 },
            upload: UploadConfig {
                max_file_bytes: 10 * 1024 * 1024,
            },
        }
    }
}

/// Called once from `hydrate`
pub fn install(config: ClientConfig) {
    if CONFIG.set(config).is_err() {
        log::warn!("client config already installed, keeping the first one");
    }
}

pub fn config() -> &'static ClientConfig {
    CONFIG.get_or_init(ClientConfig::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = ClientConfig::load().unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.polling.rekap_secs, 30);
        assert_eq!(config.handshake.timeout_ms, 2000);
    }

    #[test]
    fn test_zero_poll_step_is_rejected() {
        let broken = DEFAULT_CONFIG.replace("poll_step_ms = 100", "poll_step_ms = 0");
        assert!(ClientConfig::parse(&broken).is_err());
    }

    #[test]
    fn test_url_joins_base_path() {
        let mut config = ClientConfig::default();
        assert_eq!(config.url("/api/mandor"), "/api/mandor");
        config.api.base_path = "http://localhost:8080/".into();
        assert_eq!(config.url("/api/mandor"), "http://localhost:8080/api/mandor");
    }
}
