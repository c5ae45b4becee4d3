use serde::{Deserialize, Serialize};

use crate::binder::KeyPolicy;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    // Basic auth credentials
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,

    /// Value of the `node_name` path segment when the caller gives none
    #[serde(default = "default_node_name")]
    pub node_name: String,

    #[serde(default)]
    pub key_policy: KeyPolicy,

    /// Request timeout applied by the HTTP transport
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_host() -> String {
    "http://127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5984
}

fn default_node_name() -> String {
    "_local".to_string()
}

impl ClientConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn base_url(&self) -> String {
        format!("{}:{}", self.host.trim_end_matches('/'), self.port)
    }

    pub fn with_credentials(mut self, name: impl Into<String>, password: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.password = Some(password.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            name: None,
            password: None,
            node_name: default_node_name(),
            key_policy: KeyPolicy::default(),
            timeout_secs: None,
        }
    }
}
