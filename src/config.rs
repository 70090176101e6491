use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub fedora: FedoraConfig,
    pub triplestore: TriplestoreConfig,
    pub templates: TemplateConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
    pub http_port: u16,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FedoraConfig {
    /// Repository root, e.g. `http://localhost:8080/fcrepo/rest`
    pub base_uri: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TriplestoreConfig {
    /// SPARQL endpoint that indexes the repository
    pub endpoint: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory whose files override the built-in templates by name
    pub dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0".to_string(),
            http_port: 8000,
        }
    }
}

impl Default for FedoraConfig {
    fn default() -> Self {
        Self {
            base_uri: "http://localhost:8080/fcrepo/rest".to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for TriplestoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/bigdata/namespace/kb/sparql".to_string(),
            timeout_secs: None,
        }
    }
}

impl FedoraConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl TriplestoreConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Read the configuration from a TOML file. A missing path yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        Config::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Config> {
        Ok(toml::from_str(text)?)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.listen, self.server.http_port)
    }
}
