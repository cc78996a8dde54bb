use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://cmsweb.cern.ch/sitedb/data/prod/";
const JSON_TYPE: &str = "application/json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("bad config file: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("bad endpoint url: {0}")]
    UrlError(#[from] url::ParseError),
}

// Every field is optional in the file, a missing file means all defaults
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub sitedb: SiteDbConfig,
    pub drop: DropConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SiteDbConfig {
    pub endpoint: String,

    // Falls back to the environment, see `sitedb::cache::default_cache_dir`
    pub cache_dir: Option<PathBuf>,

    /// How long a cached response is served before it is fetched again
    pub cache_duration_secs: u64,
    pub timeout_secs: u64,

    pub accept_type: String,
    pub content_type: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DropConfig {
    /// Service used when the command line does not name one
    pub service: Option<String>,
}

impl Default for SiteDbConfig {
    fn default() -> Self {
        SiteDbConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            cache_dir: None,
            cache_duration_secs: 30 * 60,
            timeout_secs: 30,
            accept_type: JSON_TYPE.to_string(),
            content_type: JSON_TYPE.to_string(),
        }
    }
}

impl SiteDbConfig {
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        Ok(Url::parse(&self.endpoint)?)
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            None => Ok(Config::default()),
            Some(p) => Ok(toml::from_str(&fs::read_to_string(p)?)?),
        }
    }
}
