use data_loader::VectorizerConfig;
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// CSV dataset with title, genres, keywords and rating columns
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Recommendations returned per request
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Largest accepted favorites list
    #[serde(default = "default_max_favorites")]
    pub max_favorites: usize,

    /// Vocabulary cap for the TF-IDF vectorizer
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Directory with the browser client, served at `/` when set
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/movies.csv")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_top_n() -> usize {
    pipeline::DEFAULT_TOP_N
}

fn default_max_favorites() -> usize {
    10
}

fn default_max_features() -> usize {
    VectorizerConfig::default().max_features
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            host: default_host(),
            port: default_port(),
            top_n: default_top_n(),
            max_favorites: default_max_favorites(),
            max_features: default_max_features(),
            static_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn vectorizer_config(&self) -> VectorizerConfig {
        VectorizerConfig {
            max_features: self.max_features,
            ..VectorizerConfig::default()
        }
    }
}
