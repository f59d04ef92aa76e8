use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Discogs API base URL
    #[serde(default = "default_discogs_api_url")]
    pub discogs_api_url: String,

    /// User-Agent sent upstream; Discogs rejects requests without one
    #[serde(default = "default_discogs_user_agent")]
    pub discogs_user_agent: String,

    /// Optional Discogs personal access token
    #[serde(default)]
    pub discogs_token: Option<String>,

    /// Page size used when walking a whole collection
    #[serde(default = "default_collection_page_size")]
    pub collection_page_size: u32,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_discogs_api_url() -> String {
    "https://api.discogs.com".to_string()
}

fn default_discogs_user_agent() -> String {
    format!("overlap-api/{}", env!("CARGO_PKG_VERSION"))
}

fn default_collection_page_size() -> u32 {
    100
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discogs_api_url: default_discogs_api_url(),
            discogs_user_agent: default_discogs_user_agent(),
            discogs_token: None,
            collection_page_size: default_collection_page_size(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
