use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the recommendation server
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Whether the viewer is authenticated against the server.
    ///
    /// Read once at boot and never re-queried. When false, ratings stay
    /// local to the session and are never sent to the server.
    #[serde(default)]
    pub logged_in: bool,
}

fn default_server_url() -> String {
    "http://localhost:5000".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
