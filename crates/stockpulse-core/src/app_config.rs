use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide configuration, loaded once at startup from the environment.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Path to the pretrained classifier weights artifact (JSON).
    pub model_path: PathBuf,
    /// Forum sources to collect from, in run order.
    pub sources: Vec<String>,
    pub feed_base_url: String,
    pub feed_user_agent: String,
    pub feed_request_timeout_secs: u64,
    /// Items requested per page. The feed may silently cap this.
    pub feed_page_limit: u32,
    /// Maximum pages fetched per source per run.
    pub feed_page_count: usize,
    /// Courtesy pause between page requests to one source.
    pub feed_inter_page_delay_secs: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("model_path", &self.model_path)
            .field("sources", &self.sources)
            .field("feed_base_url", &self.feed_base_url)
            .field("feed_user_agent", &self.feed_user_agent)
            .field(
                "feed_request_timeout_secs",
                &self.feed_request_timeout_secs,
            )
            .field("feed_page_limit", &self.feed_page_limit)
            .field("feed_page_count", &self.feed_page_count)
            .field(
                "feed_inter_page_delay_secs",
                &self.feed_inter_page_delay_secs,
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
