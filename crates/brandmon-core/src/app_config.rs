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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Bearer credential for the Twitter API v2 source. `None` skips that source.
    pub twitter_bearer_token: Option<String>,
    pub snscrape_bin: String,
    pub twitter_api_base_url: String,
    pub api_timeout_secs: u64,
    pub classifier_url: String,
    pub classifier_timeout_secs: u64,
    pub user_agent: String,
    pub default_limit: usize,
    pub neutral_lo: f64,
    pub neutral_hi: f64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "twitter_bearer_token",
                &self.twitter_bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .field("snscrape_bin", &self.snscrape_bin)
            .field("twitter_api_base_url", &self.twitter_api_base_url)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("classifier_url", &self.classifier_url)
            .field("classifier_timeout_secs", &self.classifier_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("default_limit", &self.default_limit)
            .field("neutral_lo", &self.neutral_lo)
            .field("neutral_hi", &self.neutral_hi)
            .finish()
    }
}
