use serde::Deserialize;

/// Runtime configuration
///
/// Every section is optional; a missing file or an empty one yields the
/// defaults below.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Scan-index search API settings
    #[serde(default)]
    pub search: SearchConfig,
    /// WHOIS registry lookup settings
    #[serde(default)]
    pub whois: WhoisConfig,
    /// Outbound HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scan-index search configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Base URL of the search API
    /// Default: "https://api.shodan.io"
    #[serde(default = "default_search_base_url")]
    pub base_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { base_url: default_search_base_url() }
    }
}

/// WHOIS configuration
#[derive(Debug, Deserialize, Clone)]
pub struct WhoisConfig {
    /// Root server queried first; referrals are followed from here
    /// Default: "whois.iana.org"
    #[serde(default = "default_whois_server")]
    pub server: String,
    /// TCP port used for the root server and every referral
    /// Default: 43
    #[serde(default = "default_whois_port")]
    pub port: u16,
    /// Per-query timeout in seconds
    /// Default: 10
    #[serde(default = "default_whois_timeout")]
    pub timeout_secs: u64,
    /// Maximum number of referrals followed after the root query
    /// Default: 2
    #[serde(default = "default_max_referrals")]
    pub max_referrals: usize,
}

impl Default for WhoisConfig {
    fn default() -> Self {
        Self {
            server: default_whois_server(),
            port: default_whois_port(),
            timeout_secs: default_whois_timeout(),
            max_referrals: default_max_referrals(),
        }
    }
}

/// Outbound HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// User-Agent header sent with favicon and page requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { user_agent: default_user_agent() }
    }
}

/// Logging configuration
/// Logs go to stderr; stdout is reserved for the report
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    /// Default: "info"
    /// Can be overridden at runtime via RUST_LOG environment variable
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Show module path (target) in log messages
    /// Default: false
    #[serde(default)]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), show_target: false }
    }
}

fn default_search_base_url() -> String {
    "https://api.shodan.io".to_string()
}

fn default_whois_server() -> String {
    "whois.iana.org".to_string()
}

fn default_whois_port() -> u16 {
    43
}

fn default_whois_timeout() -> u64 {
    10
}

fn default_max_referrals() -> usize {
    2
}

fn default_user_agent() -> String {
    concat!("favlens/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
