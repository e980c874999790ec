use std::env;
use std::time::Duration;

/// 占位凭据前缀，视为未配置
const PLACEHOLDER_PREFIX: &str = "your-";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub redis_url: Option<String>,
    pub drive_file_id: Option<String>,
    pub drive_api_key: Option<String>,
    pub drive_api_base: String,
    pub drive_timeout_secs: u64,
    pub roster_cache_ttl_secs: u64,
    pub session_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            api_base_uri: "/api".to_string(),
            redis_url: None,
            drive_file_id: None,
            drive_api_key: None,
            drive_api_base: "https://www.googleapis.com".to_string(),
            drive_timeout_secs: 10,
            roster_cache_ttl_secs: 5 * 60,
            session_ttl_secs: 30 * 60,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源构建配置，缺失或格式错误的数值使用默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let number = |key: &str, default: u64| {
            var(key)
                .and_then(|v| v.trim_end_matches('s').parse::<u64>().ok())
                .unwrap_or(default)
        };

        Config {
            server_host: var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: var("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            api_base_uri: var("API_BASE_URI").unwrap_or(defaults.api_base_uri),
            redis_url: var("REDIS_URL"),
            drive_file_id: var("DRIVE_FILE_ID").filter(|v| !is_placeholder(v)),
            drive_api_key: var("DRIVE_API_KEY").filter(|v| !is_placeholder(v)),
            drive_api_base: var("DRIVE_API_BASE").unwrap_or(defaults.drive_api_base),
            drive_timeout_secs: number("DRIVE_TIMEOUT_SECS", defaults.drive_timeout_secs),
            roster_cache_ttl_secs: number("ROSTER_CACHE_TTL_SECS", defaults.roster_cache_ttl_secs),
            session_ttl_secs: number("SESSION_TTL_SECS", defaults.session_ttl_secs),
        }
    }

    /// 文件ID与API密钥齐全时才启用远程拉取
    pub fn drive_credentials(&self) -> Option<(&str, &str)> {
        match (&self.drive_file_id, &self.drive_api_key) {
            (Some(id), Some(key)) => Some((id.as_str(), key.as_str())),
            _ => None,
        }
    }

    pub fn drive_timeout(&self) -> Duration {
        Duration::from_secs(self.drive_timeout_secs)
    }

    pub fn roster_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.roster_cache_ttl_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

fn is_placeholder(value: &str) -> bool {
    value.starts_with(PLACEHOLDER_PREFIX)
}
