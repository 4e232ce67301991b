use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    pub database_url: String,
    pub cors_allow_origins: Vec<String>,
    pub api_base: String,
    pub request_timeout: Duration,
    pub refresh_interval: Duration,
    pub reload_interval: Duration,
    pub liked_store_path: PathBuf,
    pub wall_output_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid socket address: {0}")]
    InvalidSocket(String),
    #[error("invalid integer for {0}: {1}")]
    InvalidNumber(&'static str, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };
        let http_addr_raw = env.string("WISHWALL_HTTP_ADDR", "127.0.0.1:5000");
        let http_addr = http_addr_raw
            .parse()
            .map_err(|_| ConfigError::InvalidSocket(http_addr_raw.clone()))?;
        let database_url = env.string("WISHWALL_DATABASE_URL", "sqlite://./data/wishes.db");
        let cors_allow_origins = parse_list(&env.string(
            "WISHWALL_CORS_ALLOW_ORIGINS",
            "http://localhost:8080",
        ));
        let api_base = env.string("WISHWALL_API_BASE", "http://127.0.0.1:5000/api");
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            return Err(ConfigError::InvalidValue("WISHWALL_API_BASE", api_base));
        }
        let request_timeout_secs = env.u64("WISHWALL_REQUEST_TIMEOUT_SECS", 15)?;
        let refresh_interval_secs = env.positive_u64("WISHWALL_REFRESH_INTERVAL_SECS", 60)?;
        let reload_interval_secs = env.positive_u64("WISHWALL_RELOAD_INTERVAL_SECS", 300)?;
        let liked_store_path = PathBuf::from(env.string(
            "WISHWALL_LIKED_STORE",
            "./data/local_storage.json",
        ));
        let wall_output_path = PathBuf::from(env.string("WISHWALL_WALL_OUTPUT", "./data/wall.html"));

        Ok(Self {
            http_addr,
            database_url,
            cors_allow_origins,
            api_base,
            request_timeout: Duration::from_secs(request_timeout_secs),
            refresh_interval: Duration::from_secs(refresh_interval_secs),
            reload_interval: Duration::from_secs(reload_interval_secs),
            liked_store_path,
            wall_output_path,
        })
    }
}

/// Reads `.env` from the working directory when present. Variables already
/// set in the environment win.
pub fn load_dotenv() -> Result<(), std::io::Error> {
    let path = Path::new(".env");
    if !path.exists() {
        return Ok(());
    }
    let contents = std::fs::read_to_string(path)?;
    for (key, value) in contents.lines().filter_map(dotenv_entry) {
        if std::env::var_os(&key).is_some() {
            continue;
        }
        // Safety: runs once at startup, before any task reads the environment.
        unsafe {
            std::env::set_var(key, value);
        }
    }
    Ok(())
}

fn dotenv_entry(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), unquote(value.trim()).to_string()))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn string(&self, key: &'static str, default: &'static str) -> String {
        (self.lookup)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    fn u64(&self, key: &'static str, default: u64) -> Result<u64, ConfigError> {
        let Some(raw) = (self.lookup)(key) else {
            return Ok(default);
        };
        raw.trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(key, raw))
    }

    fn positive_u64(&self, key: &'static str, default: u64) -> Result<u64, ConfigError> {
        let value = self.u64(key, default)?;
        if value == 0 {
            return Err(ConfigError::InvalidValue(key, value.to_string()));
        }
        Ok(value)
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::{dotenv_entry, parse_list, AppConfig, ConfigError};

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_env() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.http_addr.port(), 5000);
        assert_eq!(config.cors_allow_origins, vec!["http://localhost:8080"]);
        assert_eq!(config.refresh_interval, Duration::from_secs(60));
        assert_eq!(config.api_base, "http://127.0.0.1:5000/api");
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("WISHWALL_HTTP_ADDR", "0.0.0.0:9000"),
            ("WISHWALL_CORS_ALLOW_ORIGINS", "https://a.example, https://b.example ,"),
            ("WISHWALL_REFRESH_INTERVAL_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.http_addr.port(), 9000);
        assert_eq!(config.cors_allow_origins.len(), 2);
        assert_eq!(config.refresh_interval, Duration::from_secs(5));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config_from(&[("WISHWALL_HTTP_ADDR", "nope")]),
            Err(ConfigError::InvalidSocket(_))
        ));
        assert!(matches!(
            config_from(&[("WISHWALL_REQUEST_TIMEOUT_SECS", "soon")]),
            Err(ConfigError::InvalidNumber(_, _))
        ));
        assert!(matches!(
            config_from(&[("WISHWALL_REFRESH_INTERVAL_SECS", "0")]),
            Err(ConfigError::InvalidValue(_, _))
        ));
        assert!(matches!(
            config_from(&[("WISHWALL_API_BASE", "localhost:5000")]),
            Err(ConfigError::InvalidValue(_, _))
        ));
    }

    #[test]
    fn dotenv_entries_strip_export_and_quotes() {
        assert_eq!(
            dotenv_entry("export WISHWALL_HTTP_ADDR=0.0.0.0:5000"),
            Some(("WISHWALL_HTTP_ADDR".to_string(), "0.0.0.0:5000".to_string()))
        );
        assert_eq!(
            dotenv_entry(r#"WISHWALL_WALL_OUTPUT = "./out/wall page.html""#),
            Some(("WISHWALL_WALL_OUTPUT".to_string(), "./out/wall page.html".to_string()))
        );
        assert_eq!(
            dotenv_entry("KEY='single'"),
            Some(("KEY".to_string(), "single".to_string()))
        );
        assert_eq!(dotenv_entry("# comment"), None);
        assert_eq!(dotenv_entry("=value"), None);
        assert_eq!(dotenv_entry("no separator"), None);
    }

    #[test]
    fn parse_list_drops_blanks() {
        assert_eq!(parse_list(" * "), vec!["*"]);
        assert!(parse_list(" , ").is_empty());
    }
}
