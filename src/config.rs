use crate::utils::constants::{DEFAULT_API_BASE, DEFAULT_DIST_DIR, DEFAULT_PORT};
use crate::utils::get_env::{env_or_default, env_parse_or, get_env_var};
use crate::utils::urls::to_url;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base address {value:?}: {source}")]
    InvalidApiBase {
        value: String,
        source: url::ParseError,
    },
    #[error("API base address {0:?} must use http or https")]
    UnsupportedScheme(String),
}

/// Runtime settings, resolved from the environment (and `.env`) once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: Url,
    pub port: u16,
    pub dist_dir: PathBuf,
    pub session_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base = parse_api_base(&env_or_default("API_BASE", DEFAULT_API_BASE))?;
        let session_dir = get_env_var("SESSION_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_session_dir);

        Ok(Self {
            api_base,
            port: env_parse_or("PORT", DEFAULT_PORT),
            dist_dir: PathBuf::from(env_or_default("DIST_DIR", DEFAULT_DIST_DIR)),
            session_dir,
        })
    }
}

pub fn parse_api_base(raw: &str) -> Result<Url, ConfigError> {
    let url = to_url(raw.trim()).map_err(|source| ConfigError::InvalidApiBase {
        value: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme(raw.to_string())),
    }
}

// lives under the temp dir so the flag does not outlast a reboot
pub fn default_session_dir() -> PathBuf {
    std::env::temp_dir().join("sheetgate-session")
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, parse_api_base};

    #[test]
    fn accepts_http_and_https_bases() {
        assert!(parse_api_base("http://localhost:5000").is_ok());
        assert!(parse_api_base(" https://excel.example.com ").is_ok());
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!(matches!(
            parse_api_base("ftp://files.example.com"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            parse_api_base("no scheme here"),
            Err(ConfigError::InvalidApiBase { .. })
        ));
    }
}
