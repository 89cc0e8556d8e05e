use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, bail};

/// Sample-config secrets that must never reach production.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me-to-a-random-string",
    "dev-secret-change-me",
    "secret",
    "changeme",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub jwt_secret: String,
}

impl Config {
    /// Read every setting from the environment (after `.env`, if any, is loaded).
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let jwt_secret = get("CHIRP_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("CHIRP_JWT_SECRET must be set to a strong random value");
        }

        let host = get("CHIRP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match get("CHIRP_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("CHIRP_PORT is not a valid port: {}", raw))?,
            None => 3000,
        };
        let db_path = get("CHIRP_DB_PATH")
            .unwrap_or_else(|| "chirp.db".into())
            .into();

        Ok(Self {
            host,
            port,
            db_path,
            jwt_secret,
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply() {
        let config = load(&[("CHIRP_JWT_SECRET", "k3y")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.db_path, PathBuf::from("chirp.db"));
        assert_eq!(config.addr().unwrap().port(), 3000);
    }

    #[test]
    fn missing_or_placeholder_secret_is_fatal() {
        assert!(load(&[]).is_err());
        assert!(load(&[("CHIRP_JWT_SECRET", "")]).is_err());
        assert!(load(&[("CHIRP_JWT_SECRET", "dev-secret-change-me")]).is_err());
    }

    #[test]
    fn overrides_and_bad_port() {
        let config = load(&[
            ("CHIRP_JWT_SECRET", "k3y"),
            ("CHIRP_HOST", "127.0.0.1"),
            ("CHIRP_PORT", "8080"),
            ("CHIRP_DB_PATH", "/tmp/x.db"),
        ])
        .unwrap();
        assert_eq!(config.addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.db_path, PathBuf::from("/tmp/x.db"));

        assert!(load(&[("CHIRP_JWT_SECRET", "k3y"), ("CHIRP_PORT", "http")]).is_err());
    }
}
