use std::path::PathBuf;

use anyhow::{bail, Result};
use dotenvy::dotenv;
use serde::Deserialize;

use crate::auth::{AcceptAny, Authenticator, FixedCredentials};

/// Which login check the dashboard uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Any non-empty email and password.
    #[default]
    Any,
    /// Only `ADMIN_EMAIL` / `ADMIN_PASSWORD`.
    Fixed,
}

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub auth_mode: AuthMode,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    /// Max tracing level ("error" .. "trace")
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Where the terminal UI writes its log; it logs nothing when unset
    pub log_file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_mode: AuthMode::default(),
            admin_email: None,
            admin_password: None,
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Build the login check for the configured mode
    pub fn authenticator(&self) -> Result<Box<dyn Authenticator>> {
        match self.auth_mode {
            AuthMode::Any => Ok(Box::new(AcceptAny)),
            AuthMode::Fixed => match (&self.admin_email, &self.admin_password) {
                (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                    Ok(Box::new(FixedCredentials::new(email.clone(), password.clone())))
                }
                _ => bail!("AUTH_MODE=fixed needs both ADMIN_EMAIL and ADMIN_PASSWORD"),
            },
        }
    }

    /// Parsed `log_level`, falling back to INFO for anything unrecognised
    pub fn max_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    // Ensure .env file is loaded
    dotenv().ok();

    let config = Config::load()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let vars = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string()));
        envy::from_iter::<_, Config>(vars).unwrap()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = from_pairs(&[]);
        assert_eq!(config.auth_mode, AuthMode::Any);
        assert_eq!(config.max_level(), tracing::Level::INFO);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn fixed_mode_reads_the_admin_pair() {
        let config = from_pairs(&[
            ("AUTH_MODE", "fixed"),
            ("ADMIN_EMAIL", "admin@des.com"),
            ("ADMIN_PASSWORD", "admin123"),
            ("LOG_LEVEL", "debug"),
        ]);
        assert_eq!(config.max_level(), tracing::Level::DEBUG);
        let auth = config.authenticator().unwrap();
        assert!(auth.login("admin@des.com", "admin123").is_ok());
        assert!(auth.login("someone@des.com", "admin123").is_err());
    }

    #[test]
    fn fixed_mode_without_password_is_an_error() {
        let config = from_pairs(&[("AUTH_MODE", "fixed"), ("ADMIN_EMAIL", "admin@des.com")]);
        assert!(config.authenticator().is_err());
    }
}
