use std::path::PathBuf;

use lectern_api::SessionSettings;
use lectern_api::bootstrap::{AdminCredentials, BootstrapConfig};

/// Placeholder secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me",
    "dev-secret-change-me",
    "your-secret-key-change-this-in-production",
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("LECTERN_SECRET_KEY is unset or still a placeholder")]
    MissingSecret,

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error("LECTERN_ADMIN_USERNAME and LECTERN_ADMIN_PASSWORD must be set together")]
    PartialAdmin,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub session: SessionSettings,
    pub bootstrap: BootstrapConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let secret = var("LECTERN_SECRET_KEY").ok_or(ConfigError::MissingSecret)?;
        if PLACEHOLDER_SECRETS.contains(&secret.as_str()) {
            return Err(ConfigError::MissingSecret);
        }

        let port = parse_or("LECTERN_PORT", var("LECTERN_PORT"), 5000)?;
        let lifetime_days = parse_or("LECTERN_SESSION_DAYS", var("LECTERN_SESSION_DAYS"), 7i64)?;
        if lifetime_days < 1 {
            return Err(ConfigError::Invalid {
                name: "LECTERN_SESSION_DAYS",
                value: lifetime_days.to_string(),
            });
        }
        let secure_cookies = parse_flag("LECTERN_SECURE_COOKIES", var("LECTERN_SECURE_COOKIES"), false)?;
        let seed_teachers = parse_flag("LECTERN_SEED_TEACHERS", var("LECTERN_SEED_TEACHERS"), true)?;

        let admin = match (var("LECTERN_ADMIN_USERNAME"), var("LECTERN_ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(AdminCredentials { username, password }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialAdmin),
        };

        Ok(Self {
            host: var("LECTERN_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            db_path: var("LECTERN_DB_PATH").unwrap_or_else(|| "lectern.db".into()).into(),
            session: SessionSettings {
                secret,
                lifetime_days,
                secure_cookies,
            },
            bootstrap: BootstrapConfig { admin, seed_teachers },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
    }
}

fn parse_flag(name: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    match raw.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(_) => Err(ConfigError::Invalid {
            name,
            value: raw.unwrap_or_default(),
        }),
    }
}
