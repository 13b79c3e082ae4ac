use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 5;
pub const DEFAULT_MEDIA_ROOT: &str = "media";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} not set")]
    Missing(&'static str),
    #[error("environment variable {key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub db: DbConfig,
    pub auth: AuthConfig,
    pub media_root: PathBuf,
}

#[derive(Clone, Debug)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub min_password_length: usize,
    /// `None` keeps tokens valid until logout.
    pub token_ttl: Option<Duration>,
    pub users_list_requires_auth: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            token_ttl: None,
            users_list_requires_auth: false,
        }
    }
}

impl AppConfig {
    fn get_env(key: &'static str) -> Result<String, ConfigError> {
        env::var(key).map_err(|_| ConfigError::Missing(key))
    }

    fn get_env_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
        match env::var(key) {
            Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
            Err(_) => Ok(default),
        }
    }

    fn get_env_opt<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
        match env::var(key) {
            Ok(value) if value.trim().is_empty() => Ok(None),
            Ok(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::Invalid { key, value }),
            Err(_) => Ok(None),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let ttl_secs: Option<u64> = Self::get_env_opt("TOKEN_TTL_SECS")?;

        Ok(AppConfig {
            port: Self::get_env_or("PORT", DEFAULT_PORT)?,
            db: DbConfig {
                url: Self::get_env("DATABASE_URL")?,
                max_connections: Self::get_env_opt("DATABASE_MAX_CONNECTIONS")?,
            },
            auth: AuthConfig {
                min_password_length: Self::get_env_or("MIN_PASSWORD_LENGTH", DEFAULT_MIN_PASSWORD_LENGTH)?,
                token_ttl: ttl_secs.map(Duration::from_secs),
                users_list_requires_auth: Self::get_env_or("USERS_LIST_REQUIRES_AUTH", false)?,
            },
            media_root: PathBuf::from(Self::get_env_or("MEDIA_ROOT", DEFAULT_MEDIA_ROOT.to_string())?),
        })
    }
}
