use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
use argon2::Argon2;
use chrono_tz::Tz;
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "./configs/config.json";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite://./configs/bookings.db";
const DEFAULT_TIMEZONE: &str = "Europe/London";
const DEFAULT_LESSONS_PER_DAY: i64 = 6;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Config file {path} is not valid JSON: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("Config file {0} was incomplete; defaults were written, please review it and restart")]
    Incomplete(PathBuf),
    #[error("Unknown timezone: {0}")]
    Timezone(String),
    #[error("Invalid value for {0}")]
    Invalid(&'static str),
    #[error("Failed to hash default password: {0}")]
    Hash(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Login {
    pub user: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub timezone: Tz,
    pub lessons_per_day: i64,
    pub secure_cookies: bool,
    pub session_secret: String,
    pub logins: Vec<Login>,
}

/// On-disk shape of the config file. Every key is optional so that a partial
/// file can be detected, completed and written back.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    database_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lessons_per_day: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    secure_cookies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    logins: Option<Vec<Login>>,
}

impl Config {
    /// Loads the file named by `CONFIG_PATH`, then applies `PORT` and
    /// `DATABASE_URL` from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::load(Path::new(&path))?;

        if let Ok(port) = env::var("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::Invalid("PORT"))?;
        }
        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = url;
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading config file {}", path.display());

        let mut file: ConfigFile = if path.exists() {
            let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            warn!("No config found at {}", path.display());
            ConfigFile::default()
        };

        let mut incomplete = false;
        let mut dirty = false;

        if file.port.is_none() {
            warn!("Server port key missing from config");
            file.port = Some(DEFAULT_PORT);
            incomplete = true;
        }
        if file.logins.is_none() {
            warn!("Logins list missing from config");
            file.logins = Some(vec![default_login()?]);
            incomplete = true;
        }
        if file.session_secret.as_deref().is_none_or(|secret| secret.trim().is_empty()) {
            info!("Generating session secret");
            file.session_secret = Some(
                rand::thread_rng()
                    .sample_iter(&Alphanumeric)
                    .take(64)
                    .map(char::from)
                    .collect(),
            );
            dirty = true;
        }

        if incomplete || dirty {
            save(path, &file)?;
        }
        if incomplete {
            return Err(ConfigError::Incomplete(path.to_path_buf()));
        }

        let timezone_name = file.timezone.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|_| ConfigError::Timezone(timezone_name.clone()))?;

        let lessons_per_day = file.lessons_per_day.unwrap_or(DEFAULT_LESSONS_PER_DAY);
        if lessons_per_day < 1 {
            return Err(ConfigError::Invalid("lessons_per_day"));
        }

        Ok(Self {
            port: file.port.unwrap_or(DEFAULT_PORT),
            database_url: file.database_url.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            timezone,
            lessons_per_day,
            secure_cookies: file.secure_cookies.unwrap_or(false),
            session_secret: file.session_secret.unwrap_or_default(),
            logins: file.logins.unwrap_or_default(),
        })
    }
}

fn save(path: &Path, file: &ConfigFile) -> Result<(), ConfigError> {
    info!("Saving config to {}", path.display());
    let io_err = |source| ConfigError::Io { path: path.to_path_buf(), source };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    let body = serde_json::to_string_pretty(file).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, body).map_err(io_err)
}

fn default_login() -> Result<Login, ConfigError> {
    Ok(Login {
        user: "admin".to_string(),
        password_hash: hash_password("password")?,
        admin: true,
    })
}

pub fn hash_password(password: &str) -> Result<String, ConfigError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ConfigError::Hash(e.to_string()))
}
