//! Server configuration, read from a TOML file.
//!
//! The file is looked up at `$CLASSROOM_CONFIG`, falling back to
//! `classroom.toml` in the working directory. Every field is optional, and a
//! missing file means all defaults. Database credentials never live in the
//! file: they come from `PSQL_NAME` and `PSQL_PASS`.

use std::env::var;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::Level;

use crate::roster::DEFAULT_SEARCH_LIMIT;

pub const CONFIG_ENV: &str = "CLASSROOM_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "classroom.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind: String,
    pub log_level: String,
    pub search_limit: usize,
    pub backend: BackendKind,
    pub database: DatabaseConfig,
    pub tls: Option<TlsConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:9090".into(),
            log_level: "info".into(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            backend: BackendKind::default(),
            database: DatabaseConfig::default(),
            tls: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    /// Database name. The server's default database when unset.
    pub name: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            name: None,
            max_connections: 10,
        }
    }
}

/// PEM certificate and key. Serving switches to HTTPS when present.
#[derive(Debug, Clone, Deserialize)]
pub struct TlsConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self, String> {
        let path = var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::from_path(path)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(format!("Could not read {}: {e}", path.display())),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Invalid configuration: {e}"))
    }

    /// Unknown level names fall back to INFO.
    pub fn level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

impl DatabaseConfig {
    pub fn url(&self) -> Result<String, String> {
        let Ok(name) = var("PSQL_NAME") else {
            return Err("PSQL_NAME environment variable not present".into());
        };
        let Ok(pass) = var("PSQL_PASS") else {
            return Err("PSQL_PASS environment variable not present".into());
        };

        Ok(self.url_with(&name, &pass))
    }

    fn url_with(&self, user: &str, pass: &str) -> String {
        match &self.name {
            Some(db) => format!("postgres://{}:{}@{}/{}", user, pass, self.host, db),
            None => format!("postgres://{}:{}@{}", user, pass, self.host),
        }
    }
}
